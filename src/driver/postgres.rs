//! PostgreSQL driver backed by `sqlx::PgPool`.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{Connector, PoolHandle, PoolStatistics};
use crate::config::RegistryConfig;
use crate::error::DriverError;

/// Opens `sqlx` PostgreSQL pools sized by a [`RegistryConfig`].
///
/// Every pool opened through this connector shares the same sizing and
/// acquire-timeout options; per-name differences live in the URI.
#[derive(Debug, Clone, Default)]
pub struct PgConnector {
    config: RegistryConfig,
}

impl PgConnector {
    /// Creates a connector with the given pool options.
    #[must_use]
    pub const fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Creates a connector configured from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(RegistryConfig::from_env())
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Pool = PgPool;

    async fn connect(&self, uri: &str) -> Result<PgPool, DriverError> {
        PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .acquire_timeout(self.config.acquire_timeout())
            .connect(uri)
            .await
            .map_err(DriverError::new)
    }
}

#[async_trait]
impl PoolHandle for PgPool {
    async fn close(&self) -> Result<(), DriverError> {
        PgPool::close(self).await;
        Ok(())
    }

    fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            open_connections: self.size(),
            idle_connections: u32::try_from(self.num_idle()).unwrap_or(u32::MAX),
            max_connections: self.options().get_max_connections(),
        }
    }
}
