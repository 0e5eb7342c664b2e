//! Driver boundary: the seam between the registry and the database library.
//!
//! The registry never opens, closes, or inspects a connection itself; it
//! goes through [`Connector`] to open pools and [`PoolHandle`] to close
//! them and read their statistics. Production code uses the sqlx-backed
//! [`PgConnector`]; tests inject a fake.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DriverError;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PgConnector;

/// Opens connection pools from a connection URI.
///
/// One connector is injected per [`Registry`](crate::Registry); it is
/// invoked only for names not yet registered.
#[async_trait]
pub trait Connector: Debug + Send + Sync + 'static {
    /// The pool handle type this connector produces.
    type Pool: PoolHandle;

    /// Opens a new connection pool for the given URI.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] on a malformed URI or unreachable
    /// backend; the registry propagates it unchanged.
    async fn connect(&self, uri: &str) -> Result<Self::Pool, DriverError>;
}

/// A live connection pool owned by the registry.
///
/// Handles are cheap to clone (reference-counted in every real driver);
/// the registry hands out clones and keeps one for teardown.
#[async_trait]
pub trait PoolHandle: Clone + Debug + Send + Sync + 'static {
    /// Closes the pool and all its connections.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the driver cannot close cleanly;
    /// the registry propagates it unchanged.
    async fn close(&self) -> Result<(), DriverError>;

    /// Returns a snapshot of the pool's connection counts.
    fn statistics(&self) -> PoolStatistics;
}

/// Point-in-time connection counts for a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatistics {
    /// Connections currently open (in use or idle).
    pub open_connections: u32,
    /// Connections currently idle in the pool.
    pub idle_connections: u32,
    /// Upper bound on pool size.
    pub max_connections: u32,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn statistics_serialize_as_flat_json() {
        let stats = PoolStatistics {
            open_connections: 3,
            idle_connections: 1,
            max_connections: 10,
        };
        let json = serde_json::to_value(&stats).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("open_connections").and_then(|v| v.as_u64()), Some(3));
        assert_eq!(json.get("idle_connections").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(json.get("max_connections").and_then(|v| v.as_u64()), Some(10));
    }
}
