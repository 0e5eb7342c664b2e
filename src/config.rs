//! Pool-sizing configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The registry itself has no knobs;
//! these settings are handed to the driver when a pool is opened.

use std::time::Duration;

/// Sizing and timeout options applied to every pool the registry opens.
///
/// Loaded once at startup via [`RegistryConfig::from_env`], or built by
/// hand for tests and embedded use.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum number of connections per pool.
    pub max_connections: u32,

    /// Minimum idle connections kept per pool.
    pub min_connections: u32,

    /// Timeout in seconds for acquiring a connection from a pool.
    pub acquire_timeout_secs: u64,
}

impl RegistryConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the [`Default`] values when a variable is not set
    /// or does not parse. Calls `dotenvy::dotenv().ok()` to optionally
    /// load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 2),
            acquire_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
        }
    }

    /// Returns the acquire timeout as a [`Duration`].
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 5,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn parse_env_falls_back_on_missing() {
        let value: u32 = parse_env("DB_REGISTRY_TEST_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
