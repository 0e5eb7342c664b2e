//! # db-registry
//!
//! Process-wide **named database connection registry**: open, cache, look
//! up, and tear down connection pools by short name instead of threading
//! a handle through every call site.
//!
//! The registry manages pool **lifecycle and identity** only. Connecting,
//! pooling, and query execution belong to the driver behind the
//! [`Connector`] seam (the default is `sqlx` PostgreSQL via
//! [`PgConnector`]).
//!
//! ## Architecture
//!
//! ```text
//! Application code (by name: "app", "reporting", ...)
//!     │
//!     ├── Registry (open / get / destroy / statistics)
//!     │
//!     ├── Connector + PoolHandle (driver seam)
//!     │
//!     └── sqlx::PgPool
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use db_registry::{PgConnector, Registry};
//!
//! # async fn demo() -> Result<(), db_registry::RegistryError> {
//! // One registry per process, built at the composition root.
//! let registry = Arc::new(Registry::new(PgConnector::from_env()));
//!
//! let db = registry.open("app", "postgres://localhost/app").await?;
//!
//! // Anywhere else in the process:
//! let same_pool = registry.get("app").await?;
//!
//! registry.destroy("app").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Contract highlights
//!
//! - [`Registry::open`] is idempotent per name: reopening an existing
//!   name returns the original handle and **ignores the supplied URI**.
//!   [`Registry::open_strict`] fails instead of reusing.
//! - The registry owns teardown: obtain handles via [`Registry::get`],
//!   release them via [`Registry::destroy`] — never close one directly.
//! - [`Registry::get`] hard-fails on a missing name;
//!   [`Registry::pool_statistics`] soft-fails with `None`. Deliberate
//!   asymmetry, see the [`Registry`] docs.

pub mod config;
pub mod driver;
pub mod error;
pub mod registry;

pub use config::RegistryConfig;
pub use driver::{Connector, PoolHandle, PoolStatistics};
pub use error::{DriverError, RegistryError};
pub use registry::{EntrySummary, Registry, TeardownReport};

#[cfg(feature = "postgres")]
pub use driver::postgres::PgConnector;
