//! Registry error types.
//!
//! [`RegistryError`] is the central error type for the crate. Driver
//! failures are carried opaque in [`DriverError`] — the registry never
//! interprets or retries them.

/// Opaque error surfaced unchanged from the external driver.
///
/// The registry treats the driver as a black box: a failed `connect` or
/// `close` is boxed here and handed back to the caller as-is. Use
/// [`std::error::Error::source`] to reach the underlying driver error.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct DriverError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl DriverError {
    /// Wraps any driver-side error.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self(source.into())
    }

    /// Consumes the wrapper and returns the boxed driver error.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}

/// Error type for all registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A strict open found the name already registered. The existing
    /// handle is left untouched; callers may fall back to
    /// [`Registry::get`](crate::Registry::get).
    #[error("connection pool already registered under name `{0}`")]
    DuplicateRegistration(String),

    /// A lookup found no pool registered under the name.
    #[error("no connection pool registered under name `{0}`")]
    NotRegistered(String),

    /// Failure propagated unchanged from the driver's open or close.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),
}

impl RegistryError {
    /// Returns the registry name this error refers to, if any.
    ///
    /// `Driver` errors carry no name of their own.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::DuplicateRegistration(name) | Self::NotRegistered(name) => Some(name),
            Self::Driver(_) => None,
        }
    }
}
