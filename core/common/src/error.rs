//! Common error types for Strata.

use thiserror::Error;

/// Top-level error type for storage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or incomplete configuration reached the driver factory.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A data operation addressed a path that does not exist, where the
    /// operation's contract requires existence.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The underlying storage engine failed for infrastructural reasons.
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O failure surfaced by a local engine handle. Backend-class.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the addressed path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
            || matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
