//! Error types shared across the aupii crates.

use thiserror::Error;

/// Result type for aupii operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for aupii operations.
///
/// Note that structural validation failures are *not* errors: validators are
/// total functions returning [`crate::ValidationOutcome`]. Errors here are
/// configuration problems surfaced before evaluation begins.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An identifier type named in the configuration is not registered.
    #[error("Unknown identifier type: {0}")]
    UnknownIdentifierType(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error (findings export).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
