//! CLI error types

use thiserror::Error;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Errors that terminate a CLI invocation with a non-zero exit
#[derive(Debug, Error)]
pub enum CliError {
    #[error("schema error: {0}")]
    Schema(#[from] crate::schema::SchemaError),

    #[error("storage error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid payload file '{path}': {reason}")]
    InvalidPayload { path: String, reason: String },

    /// The one-shot `validate` command found violations; the error map has
    /// already been printed to stdout.
    #[error("payload failed validation")]
    ValidationFailed,
}
