//! Error types shared across the fieldset crates.

use thiserror::Error;

/// Top-level error type for the fieldset system.
#[derive(Debug, Error)]
pub enum FieldsetError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A field definition rule was violated. The message is shown to
    /// the submitter verbatim.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A limited scope is at its active-field quota. The message is
    /// shown to the submitter verbatim.
    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type for fieldset operations.
pub type FieldsetResult<T> = Result<T, FieldsetError>;
