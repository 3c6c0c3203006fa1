//! Administration workflow error types.

use fieldset_core::error::FieldsetError;
use thiserror::Error;

/// Errors produced by the administration workflow gates.
#[derive(Debug, Error)]
pub enum FieldAdminError {
    /// A field definition rule was violated.
    #[error("{0}")]
    Validation(&'static str),

    /// A limited scope is at its active-field quota.
    #[error("{0}")]
    QuotaExceeded(String),
}

impl From<FieldAdminError> for FieldsetError {
    fn from(err: FieldAdminError) -> Self {
        match err {
            FieldAdminError::Validation(message) => FieldsetError::Validation {
                message: message.to_string(),
            },
            FieldAdminError::QuotaExceeded(message) => FieldsetError::QuotaExceeded { message },
        }
    }
}
