//! Fieldset Admin: validation, naming normalization, quota enforcement,
//! and the create-or-update workflow for custom field definitions.

pub mod config;
pub mod error;
pub mod naming;
pub mod quota;
pub mod service;
pub mod toggle;
pub mod validate;

pub use config::FieldAdminConfig;
pub use error::FieldAdminError;
pub use service::{FieldService, FieldSubmission, UpsertOutcome};
pub use toggle::Toggle;
