//! SurrealDB repository implementations.

mod custom_field;

pub use custom_field::SurrealCustomFieldRepository;
