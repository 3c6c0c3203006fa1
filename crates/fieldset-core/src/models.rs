//! Domain models for the fieldset system.

pub mod custom_field;
