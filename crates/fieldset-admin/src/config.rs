//! Administration workflow configuration.

/// Configuration for the custom field administration service.
#[derive(Debug, Clone)]
pub struct FieldAdminConfig {
    /// Organization applied when a submission carries none.
    /// Single-tenant deployments run everything under this org.
    pub default_org_id: i64,
    /// Maximum number of active custom fields per limited scope,
    /// counted per organization.
    pub custom_field_limit: u32,
}

impl Default for FieldAdminConfig {
    fn default() -> Self {
        Self {
            default_org_id: 1,
            custom_field_limit: 10,
        }
    }
}
