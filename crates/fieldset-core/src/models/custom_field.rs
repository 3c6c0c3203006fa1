//! Custom field domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamically defined form field, owned by an organization and
/// attached to one functional area (scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub id: i64,
    pub org_id: i64,
    /// Canonical storage identifier derived from the display name.
    pub name: String,
    /// UI rendering category, e.g. `text` or `number`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Storage representation category, e.g. `String`.
    pub datatype: String,
    /// Functional area the field belongs to, e.g. `customer_card`.
    pub scope: String,
    pub label: String,
    #[serde(rename = "default")]
    pub default_value: String,
    pub phase: String,
    /// Client-side validation rule expression.
    pub rule: String,
    /// Server-side validation rule expression.
    pub server_rule: String,
    pub regex: String,
    pub helptext: String,
    /// Message shown when client-side validation fails.
    pub error: String,
    pub attrs: String,
    pub is_disabled: bool,
    pub is_compulsory: bool,
    pub is_updatable: bool,
    pub disable_at_server: bool,
    pub enable_audit_trail: bool,
    /// Marks the field as holding personally identifying information.
    pub is_pii_data: bool,
    pub is_psi_data: bool,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// The fully defaulted attribute set written on create and update.
///
/// Assembled by the administration workflow after validation and name
/// normalization. The store assigns `id` and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFieldDraft {
    pub org_id: i64,
    pub name: String,
    pub field_type: String,
    pub datatype: String,
    pub scope: String,
    pub label: String,
    pub default_value: String,
    pub phase: String,
    pub rule: String,
    pub server_rule: String,
    pub regex: String,
    pub helptext: String,
    pub error: String,
    pub attrs: String,
    pub is_disabled: bool,
    pub is_compulsory: bool,
    pub is_updatable: bool,
    pub disable_at_server: bool,
    pub enable_audit_trail: bool,
    pub is_pii_data: bool,
    pub is_psi_data: bool,
}
