//! Repository trait for custom field persistence.
//!
//! All operations are async. Implementations live in `fieldset-db`;
//! the administration workflow depends only on this contract.

use crate::error::FieldsetResult;
use crate::models::custom_field::{CustomField, CustomFieldDraft};

/// Visibility filters applied by scope listings.
#[derive(Debug, Clone, Copy)]
pub struct ScopeFilter {
    /// Hide records with `is_disabled = true`.
    pub exclude_disabled: bool,
    /// Hide records with `disable_at_server = true`.
    pub exclude_disabled_at_server: bool,
}

impl Default for ScopeFilter {
    fn default() -> Self {
        Self {
            exclude_disabled: false,
            exclude_disabled_at_server: true,
        }
    }
}

/// Persistence contract for custom fields.
pub trait CustomFieldRepository: Send + Sync {
    /// Persist a new record. The store assigns the id and timestamps.
    fn create(
        &self,
        draft: CustomFieldDraft,
    ) -> impl Future<Output = FieldsetResult<CustomField>> + Send;

    /// Fetch a record by id.
    fn get(&self, id: i64) -> impl Future<Output = FieldsetResult<CustomField>> + Send;

    /// Rewrite the mutable attributes of the record matched by
    /// `(id, org_id)`. Returns the post-update state, or `NotFound`
    /// when no record matches the pair.
    fn update(
        &self,
        org_id: i64,
        id: i64,
        draft: CustomFieldDraft,
    ) -> impl Future<Output = FieldsetResult<CustomField>> + Send;

    /// Hard delete. `NotFound` when the record does not exist.
    fn delete(&self, id: i64) -> impl Future<Output = FieldsetResult<()>> + Send;

    /// Every stored field, ascending id.
    fn list(&self) -> impl Future<Output = FieldsetResult<Vec<CustomField>>> + Send;

    /// Fields for `(org_id, scope)` that pass the filter, ascending id.
    /// The full matching set is returned; there is no pagination.
    fn list_by_scope(
        &self,
        org_id: i64,
        scope: &str,
        filter: ScopeFilter,
    ) -> impl Future<Output = FieldsetResult<Vec<CustomField>>> + Send;

    /// Number of active (`is_disabled = false`) fields for
    /// `(org_id, scope)`. Server-disabled fields still count.
    fn count_active(
        &self,
        org_id: i64,
        scope: &str,
    ) -> impl Future<Output = FieldsetResult<u64>> + Send;
}
