//! Per-organization, per-scope quota enforcement.

use fieldset_core::error::FieldsetResult;
use fieldset_core::repository::CustomFieldRepository;

use crate::error::FieldAdminError;

/// Scopes subject to an active-field-count quota.
pub const LIMITED_SCOPES: &[&str] = &[
    "loyalty_registration",
    "loyalty_transaction",
    "store_custom_fields",
    "customer_card",
];

/// Whether a scope is subject to the creation quota.
pub fn is_limited(scope: &str) -> bool {
    LIMITED_SCOPES.contains(&scope)
}

/// Human-facing entity label used in the quota message. Empty for
/// scopes outside the limited set; the gate in [`check_scope_quota`]
/// keeps that fallback from being observable.
fn entity_label(scope: &str) -> &'static str {
    match scope {
        "loyalty_registration" => "registration",
        "loyalty_transaction" => "transaction",
        "store_custom_fields" => "store",
        "customer_card" => "card",
        _ => "",
    }
}

/// The message surfaced when a creation would exceed the quota.
pub fn limit_message(scope: &str, limit: u32) -> String {
    format!(
        "Max limit of {limit} on total number of {} custom fields exceeded. \
         Either deactivate custom fields or contact support team for \
         increasing the limit",
        entity_label(scope)
    )
}

/// Enforce the creation quota for `(org_id, scope)`.
///
/// Counts active fields through the repository and rejects when the
/// count has reached `limit`. Scopes outside the limited set always
/// pass. The count and the caller's subsequent create are not wrapped
/// in a transaction, so two concurrent creations can both pass here
/// and leave the scope transiently over the limit.
pub async fn check_scope_quota<R: CustomFieldRepository>(
    repo: &R,
    org_id: i64,
    scope: &str,
    limit: u32,
) -> FieldsetResult<()> {
    if !is_limited(scope) {
        return Ok(());
    }

    let active = repo.count_active(org_id, scope).await?;
    if active >= u64::from(limit) {
        return Err(FieldAdminError::QuotaExceeded(limit_message(scope, limit)).into());
    }

    Ok(())
}
