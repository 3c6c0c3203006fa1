//! Custom field upsert and query orchestration.

use fieldset_core::error::FieldsetResult;
use fieldset_core::models::custom_field::{CustomField, CustomFieldDraft};
use fieldset_core::repository::{CustomFieldRepository, ScopeFilter};
use serde::Deserialize;

use crate::config::FieldAdminConfig;
use crate::error::FieldAdminError;
use crate::naming;
use crate::quota;
use crate::toggle::Toggle;
use crate::validate;

/// A raw field definition as submitted by the administration UI.
///
/// Field names follow the submission form's wire format. Optional
/// strings are defaulted during draft assembly, not here; the display
/// name defaults to empty so the validator owns the missing-name
/// failure. A missing scope is rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSubmission {
    /// Target record for the update path; absent means create.
    pub custom_field_id: Option<i64>,
    /// Owning organization; the configured default applies when absent.
    pub org_id: Option<i64>,
    #[serde(rename = "f_name", default)]
    pub name: String,
    #[serde(rename = "f_type")]
    pub field_type: Option<String>,
    #[serde(rename = "f_datatype")]
    pub datatype: Option<String>,
    #[serde(rename = "f_scope")]
    pub scope: String,
    #[serde(rename = "f_label")]
    pub label: Option<String>,
    #[serde(rename = "f_default")]
    pub default_value: Option<String>,
    #[serde(rename = "f_phase")]
    pub phase: Option<String>,
    #[serde(rename = "f_rule")]
    pub rule: Option<String>,
    #[serde(rename = "f_server_rule")]
    pub server_rule: Option<String>,
    #[serde(rename = "f_regex")]
    pub regex: Option<String>,
    #[serde(rename = "f_helptext")]
    pub helptext: Option<String>,
    #[serde(rename = "f_error")]
    pub error: Option<String>,
    #[serde(rename = "f_attrs")]
    pub attrs: Option<String>,
    #[serde(rename = "f_is_disabled", default)]
    pub is_disabled: Toggle,
    #[serde(rename = "f_is_compulsory", default)]
    pub is_compulsory: Toggle,
    #[serde(rename = "f_is_updatable", default)]
    pub is_updatable: Toggle,
    #[serde(rename = "f_disable_at_server", default)]
    pub disable_at_server: Toggle,
    #[serde(rename = "f_enable_audit_trail", default)]
    pub enable_audit_trail: Toggle,
    #[serde(rename = "f_is_pii_data", default)]
    pub is_pii_data: Toggle,
    #[serde(rename = "f_is_psi_data", default)]
    pub is_psi_data: Toggle,
}

/// Result of a successful create-or-update.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// Id of the affected record (fresh on create).
    pub id: i64,
    /// True when a new record was created, false on update.
    pub created: bool,
    /// Canonical post-write state of the record.
    pub field: CustomField,
}

impl UpsertOutcome {
    /// Human-readable success message distinguishing the two paths.
    pub fn message(&self) -> &'static str {
        if self.created {
            "Created Successfully!!!"
        } else {
            "Updated Successfully!!!"
        }
    }
}

/// Custom field administration service.
///
/// Generic over the repository implementation so the workflow layer
/// carries no dependency on the database crate.
pub struct FieldService<R: CustomFieldRepository> {
    repo: R,
    config: FieldAdminConfig,
}

impl<R: CustomFieldRepository> FieldService<R> {
    pub fn new(repo: R, config: FieldAdminConfig) -> Self {
        Self { repo, config }
    }

    /// Create or update a custom field from a raw submission.
    ///
    /// The gates run in order and the first failure short-circuits the
    /// rest: validation, creation quota, name normalization, write.
    pub async fn upsert(&self, submission: FieldSubmission) -> FieldsetResult<UpsertOutcome> {
        // 1. Resolve the checkbox wire values to strict booleans.
        let is_disabled = submission.is_disabled.as_bool();
        let is_compulsory = submission.is_compulsory.as_bool();
        let is_updatable = submission.is_updatable.as_bool();
        let disable_at_server = submission.disable_at_server.as_bool();
        let enable_audit_trail = submission.enable_audit_trail.as_bool();
        let is_pii_data = submission.is_pii_data.as_bool();
        let is_psi_data = submission.is_psi_data.as_bool();

        // 2. Validate the definition. Only the first violation is
        //    surfaced to the submitter.
        if let Some(message) = validate::validate(&submission).first().copied() {
            return Err(FieldAdminError::Validation(message).into());
        }

        // 3. Creation quota for limited scopes. Updates are exempt.
        let org_id = submission.org_id.unwrap_or(self.config.default_org_id);
        if submission.custom_field_id.is_none() {
            quota::check_scope_quota(
                &self.repo,
                org_id,
                &submission.scope,
                self.config.custom_field_limit,
            )
            .await?;
        }

        // 4. Derive the storage identifier from the display name.
        let name = naming::uglify(&submission.name);

        // 5. Assemble the attribute set, filling defaults for unset
        //    optionals.
        let draft = CustomFieldDraft {
            org_id,
            name,
            field_type: submission.field_type.unwrap_or_else(|| "text".to_string()),
            datatype: submission.datatype.unwrap_or_else(|| "String".to_string()),
            scope: submission.scope,
            label: submission.label.unwrap_or_default(),
            default_value: submission.default_value.unwrap_or_default(),
            phase: submission.phase.unwrap_or_else(|| "1".to_string()),
            rule: submission.rule.unwrap_or_default(),
            server_rule: submission.server_rule.unwrap_or_default(),
            regex: submission.regex.unwrap_or_default(),
            helptext: submission.helptext.unwrap_or_default(),
            error: submission.error.unwrap_or_default(),
            attrs: submission.attrs.unwrap_or_default(),
            is_disabled,
            is_compulsory,
            is_updatable,
            disable_at_server,
            enable_audit_trail,
            is_pii_data,
            is_psi_data,
        };

        // 6. Write: update when a target id was supplied, create
        //    otherwise.
        match submission.custom_field_id {
            Some(id) => {
                let field = self.repo.update(org_id, id, draft).await?;
                Ok(UpsertOutcome {
                    id: field.id,
                    created: false,
                    field,
                })
            }
            None => {
                let field = self.repo.create(draft).await?;
                Ok(UpsertOutcome {
                    id: field.id,
                    created: true,
                    field,
                })
            }
        }
    }

    /// Fields for an organization and scope, ascending id.
    pub async fn list_by_scope(
        &self,
        org_id: i64,
        scope: &str,
        filter: ScopeFilter,
    ) -> FieldsetResult<Vec<CustomField>> {
        self.repo.list_by_scope(org_id, scope, filter).await
    }

    /// Fetch a single field by id.
    pub async fn get(&self, id: i64) -> FieldsetResult<CustomField> {
        self.repo.get(id).await
    }

    /// Every stored field, ascending id.
    pub async fn list(&self) -> FieldsetResult<Vec<CustomField>> {
        self.repo.list().await
    }

    /// Hard delete a field by id.
    pub async fn delete(&self, id: i64) -> FieldsetResult<()> {
        self.repo.delete(id).await
    }
}
