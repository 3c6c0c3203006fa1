//! SurrealDB implementation of the custom field repository.

use fieldset_core::error::FieldsetResult;
use fieldset_core::models::custom_field::{CustomField, CustomFieldDraft};
use fieldset_core::repository::{CustomFieldRepository, ScopeFilter};
use serde::Deserialize;
use surrealdb::sql::Datetime;
use surrealdb::{Connection, Surreal};

use crate::error::DbError;

/// DB-side row for queries where the record id is already known.
#[derive(Debug, Deserialize)]
struct CustomFieldRow {
    org_id: i64,
    name: String,
    field_type: String,
    datatype: String,
    scope: String,
    label: String,
    default_value: String,
    phase: String,
    rule: String,
    server_rule: String,
    regex: String,
    helptext: String,
    error: String,
    attrs: String,
    is_disabled: bool,
    is_compulsory: bool,
    /// Stored as 0/1; converted to bool at this boundary.
    is_updatable: i64,
    disable_at_server: bool,
    enable_audit_trail: bool,
    is_pii_data: bool,
    is_psi_data: bool,
    created_at: Datetime,
    last_modified: Datetime,
}

impl CustomFieldRow {
    fn into_custom_field(self, id: i64) -> CustomField {
        CustomField {
            id,
            org_id: self.org_id,
            name: self.name,
            field_type: self.field_type,
            datatype: self.datatype,
            scope: self.scope,
            label: self.label,
            default_value: self.default_value,
            phase: self.phase,
            rule: self.rule,
            server_rule: self.server_rule,
            regex: self.regex,
            helptext: self.helptext,
            error: self.error,
            attrs: self.attrs,
            is_disabled: self.is_disabled,
            is_compulsory: self.is_compulsory,
            is_updatable: self.is_updatable != 0,
            disable_at_server: self.disable_at_server,
            enable_audit_trail: self.enable_audit_trail,
            is_pii_data: self.is_pii_data,
            is_psi_data: self.is_psi_data,
            created_at: *self.created_at,
            last_modified: *self.last_modified,
        }
    }
}

/// DB-side row for listings, carrying the numeric id via `meta::id`.
#[derive(Debug, Deserialize)]
struct CustomFieldRowWithId {
    record_id: i64,
    org_id: i64,
    name: String,
    field_type: String,
    datatype: String,
    scope: String,
    label: String,
    default_value: String,
    phase: String,
    rule: String,
    server_rule: String,
    regex: String,
    helptext: String,
    error: String,
    attrs: String,
    is_disabled: bool,
    is_compulsory: bool,
    is_updatable: i64,
    disable_at_server: bool,
    enable_audit_trail: bool,
    is_pii_data: bool,
    is_psi_data: bool,
    created_at: Datetime,
    last_modified: Datetime,
}

impl CustomFieldRowWithId {
    fn into_custom_field(self) -> CustomField {
        CustomField {
            id: self.record_id,
            org_id: self.org_id,
            name: self.name,
            field_type: self.field_type,
            datatype: self.datatype,
            scope: self.scope,
            label: self.label,
            default_value: self.default_value,
            phase: self.phase,
            rule: self.rule,
            server_rule: self.server_rule,
            regex: self.regex,
            helptext: self.helptext,
            error: self.error,
            attrs: self.attrs,
            is_disabled: self.is_disabled,
            is_compulsory: self.is_compulsory,
            is_updatable: self.is_updatable != 0,
            disable_at_server: self.disable_at_server,
            enable_audit_trail: self.enable_audit_trail,
            is_pii_data: self.is_pii_data,
            is_psi_data: self.is_psi_data,
            created_at: *self.created_at,
            last_modified: *self.last_modified,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// SurrealDB-backed implementation of [`CustomFieldRepository`].
///
/// Generic over the connection type so production (WebSocket) and
/// tests (in-memory engine) share one code path.
#[derive(Clone)]
pub struct SurrealCustomFieldRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCustomFieldRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Allocate the next id from the atomic per-table counter.
    async fn next_id(&self) -> Result<i64, DbError> {
        let mut result = self
            .db
            .query("UPSERT counter:custom_field SET next = (next ?? 0) + 1 RETURN VALUE next")
            .await?;
        let ids: Vec<i64> = result.take(0)?;
        ids.into_iter()
            .next()
            .ok_or_else(|| DbError::Query("counter returned no value".into()))
    }
}

impl<C: Connection> CustomFieldRepository for SurrealCustomFieldRepository<C> {
    async fn create(&self, draft: CustomFieldDraft) -> FieldsetResult<CustomField> {
        let id = self.next_id().await?;

        let result = self
            .db
            .query(
                "CREATE type::thing('custom_field', $id) SET \
                 org_id = $org_id, name = $name, field_type = $field_type, \
                 datatype = $datatype, scope = $scope_name, label = $label, \
                 default_value = $default_value, phase = $phase, rule = $rule, \
                 server_rule = $server_rule, regex = $regex, helptext = $helptext, \
                 error = $error, attrs = $attrs, is_disabled = $is_disabled, \
                 is_compulsory = $is_compulsory, is_updatable = $is_updatable, \
                 disable_at_server = $disable_at_server, \
                 enable_audit_trail = $enable_audit_trail, \
                 is_pii_data = $is_pii_data, is_psi_data = $is_psi_data",
            )
            .bind(("id", id))
            .bind(("org_id", draft.org_id))
            .bind(("name", draft.name))
            .bind(("field_type", draft.field_type))
            .bind(("datatype", draft.datatype))
            .bind(("scope_name", draft.scope))
            .bind(("label", draft.label))
            .bind(("default_value", draft.default_value))
            .bind(("phase", draft.phase))
            .bind(("rule", draft.rule))
            .bind(("server_rule", draft.server_rule))
            .bind(("regex", draft.regex))
            .bind(("helptext", draft.helptext))
            .bind(("error", draft.error))
            .bind(("attrs", draft.attrs))
            .bind(("is_disabled", draft.is_disabled))
            .bind(("is_compulsory", draft.is_compulsory))
            .bind(("is_updatable", i64::from(draft.is_updatable)))
            .bind(("disable_at_server", draft.disable_at_server))
            .bind(("enable_audit_trail", draft.enable_audit_trail))
            .bind(("is_pii_data", draft.is_pii_data))
            .bind(("is_psi_data", draft.is_psi_data))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CustomFieldRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "custom_field".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_custom_field(id))
    }

    async fn get(&self, id: i64) -> FieldsetResult<CustomField> {
        let mut result = self
            .db
            .query("SELECT * FROM type::thing('custom_field', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomFieldRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "custom_field".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_custom_field(id))
    }

    async fn update(
        &self,
        org_id: i64,
        id: i64,
        draft: CustomFieldDraft,
    ) -> FieldsetResult<CustomField> {
        let result = self
            .db
            .query(
                "UPDATE type::thing('custom_field', $id) SET \
                 name = $name, field_type = $field_type, datatype = $datatype, \
                 scope = $scope_name, label = $label, \
                 default_value = $default_value, phase = $phase, rule = $rule, \
                 server_rule = $server_rule, regex = $regex, helptext = $helptext, \
                 error = $error, attrs = $attrs, is_disabled = $is_disabled, \
                 is_compulsory = $is_compulsory, is_updatable = $is_updatable, \
                 disable_at_server = $disable_at_server, \
                 enable_audit_trail = $enable_audit_trail, \
                 is_pii_data = $is_pii_data, is_psi_data = $is_psi_data, \
                 last_modified = time::now() \
                 WHERE org_id = $org_id",
            )
            .bind(("id", id))
            .bind(("org_id", org_id))
            .bind(("name", draft.name))
            .bind(("field_type", draft.field_type))
            .bind(("datatype", draft.datatype))
            .bind(("scope_name", draft.scope))
            .bind(("label", draft.label))
            .bind(("default_value", draft.default_value))
            .bind(("phase", draft.phase))
            .bind(("rule", draft.rule))
            .bind(("server_rule", draft.server_rule))
            .bind(("regex", draft.regex))
            .bind(("helptext", draft.helptext))
            .bind(("error", draft.error))
            .bind(("attrs", draft.attrs))
            .bind(("is_disabled", draft.is_disabled))
            .bind(("is_compulsory", draft.is_compulsory))
            .bind(("is_updatable", i64::from(draft.is_updatable)))
            .bind(("disable_at_server", draft.disable_at_server))
            .bind(("enable_audit_trail", draft.enable_audit_trail))
            .bind(("is_pii_data", draft.is_pii_data))
            .bind(("is_psi_data", draft.is_psi_data))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CustomFieldRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "custom_field".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_custom_field(id))
    }

    async fn delete(&self, id: i64) -> FieldsetResult<()> {
        let mut result = self
            .db
            .query("DELETE type::thing('custom_field', $id) RETURN BEFORE")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomFieldRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "custom_field".into(),
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self) -> FieldsetResult<Vec<CustomField>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM custom_field ORDER BY id ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomFieldRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(CustomFieldRowWithId::into_custom_field)
            .collect())
    }

    async fn list_by_scope(
        &self,
        org_id: i64,
        scope: &str,
        filter: ScopeFilter,
    ) -> FieldsetResult<Vec<CustomField>> {
        let mut conditions = vec!["org_id = $org_id", "scope = $scope_name"];
        if filter.exclude_disabled {
            conditions.push("is_disabled = false");
        }
        if filter.exclude_disabled_at_server {
            conditions.push("disable_at_server = false");
        }

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM custom_field WHERE {} ORDER BY id ASC",
            conditions.join(" AND ")
        );

        let mut result = self
            .db
            .query(&query)
            .bind(("org_id", org_id))
            .bind(("scope_name", scope.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CustomFieldRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(CustomFieldRowWithId::into_custom_field)
            .collect())
    }

    async fn count_active(&self, org_id: i64, scope: &str) -> FieldsetResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM custom_field \
                 WHERE org_id = $org_id AND scope = $scope_name \
                 AND is_disabled = false GROUP ALL",
            )
            .bind(("org_id", org_id))
            .bind(("scope_name", scope.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
