//! Integration tests for the custom field repository, running against
//! the in-memory SurrealDB engine.

use fieldset_core::error::FieldsetError;
use fieldset_core::models::custom_field::CustomFieldDraft;
use fieldset_core::repository::{CustomFieldRepository, ScopeFilter};
use fieldset_db::repository::SurrealCustomFieldRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

/// Helper: spin up an in-memory database with migrations applied.
async fn setup() -> SurrealCustomFieldRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    fieldset_db::run_migrations(&db).await.unwrap();
    SurrealCustomFieldRepository::new(db)
}

fn draft(name: &str, scope: &str) -> CustomFieldDraft {
    CustomFieldDraft {
        org_id: 1,
        name: name.into(),
        field_type: "text".into(),
        datatype: "String".into(),
        scope: scope.into(),
        label: String::new(),
        default_value: String::new(),
        phase: "1".into(),
        rule: String::new(),
        server_rule: String::new(),
        regex: String::new(),
        helptext: String::new(),
        error: String::new(),
        attrs: String::new(),
        is_disabled: false,
        is_compulsory: false,
        is_updatable: true,
        disable_at_server: false,
        enable_audit_trail: false,
        is_pii_data: false,
        is_psi_data: false,
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids() {
    let repo = setup().await;

    let first = repo.create(draft("first_field", "customer_card")).await.unwrap();
    let second = repo.create(draft("second_field", "customer_card")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let repo = setup().await;

    let mut d = draft("loyalty_tier", "loyalty_registration");
    d.label = "Loyalty tier".into();
    d.rule = "tier in list".into();
    d.is_pii_data = true;

    let created = repo.create(d).await.unwrap();
    let fetched = repo.get(created.id).await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.org_id, 1);
    assert_eq!(fetched.name, "loyalty_tier");
    assert_eq!(fetched.field_type, "text");
    assert_eq!(fetched.datatype, "String");
    assert_eq!(fetched.scope, "loyalty_registration");
    assert_eq!(fetched.label, "Loyalty tier");
    assert_eq!(fetched.rule, "tier in list");
    assert!(fetched.is_updatable);
    assert!(fetched.is_pii_data);
    assert!(!fetched.is_disabled);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn get_missing_returns_not_found() {
    let repo = setup().await;

    let err = repo.get(42).await.unwrap_err();
    assert!(matches!(err, FieldsetError::NotFound { .. }));
}

#[tokio::test]
async fn update_rewrites_attributes() {
    let repo = setup().await;

    let created = repo.create(draft("first_field", "customer_card")).await.unwrap();

    let mut d = draft("renamed_field", "customer_card");
    d.label = "Renamed".into();
    d.is_disabled = true;
    d.is_updatable = false;
    let updated = repo.update(1, created.id, d).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "renamed_field");
    assert_eq!(updated.label, "Renamed");
    assert!(updated.is_disabled);
    assert!(!updated.is_updatable);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.last_modified >= created.last_modified);
}

#[tokio::test]
async fn update_missing_returns_not_found() {
    let repo = setup().await;

    let err = repo.update(1, 42, draft("ghost_field", "customer_card")).await.unwrap_err();
    assert!(matches!(err, FieldsetError::NotFound { .. }));
}

#[tokio::test]
async fn update_under_wrong_org_leaves_record_untouched() {
    let repo = setup().await;

    let created = repo.create(draft("first_field", "customer_card")).await.unwrap();

    let err = repo
        .update(2, created.id, draft("hijacked_field", "customer_card"))
        .await
        .unwrap_err();
    assert!(matches!(err, FieldsetError::NotFound { .. }));

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "first_field");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let repo = setup().await;

    let created = repo.create(draft("first_field", "customer_card")).await.unwrap();
    repo.delete(created.id).await.unwrap();

    let err = repo.get(created.id).await.unwrap_err();
    assert!(matches!(err, FieldsetError::NotFound { .. }));
}

#[tokio::test]
async fn delete_missing_returns_not_found() {
    let repo = setup().await;

    let err = repo.delete(42).await.unwrap_err();
    assert!(matches!(err, FieldsetError::NotFound { .. }));
}

#[tokio::test]
async fn list_returns_ascending_ids() {
    let repo = setup().await;

    repo.create(draft("field_a", "customer_card")).await.unwrap();
    repo.create(draft("field_b", "loyalty_registration")).await.unwrap();
    repo.create(draft("field_c", "checkout_form")).await.unwrap();

    let all = repo.list().await.unwrap();
    let ids: Vec<i64> = all.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn list_by_scope_applies_filters() {
    let repo = setup().await;

    repo.create(draft("active_field", "customer_card")).await.unwrap();

    let mut disabled = draft("disabled_field", "customer_card");
    disabled.is_disabled = true;
    repo.create(disabled).await.unwrap();

    let mut server_disabled = draft("server_disabled_field", "customer_card");
    server_disabled.disable_at_server = true;
    repo.create(server_disabled).await.unwrap();

    repo.create(draft("other_scope_field", "checkout_form")).await.unwrap();

    // Default: keep disabled, hide server-disabled.
    let fields = repo
        .list_by_scope(1, "customer_card", ScopeFilter::default())
        .await
        .unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["active_field", "disabled_field"]);

    let fields = repo
        .list_by_scope(
            1,
            "customer_card",
            ScopeFilter {
                exclude_disabled: true,
                exclude_disabled_at_server: true,
            },
        )
        .await
        .unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["active_field"]);

    let fields = repo
        .list_by_scope(
            1,
            "customer_card",
            ScopeFilter {
                exclude_disabled: false,
                exclude_disabled_at_server: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(fields.len(), 3);
}

#[tokio::test]
async fn list_by_scope_is_tenant_scoped() {
    let repo = setup().await;

    repo.create(draft("org_one_field", "customer_card")).await.unwrap();

    let mut other = draft("org_two_field", "customer_card");
    other.org_id = 2;
    repo.create(other).await.unwrap();

    let fields = repo
        .list_by_scope(2, "customer_card", ScopeFilter::default())
        .await
        .unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["org_two_field"]);
}

#[tokio::test]
async fn count_active_ignores_disabled_fields() {
    let repo = setup().await;

    repo.create(draft("field_a", "customer_card")).await.unwrap();
    repo.create(draft("field_b", "customer_card")).await.unwrap();

    let mut disabled = draft("field_c", "customer_card");
    disabled.is_disabled = true;
    repo.create(disabled).await.unwrap();

    // Server-disabled fields still count as active.
    let mut server_disabled = draft("field_d", "customer_card");
    server_disabled.disable_at_server = true;
    repo.create(server_disabled).await.unwrap();

    repo.create(draft("field_e", "checkout_form")).await.unwrap();

    assert_eq!(repo.count_active(1, "customer_card").await.unwrap(), 3);
    assert_eq!(repo.count_active(1, "checkout_form").await.unwrap(), 1);
    assert_eq!(repo.count_active(1, "loyalty_registration").await.unwrap(), 0);
    assert_eq!(repo.count_active(2, "customer_card").await.unwrap(), 0);
}
