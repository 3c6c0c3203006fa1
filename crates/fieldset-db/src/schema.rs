//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! The `counter` table backs integer id allocation so custom fields
//! keep the small numeric ids their consumers expect.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "custom_fields",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: custom field tables
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Custom fields (organization scope)
-- =======================================================================
DEFINE TABLE custom_field SCHEMAFULL;
DEFINE FIELD org_id ON TABLE custom_field TYPE int;
DEFINE FIELD name ON TABLE custom_field TYPE string;
DEFINE FIELD field_type ON TABLE custom_field TYPE string \
    DEFAULT 'text';
DEFINE FIELD datatype ON TABLE custom_field TYPE string \
    DEFAULT 'String';
DEFINE FIELD scope ON TABLE custom_field TYPE string;
DEFINE FIELD label ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD default_value ON TABLE custom_field TYPE string \
    DEFAULT '';
DEFINE FIELD phase ON TABLE custom_field TYPE string DEFAULT '1';
DEFINE FIELD rule ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD server_rule ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD regex ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD helptext ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD error ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD attrs ON TABLE custom_field TYPE string DEFAULT '';
DEFINE FIELD is_disabled ON TABLE custom_field TYPE bool DEFAULT false;
DEFINE FIELD is_compulsory ON TABLE custom_field TYPE bool \
    DEFAULT false;
-- Kept as 0/1 int for compatibility with the historical data format;
-- the domain model exposes a bool.
DEFINE FIELD is_updatable ON TABLE custom_field TYPE int DEFAULT 1;
DEFINE FIELD disable_at_server ON TABLE custom_field TYPE bool \
    DEFAULT false;
DEFINE FIELD enable_audit_trail ON TABLE custom_field TYPE bool \
    DEFAULT false;
DEFINE FIELD is_pii_data ON TABLE custom_field TYPE bool DEFAULT false;
DEFINE FIELD is_psi_data ON TABLE custom_field TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE custom_field TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD last_modified ON TABLE custom_field TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_custom_field_org_scope ON TABLE custom_field \
    COLUMNS org_id, scope;

-- =======================================================================
-- Id sequences
-- =======================================================================
DEFINE TABLE counter SCHEMAFULL;
DEFINE FIELD next ON TABLE counter TYPE int DEFAULT 0;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum. Safe to
/// run on every startup.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
