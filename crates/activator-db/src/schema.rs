//! Schema definitions and migration runner for SurrealDB.
//!
//! Users are keyed by an integer drawn from the `id_counter` table, so
//! `user:<n>` is both the record id and the public user id. Token
//! hashes are stored hex-encoded.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct AppliedMigration {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "users_and_tokens",
    sql: SCHEMA_V1,
}];

const SCHEMA_V1: &str = "\
-- Monotonic id source, one record per keyed table.
DEFINE TABLE id_counter SCHEMAFULL;
DEFINE FIELD last ON TABLE id_counter TYPE int;

DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD user_name ON TABLE user TYPE string;
DEFINE FIELD nick_name ON TABLE user TYPE string;
DEFINE FIELD activated ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- Activation tokens: insert-only, bulk-deleted per user.
DEFINE TABLE token SCHEMAFULL;
DEFINE FIELD hash ON TABLE token TYPE string \
    ASSERT string::len($value) = 64;
DEFINE FIELD user_id ON TABLE token TYPE int;
DEFINE FIELD expiry ON TABLE token TYPE datetime;
DEFINE INDEX idx_token_hash ON TABLE token COLUMNS hash;
DEFINE INDEX idx_token_user ON TABLE token COLUMNS user_id;
";

/// Apply every migration newer than the recorded schema version.
///
/// The `_migration` table is created on first run; re-running against an
/// up-to-date database is a no-op.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<AppliedMigration> = result.take(0)?;
    let current = applied.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!("recording v{}: {}", migration.version, e))
            })?;
    }

    Ok(())
}

/// Raw DDL for schema version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
