//! Versioned schema migrations, applied in order on engine open.

mod v001_progress_tables;
mod v002_certificate_cache;

use rusqlite::Connection;

use passage_core::errors::{PassageError, PassageResult, StorageError};

use crate::to_storage_err;

/// Latest schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// Run all pending migrations. Idempotent: already-applied versions are
/// skipped via the `schema_migrations` table.
pub fn run_migrations(conn: &Connection) -> PassageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            PassageError::from(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!("storage: applied migration v{version:03}");
    }
    Ok(())
}

/// Highest applied migration version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> PassageResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

type Migration = fn(&Connection) -> PassageResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_progress_tables::migrate),
    (2, v002_certificate_cache::migrate),
];
