use tempfile::TempDir;

use passage_core::traits::ProgressRepository;
use passage_storage::migrations::{current_version, run_migrations, SCHEMA_VERSION};
use passage_storage::pool::WriteConnection;
use passage_storage::StorageEngine;

#[test]
fn fresh_database_migrates_to_latest() {
    let writer = WriteConnection::open_in_memory().unwrap();
    writer
        .with_conn_sync(|conn| {
            run_migrations(conn)?;
            assert_eq!(current_version(conn).unwrap(), SCHEMA_VERSION);
            Ok(())
        })
        .unwrap();
}

#[test]
fn migrations_are_idempotent() {
    let writer = WriteConnection::open_in_memory().unwrap();
    writer
        .with_conn_sync(|conn| {
            run_migrations(conn)?;
            run_migrations(conn)?;
            assert_eq!(current_version(conn).unwrap(), SCHEMA_VERSION);
            // Each version recorded exactly once.
            let rows: u32 = conn
                .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                    row.get(0)
                })
                .unwrap();
            assert_eq!(rows, SCHEMA_VERSION);
            Ok(())
        })
        .unwrap();
}

#[test]
fn reopening_an_already_migrated_file_works() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passage.db");
    drop(StorageEngine::open(&path).unwrap());
    // Second open re-runs the (now no-op) migration pass.
    let engine = StorageEngine::open(&path).unwrap();
    assert!(engine.get("u1", "c1").unwrap().is_none());
}
