//! StorageEngine owns the write connection, implements ProgressRepository
//! and CertificateCache, runs migrations on open.

use std::path::Path;

use passage_core::errors::PassageResult;
use passage_core::models::{Certificate, ProgressRecord};
use passage_core::traits::{CertificateCache, ProgressRepository};

use crate::migrations;
use crate::pool::{self, WriteConnection};
use crate::queries;

/// The storage engine. One per process; shared via `Arc` where needed.
pub struct StorageEngine {
    writer: WriteConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> PassageResult<Self> {
        let writer = WriteConnection::open(path)?;
        let engine = Self { writer };
        engine.initialize()?;
        engine.writer.with_conn_sync(|conn| {
            if !pool::pragmas::verify_wal_mode(conn)? {
                tracing::warn!("storage: WAL mode not active, concurrent reads will block");
            }
            Ok(())
        })?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> PassageResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let engine = Self { writer };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations.
    fn initialize(&self) -> PassageResult<()> {
        self.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }
}

impl ProgressRepository for StorageEngine {
    fn get(&self, user_id: &str, course_id: &str) -> PassageResult<Option<ProgressRecord>> {
        self.writer
            .with_conn_sync(|conn| queries::progress_crud::get_record(conn, user_id, course_id))
    }

    fn put(&self, user_id: &str, course_id: &str, record: &ProgressRecord) -> PassageResult<()> {
        self.writer.with_conn_sync(|conn| {
            queries::progress_crud::upsert_record(conn, user_id, course_id, record)
        })
    }

    fn delete(&self, user_id: &str, course_id: &str) -> PassageResult<()> {
        self.writer
            .with_conn_sync(|conn| queries::progress_crud::delete_record(conn, user_id, course_id))
    }

    fn list_for_user(&self, user_id: &str) -> PassageResult<Vec<(String, ProgressRecord)>> {
        self.writer
            .with_conn_sync(|conn| queries::progress_crud::list_records_for_user(conn, user_id))
    }
}

impl CertificateCache for StorageEngine {
    fn replace_for_user(&self, user_id: &str, certificates: &[Certificate]) -> PassageResult<()> {
        self.writer.with_conn_sync(|conn| {
            queries::certificate_cache::replace_for_user(conn, user_id, certificates)
        })
    }

    fn list_for_user(&self, user_id: &str) -> PassageResult<Vec<Certificate>> {
        self.writer
            .with_conn_sync(|conn| queries::certificate_cache::list_for_user(conn, user_id))
    }
}
