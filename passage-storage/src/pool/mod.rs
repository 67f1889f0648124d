//! Connection handling. Progress records are a few KB per learner and the
//! runtime is single-threaded event-driven, so a single serialized write
//! connection carries all traffic; reads route through it as well.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use passage_core::errors::PassageResult;

use crate::to_storage_err;

/// The single write connection, serialized behind a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database file and apply pragmas.
    pub fn open(path: &Path) -> PassageResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory connection (for testing).
    pub fn open_in_memory() -> PassageResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> PassageResult<T>
    where
        F: FnOnce(&Connection) -> PassageResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned"))?;
        f(&guard)
    }
}
