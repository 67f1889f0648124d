//! v001: progress_records.

use rusqlite::Connection;

use passage_core::errors::PassageResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PassageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS progress_records (
            user_id       TEXT NOT NULL,
            course_id     TEXT NOT NULL,
            current_step  TEXT NOT NULL,
            record        TEXT NOT NULL,
            content_hash  TEXT NOT NULL,
            started_at    TEXT NOT NULL,
            completed_at  TEXT,
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (user_id, course_id)
        );

        CREATE INDEX IF NOT EXISTS idx_progress_user ON progress_records(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
