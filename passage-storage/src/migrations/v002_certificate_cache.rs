//! v002: certificate_cache.

use rusqlite::Connection;

use passage_core::errors::PassageResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PassageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS certificate_cache (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            course_id   TEXT NOT NULL,
            status      TEXT NOT NULL,
            payload     TEXT NOT NULL,
            fetched_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_cert_user ON certificate_cache(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
