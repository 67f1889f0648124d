//! Upsert, get, delete, list for progress records.

use rusqlite::{params, Connection, OptionalExtension};

use passage_core::errors::{PassageError, PassageResult, StorageError};
use passage_core::models::ProgressRecord;

use crate::to_storage_err;

/// Upsert a progress record. The full record JSON is the source of truth;
/// promoted columns exist for cheap listing only.
pub fn upsert_record(
    conn: &Connection,
    user_id: &str,
    course_id: &str,
    record: &ProgressRecord,
) -> PassageResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("upsert_record begin: {e}")))?;

    match upsert_record_inner(&tx, user_id, course_id, record) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("upsert_record commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn upsert_record_inner(
    conn: &Connection,
    user_id: &str,
    course_id: &str,
    record: &ProgressRecord,
) -> PassageResult<()> {
    let record_json = serde_json::to_string(record)?;
    let content_hash = record.content_hash()?;

    conn.execute(
        "INSERT INTO progress_records (
            user_id, course_id, current_step, record, content_hash,
            started_at, completed_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        ON CONFLICT (user_id, course_id) DO UPDATE SET
            current_step = excluded.current_step,
            record       = excluded.record,
            content_hash = excluded.content_hash,
            started_at   = excluded.started_at,
            completed_at = excluded.completed_at,
            updated_at   = excluded.updated_at",
        params![
            user_id,
            course_id,
            record.current_step.key(),
            record_json,
            content_hash,
            record.started_at.to_rfc3339(),
            record.completed_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch one record, or `None` if the learner has not started the course.
pub fn get_record(
    conn: &Connection,
    user_id: &str,
    course_id: &str,
) -> PassageResult<Option<ProgressRecord>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT record FROM progress_records WHERE user_id = ?1 AND course_id = ?2",
            params![user_id, course_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match json {
        None => Ok(None),
        Some(raw) => {
            let record = serde_json::from_str(&raw).map_err(|e| {
                PassageError::from(StorageError::CorruptRecord {
                    user_id: user_id.to_string(),
                    course_id: course_id.to_string(),
                    reason: e.to_string(),
                })
            })?;
            Ok(Some(record))
        }
    }
}

pub fn delete_record(conn: &Connection, user_id: &str, course_id: &str) -> PassageResult<()> {
    conn.execute(
        "DELETE FROM progress_records WHERE user_id = ?1 AND course_id = ?2",
        params![user_id, course_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All records for a learner, ordered by course id.
pub fn list_records_for_user(
    conn: &Connection,
    user_id: &str,
) -> PassageResult<Vec<(String, ProgressRecord)>> {
    let mut stmt = conn
        .prepare(
            "SELECT course_id, record FROM progress_records
             WHERE user_id = ?1 ORDER BY course_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (course_id, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let record = serde_json::from_str(&raw).map_err(|e| {
            PassageError::from(StorageError::CorruptRecord {
                user_id: user_id.to_string(),
                course_id: course_id.clone(),
                reason: e.to_string(),
            })
        })?;
        out.push((course_id, record));
    }
    Ok(out)
}
