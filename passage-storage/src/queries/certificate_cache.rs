//! Read-through cache of backend-owned certificates.

use rusqlite::{params, Connection};

use passage_core::errors::PassageResult;
use passage_core::models::Certificate;

use crate::to_storage_err;

/// Replace a learner's cached certificates with the backend's list.
/// Delete-then-insert inside one transaction so readers never see a
/// partial set.
pub fn replace_for_user(
    conn: &Connection,
    user_id: &str,
    certificates: &[Certificate],
) -> PassageResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("replace_for_user begin: {e}")))?;

    let result = (|| -> PassageResult<()> {
        tx.execute(
            "DELETE FROM certificate_cache WHERE user_id = ?1",
            params![user_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

        for cert in certificates {
            let payload = serde_json::to_string(cert)?;
            let status = serde_json::to_string(&cert.status)?;
            tx.execute(
                "INSERT INTO certificate_cache (id, user_id, course_id, status, payload)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    cert.id,
                    user_id,
                    cert.course_id,
                    status.trim_matches('"'),
                    payload,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
        Ok(())
    })();

    match result {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("replace_for_user commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Cached certificates for a learner, ordered by course id.
pub fn list_for_user(conn: &Connection, user_id: &str) -> PassageResult<Vec<Certificate>> {
    let mut stmt = conn
        .prepare(
            "SELECT payload FROM certificate_cache
             WHERE user_id = ?1 ORDER BY course_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(serde_json::from_str(&raw)?);
    }
    Ok(out)
}
