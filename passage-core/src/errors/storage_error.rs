/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt record for user {user_id} course {course_id}: {reason}")]
    CorruptRecord {
        user_id: String,
        course_id: String,
        reason: String,
    },
}
