use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::progress_record::ProgressRecord;
use crate::errors::PassageResult;

/// Full-record replication payload. Every sync is a full overwrite of the
/// course's progress on the backend (last-writer-wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSyncPayload {
    pub user_id: String,
    pub course_id: String,
    /// blake3 hash of `record` for server-side dedup.
    pub content_hash: String,
    pub record: ProgressRecord,
    pub synced_at: DateTime<Utc>,
}

impl ProgressSyncPayload {
    pub fn from_record(
        user_id: &str,
        course_id: &str,
        record: &ProgressRecord,
        synced_at: DateTime<Utc>,
    ) -> PassageResult<Self> {
        Ok(Self {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            content_hash: record.content_hash()?,
            record: record.clone(),
            synced_at,
        })
    }
}

/// Incremental lesson-progress payload, sent when a lesson update carries
/// a numeric progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonProgressPayload {
    pub course_id: String,
    pub lesson_index: u32,
    pub progress_percent: f64,
    #[serde(default)]
    pub time_spent_secs: u64,
}

/// Backend-aggregated course progress. Eligibility trusts this number
/// over anything derived locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseAggregate {
    pub course_id: String,
    pub overall_progress: f64,
}
