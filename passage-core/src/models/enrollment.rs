use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One enrolled course with its backend-aggregated progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub course_id: String,
    pub course_title: String,
    pub enrolled_at: DateTime<Utc>,
    /// Backend aggregate, 0..=100.
    #[serde(default)]
    pub overall_progress: f64,
}
