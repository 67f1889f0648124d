use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::course::CourseConfig;
use super::stage::StageId;
use super::submission::Submissions;
use crate::constants::{POSTTEST_GRADE_WEIGHT, PRETEST_GRADE_WEIGHT};
use crate::errors::PassageResult;

/// Build the quiz-score key: `pretest_<id>` or `posttest_<id>`.
pub fn quiz_key(quiz_id: &str, is_pre_test: bool) -> String {
    if is_pre_test {
        format!("pretest_{quiz_id}")
    } else {
        format!("posttest_{quiz_id}")
    }
}

/// Sub-progress within the lessons stage, keyed by lesson index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LessonProgress {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub time_spent_secs: u64,
    /// Percent through the lesson, when the caller reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<DateTime<Utc>>,
}

/// Partial update merged field-wise into a [`LessonProgress`] entry.
#[derive(Debug, Clone, Default)]
pub struct LessonProgressUpdate {
    pub completed: Option<bool>,
    pub time_spent_secs: Option<u64>,
    pub progress_percent: Option<f64>,
}

/// Score record for one quiz key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizScore {
    /// Caller-supplied score; this layer does no range validation.
    pub score: u32,
    pub attempts: u32,
    pub completed_at: DateTime<Utc>,
}

/// Per-learner, per-course progress. Exclusively owned by the learner's
/// session; the local repository is the write-through cache and the backend
/// copy is best-effort replication.
///
/// Ordered collections (`BTreeSet`/`BTreeMap`) keep serialization
/// byte-stable, which the idempotent-load guarantee relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    pub current_step: StageId,
    pub completed_steps: BTreeSet<StageId>,
    #[serde(default)]
    pub lesson_progress: BTreeMap<u32, LessonProgress>,
    #[serde(default)]
    pub quiz_scores: BTreeMap<String, QuizScore>,
    #[serde(default)]
    pub submissions: Submissions,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_time_spent_secs: u64,
}

impl ProgressRecord {
    /// A fresh record positioned at the intro stage.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            current_step: StageId::Intro,
            completed_steps: BTreeSet::new(),
            lesson_progress: BTreeMap::new(),
            quiz_scores: BTreeMap::new(),
            submissions: Submissions::default(),
            started_at,
            completed_at: None,
            last_accessed: None,
            total_time_spent_secs: 0,
        }
    }

    /// Whether every active stage of the course has been completed.
    pub fn is_course_completed(&self, course: &CourseConfig) -> bool {
        course
            .active_stages()
            .iter()
            .all(|s| self.completed_steps.contains(s))
    }

    /// Locally derived completion percentage. This can legitimately disagree
    /// with the backend aggregate; eligibility trusts the backend number.
    pub fn completion_percent(&self, course: &CourseConfig) -> u32 {
        let total = course.active_stages().len();
        if total == 0 {
            return 0;
        }
        let done = course
            .active_stages()
            .iter()
            .filter(|s| self.completed_steps.contains(s))
            .count();
        ((done as f64 / total as f64) * 100.0).round() as u32
    }

    /// Minutes between start and completion (or `now` while in progress).
    pub fn time_spent_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.completed_at.unwrap_or(now);
        (end - self.started_at).num_minutes().max(0)
    }

    /// Weighted final grade: pre-test 30%, post-test 70%. Missing scores
    /// count as zero.
    pub fn final_grade(&self, course_id: &str) -> u32 {
        let pre = self
            .quiz_scores
            .get(&quiz_key(course_id, true))
            .map(|q| q.score)
            .unwrap_or(0) as f64;
        let post = self
            .quiz_scores
            .get(&quiz_key(course_id, false))
            .map(|q| q.score)
            .unwrap_or(0) as f64;
        (pre * PRETEST_GRADE_WEIGHT + post * POSTTEST_GRADE_WEIGHT).round() as u32
    }

    /// blake3 hash of the serialized record, used to skip redundant
    /// replication pushes.
    pub fn content_hash(&self) -> PassageResult<String> {
        let serialized = serde_json::to_string(self)?;
        Ok(blake3::hash(serialized.as_bytes()).to_hex().to_string())
    }
}
