use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::StageId;

/// The two stages that accept submissions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStage {
    #[serde(rename = "postwork")]
    PostWork,
    #[serde(rename = "finalproject")]
    FinalProject,
}

impl SubmissionStage {
    pub fn stage_id(self) -> StageId {
        match self {
            SubmissionStage::PostWork => StageId::PostWork,
            SubmissionStage::FinalProject => StageId::FinalProject,
        }
    }
}

/// Typed submission content, a per-kind struct rather than a JSON blob.
/// Serialized as a tagged enum so the kind is preserved in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionContent {
    Text { body: String },
    Link { url: String },
    Upload { file_name: String },
}

/// Opaque handle into the backend blob store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachmentRef {
    pub file_id: String,
    pub file_name: String,
    pub size_bytes: u64,
}

/// A single submission envelope. Saving a new one for the same stage
/// replaces this wholesale (one submission, editable).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub content: SubmissionContent,
    #[serde(default)]
    pub attachment: Option<AttachmentRef>,
    pub submitted_at: DateTime<Utc>,
}

/// Per-stage submission slots. One field per stage that accepts work,
/// so required fields are covered at compile time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Submissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_work: Option<Submission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_project: Option<Submission>,
}

impl Submissions {
    pub fn get(&self, stage: SubmissionStage) -> Option<&Submission> {
        match stage {
            SubmissionStage::PostWork => self.post_work.as_ref(),
            SubmissionStage::FinalProject => self.final_project.as_ref(),
        }
    }

    /// Overwrite the slot for a stage, returning the previous envelope.
    pub fn replace(&mut self, stage: SubmissionStage, submission: Submission) -> Option<Submission> {
        match stage {
            SubmissionStage::PostWork => self.post_work.replace(submission),
            SubmissionStage::FinalProject => self.final_project.replace(submission),
        }
    }
}
