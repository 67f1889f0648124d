use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the learner journey. The last two are present only when the
/// owning [`CourseConfig`](super::CourseConfig) enables them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Intro,
    #[serde(rename = "pretest")]
    PreTest,
    Lessons,
    #[serde(rename = "posttest")]
    PostTest,
    #[serde(rename = "postwork")]
    PostWork,
    #[serde(rename = "finalproject")]
    FinalProject,
}

impl StageId {
    /// The wire string used in storage keys and quiz keys.
    pub fn key(self) -> &'static str {
        match self {
            StageId::Intro => "intro",
            StageId::PreTest => "pretest",
            StageId::Lessons => "lessons",
            StageId::PostTest => "posttest",
            StageId::PostWork => "postwork",
            StageId::FinalProject => "finalproject",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display status of a stage, derived by the stage gate.
/// Precedence: admin-locked > completed > current > available > locked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Forbidden by an administrator regardless of learner progress.
    AdminLocked { message: String },
    /// The learner has finished this stage.
    Completed,
    /// The stage the learner is currently on.
    Current,
    /// Reachable: first stage, prerequisite met, or permitted backtrack.
    Available,
    /// Prerequisites not met.
    Locked,
}

impl StageStatus {
    /// Whether activating a stage with this status is permitted.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, StageStatus::Locked | StageStatus::AdminLocked { .. })
    }
}
