use serde::{Deserialize, Serialize};

use super::stage::StageId;

/// Admin-authored course configuration. External to the progress record;
/// decides which optional stages exist for a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub has_post_work: bool,
    #[serde(default)]
    pub has_final_project: bool,
    /// How certificates are delivered for this course (backend-defined
    /// label, e.g. "email" or "download"). Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_delivery: Option<String>,
}

impl CourseConfig {
    /// The ordered stage list for this course. The first four stages are
    /// always present; post-work and final project are conditional.
    pub fn active_stages(&self) -> Vec<StageId> {
        let mut stages = vec![
            StageId::Intro,
            StageId::PreTest,
            StageId::Lessons,
            StageId::PostTest,
        ];
        if self.has_post_work {
            stages.push(StageId::PostWork);
        }
        if self.has_final_project {
            stages.push(StageId::FinalProject);
        }
        stages
    }

    /// Position of a stage in the active list, if it is part of this course.
    pub fn ordinal(&self, stage: StageId) -> Option<usize> {
        self.active_stages().iter().position(|s| *s == stage)
    }
}
