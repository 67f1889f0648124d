use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Post-test survey feedback payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyFeedback {
    pub course_id: String,
    /// Question key to rating.
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
    #[serde(default)]
    pub comments: String,
}
