use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stage::StageId;

/// Admin lock state for one stage. Authoritative and independent of learner
/// progress: even a completed stage can be subsequently admin-locked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageAccess {
    pub can_access: bool,
    #[serde(default)]
    pub lock_message: String,
}

impl StageAccess {
    pub fn open() -> Self {
        Self {
            can_access: true,
            lock_message: String::new(),
        }
    }

    pub fn locked(message: impl Into<String>) -> Self {
        Self {
            can_access: false,
            lock_message: message.into(),
        }
    }
}

impl Default for StageAccess {
    fn default() -> Self {
        Self::open()
    }
}

/// Per-stage lock state for a course. A missing entry means accessible.
pub type StageAccessMap = BTreeMap<StageId, StageAccess>;
