use crate::models::StageId;

/// Stage-gating rejections. These block the action client-side and
/// never reach the network.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("stage {stage} is locked: {message}")]
    StageLocked { stage: StageId, message: String },

    #[error("stage {stage} is locked by an administrator: {message}")]
    AdminLocked { stage: StageId, message: String },

    #[error("stage {stage} is not part of this course")]
    UnknownStage { stage: StageId },
}
