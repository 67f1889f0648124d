//! Pure stage-gate derivation. Given a progress snapshot and the admin
//! lock map, computes a display status per stage. No state, no I/O.

use std::collections::BTreeSet;

use passage_core::config::{BacktrackPolicy, GateConfig};
use passage_core::errors::GateError;
use passage_core::models::{CourseConfig, StageAccessMap, StageId, StageStatus};

/// The slice of a progress record the gate needs.
#[derive(Debug, Clone, Copy)]
pub struct GateSnapshot<'a> {
    pub current_step: StageId,
    pub completed_steps: &'a BTreeSet<StageId>,
    pub is_course_completed: bool,
}

/// Status of one stage. Precedence, highest wins:
/// admin-locked, completed, current, available, locked.
pub fn stage_status(
    course: &CourseConfig,
    stage: StageId,
    snapshot: &GateSnapshot<'_>,
    access: &StageAccessMap,
    config: &GateConfig,
) -> StageStatus {
    // Admin lock strictly overrides everything, completed stages included.
    if let Some(a) = access.get(&stage) {
        if !a.can_access {
            return StageStatus::AdminLocked {
                message: a.lock_message.clone(),
            };
        }
    }

    if snapshot.completed_steps.contains(&stage) {
        return StageStatus::Completed;
    }
    if stage == snapshot.current_step {
        return StageStatus::Current;
    }

    let stages = course.active_stages();
    let Some(index) = stages.iter().position(|s| *s == stage) else {
        return StageStatus::Locked;
    };

    if index == 0 || snapshot.is_course_completed {
        return StageStatus::Available;
    }
    if snapshot.completed_steps.contains(&stages[index - 1]) {
        return StageStatus::Available;
    }
    // Backtrack: any position at or before the current stage unlocks,
    // completed or not, when the forgiving policy is active.
    if config.backtrack == BacktrackPolicy::PositionBased {
        if let Some(current_index) = stages.iter().position(|s| *s == snapshot.current_step) {
            if index <= current_index {
                return StageStatus::Available;
            }
        }
    }

    StageStatus::Locked
}

/// Statuses for every active stage, in course order.
pub fn stage_statuses(
    course: &CourseConfig,
    snapshot: &GateSnapshot<'_>,
    access: &StageAccessMap,
    config: &GateConfig,
) -> Vec<(StageId, StageStatus)> {
    course
        .active_stages()
        .into_iter()
        .map(|stage| {
            let status = stage_status(course, stage, snapshot, access, config);
            (stage, status)
        })
        .collect()
}

/// Click contract: activating a locked or admin-locked stage is rejected
/// with the corresponding message and must not mutate `current_step`.
pub fn select_stage(
    course: &CourseConfig,
    stage: StageId,
    snapshot: &GateSnapshot<'_>,
    access: &StageAccessMap,
    config: &GateConfig,
) -> Result<(), GateError> {
    if course.ordinal(stage).is_none() {
        return Err(GateError::UnknownStage { stage });
    }
    match stage_status(course, stage, snapshot, access, config) {
        StageStatus::AdminLocked { message } => Err(GateError::AdminLocked { stage, message }),
        StageStatus::Locked => Err(GateError::StageLocked {
            stage,
            message: format!("complete the previous stage before opening {stage}"),
        }),
        _ => Ok(()),
    }
}
