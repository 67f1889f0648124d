//! Gate invariants over arbitrary progress states.

use std::collections::BTreeSet;

use proptest::prelude::*;

use passage_core::config::{BacktrackPolicy, GateConfig};
use passage_core::models::{CourseConfig, StageAccess, StageAccessMap, StageId, StageStatus};
use passage_progress::{stage_status, stage_statuses, GateSnapshot};

const ALL_STAGES: [StageId; 6] = [
    StageId::Intro,
    StageId::PreTest,
    StageId::Lessons,
    StageId::PostTest,
    StageId::PostWork,
    StageId::FinalProject,
];

fn full_course() -> CourseConfig {
    CourseConfig {
        id: "c1".into(),
        title: "Course".into(),
        has_post_work: true,
        has_final_project: true,
        certificate_delivery: None,
    }
}

fn arb_state() -> impl Strategy<Value = (StageId, BTreeSet<StageId>)> {
    (
        proptest::sample::select(ALL_STAGES.to_vec()),
        proptest::sample::subsequence(ALL_STAGES.to_vec(), 0..=6),
    )
        .prop_map(|(current, steps)| (current, steps.into_iter().collect()))
}

fn arb_locks() -> impl Strategy<Value = StageAccessMap> {
    proptest::sample::subsequence(ALL_STAGES.to_vec(), 0..=6).prop_map(|locked| {
        locked
            .into_iter()
            .map(|stage| (stage, StageAccess::locked("maintenance")))
            .collect()
    })
}

proptest! {
    /// An admin lock wins over every progress state, completed included.
    #[test]
    fn admin_locked_stages_are_never_selectable(
        (current, completed) in arb_state(),
        locks in arb_locks(),
    ) {
        let course = full_course();
        let done = ALL_STAGES.iter().all(|s| completed.contains(s));
        let snap = GateSnapshot {
            current_step: current,
            completed_steps: &completed,
            is_course_completed: done,
        };
        let config = GateConfig::default();
        for (stage, _) in &locks {
            let status = stage_status(&course, *stage, &snap, &locks, &config);
            prop_assert!(
                matches!(status, StageStatus::AdminLocked { .. }),
                "expected AdminLocked, got {:?}",
                status
            );
            prop_assert!(!status.is_selectable());
        }
    }

    /// With the course completed and no admin locks, nothing is locked.
    #[test]
    fn completed_course_has_no_locked_stage((current, _) in arb_state()) {
        let course = full_course();
        let completed: BTreeSet<StageId> = ALL_STAGES.into_iter().collect();
        let snap = GateSnapshot {
            current_step: current,
            completed_steps: &completed,
            is_course_completed: true,
        };
        let access = StageAccessMap::new();
        for (_, status) in stage_statuses(&course, &snap, &access, &GateConfig::default()) {
            prop_assert_ne!(status, StageStatus::Locked);
        }
    }

    /// Position-based backtrack never locks a stage at or before the
    /// current position.
    #[test]
    fn backtrack_opens_everything_up_to_current((current, completed) in arb_state()) {
        let course = full_course();
        let done = ALL_STAGES.iter().all(|s| completed.contains(s));
        let snap = GateSnapshot {
            current_step: current,
            completed_steps: &completed,
            is_course_completed: done,
        };
        let access = StageAccessMap::new();
        let config = GateConfig { backtrack: BacktrackPolicy::PositionBased };
        let current_index = course.ordinal(current).unwrap();
        for stage in course.active_stages().into_iter().take(current_index + 1) {
            let status = stage_status(&course, stage, &snap, &access, &config);
            prop_assert_ne!(status, StageStatus::Locked);
        }
    }

    /// The strict policy is at least as restrictive as the forgiving one.
    #[test]
    fn strict_policy_never_unlocks_more((current, completed) in arb_state()) {
        let course = full_course();
        let done = ALL_STAGES.iter().all(|s| completed.contains(s));
        let snap = GateSnapshot {
            current_step: current,
            completed_steps: &completed,
            is_course_completed: done,
        };
        let access = StageAccessMap::new();
        let lax = GateConfig { backtrack: BacktrackPolicy::PositionBased };
        let strict = GateConfig { backtrack: BacktrackPolicy::CompletedPrefixOnly };
        for stage in course.active_stages() {
            let lax_status = stage_status(&course, stage, &snap, &access, &lax);
            let strict_status = stage_status(&course, stage, &snap, &access, &strict);
            if strict_status == StageStatus::Available {
                prop_assert_eq!(lax_status, StageStatus::Available);
            }
        }
    }
}
