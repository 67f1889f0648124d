use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use passage_core::models::{quiz_key, CourseConfig, ProgressRecord, QuizScore, StageId};

const ALL_STAGES: [StageId; 6] = [
    StageId::Intro,
    StageId::PreTest,
    StageId::Lessons,
    StageId::PostTest,
    StageId::PostWork,
    StageId::FinalProject,
];

fn arb_record() -> impl Strategy<Value = ProgressRecord> {
    (
        proptest::sample::subsequence(ALL_STAGES.to_vec(), 0..=6),
        0u32..=100,
        0u32..=100,
        1u32..=5,
    )
        .prop_map(|(steps, pre, post, attempts)| {
            let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
            let mut record = ProgressRecord::new(now);
            record.completed_steps = steps.into_iter().collect::<BTreeSet<_>>();
            record.quiz_scores.insert(
                quiz_key("c1", true),
                QuizScore {
                    score: pre,
                    attempts,
                    completed_at: now,
                },
            );
            record.quiz_scores.insert(
                quiz_key("c1", false),
                QuizScore {
                    score: post,
                    attempts: 1,
                    completed_at: now,
                },
            );
            record
        })
}

proptest! {
    #[test]
    fn roundtrip_preserves_record(record in arb_record()) {
        let json = serde_json::to_string(&record).unwrap();
        let back: ProgressRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &record);
        // Ordered collections make re-serialization byte-stable.
        prop_assert_eq!(serde_json::to_string(&back).unwrap(), json);
        prop_assert_eq!(back.content_hash().unwrap(), record.content_hash().unwrap());
    }

    #[test]
    fn completion_percent_is_bounded(record in arb_record()) {
        let course = CourseConfig {
            id: "c1".into(),
            title: "t".into(),
            has_post_work: true,
            has_final_project: true,
            certificate_delivery: None,
        };
        let pct = record.completion_percent(&course);
        prop_assert!(pct <= 100);
        if record.is_course_completed(&course) {
            prop_assert_eq!(pct, 100);
        }
    }

    #[test]
    fn final_grade_is_bounded_by_inputs(record in arb_record()) {
        let grade = record.final_grade("c1");
        let pre = record.quiz_scores[&quiz_key("c1", true)].score;
        let post = record.quiz_scores[&quiz_key("c1", false)].score;
        prop_assert!(grade <= pre.max(post));
        prop_assert!(grade >= pre.min(post).saturating_sub(1));
    }
}
