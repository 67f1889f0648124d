//! End-to-end persistence: records and cached certificates survive an
//! engine reopen, and upserts are true overwrites.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use passage_core::models::{
    quiz_key, Certificate, CertificateStatus, ProgressRecord, QuizScore, StageId,
};
use passage_core::traits::{CertificateCache, ProgressRepository};
use passage_storage::StorageEngine;

fn sample_record() -> ProgressRecord {
    let now = Utc.with_ymd_and_hms(2025, 4, 10, 8, 30, 0).unwrap();
    let mut record = ProgressRecord::new(now);
    record.current_step = StageId::Lessons;
    record.completed_steps.insert(StageId::Intro);
    record.completed_steps.insert(StageId::PreTest);
    record.quiz_scores.insert(
        quiz_key("c1", true),
        QuizScore {
            score: 75,
            attempts: 1,
            completed_at: now,
        },
    );
    record
}

fn sample_certificate(id: &str, user_id: &str) -> Certificate {
    Certificate {
        id: id.into(),
        course_id: "c1".into(),
        user_id: user_id.into(),
        user_name: "Learner".into(),
        certificate_number: format!("PSG-{id}"),
        completion_date: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        grade: 88,
        status: CertificateStatus::Pending,
        rejection_reason: None,
    }
}

#[test]
fn fresh_database_has_no_record() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get("u1", "c1").unwrap().is_none());
    assert!(ProgressRepository::list_for_user(&engine, "u1")
        .unwrap()
        .is_empty());
}

#[test]
fn put_then_get_roundtrips() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let record = sample_record();
    engine.put("u1", "c1", &record).unwrap();
    let loaded = engine.get("u1", "c1").unwrap().unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn upsert_overwrites_existing_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut record = sample_record();
    engine.put("u1", "c1", &record).unwrap();

    record.completed_steps.insert(StageId::Lessons);
    record.current_step = StageId::PostTest;
    engine.put("u1", "c1", &record).unwrap();

    let loaded = engine.get("u1", "c1").unwrap().unwrap();
    assert_eq!(loaded.current_step, StageId::PostTest);
    assert!(loaded.completed_steps.contains(&StageId::Lessons));
    // Still a single row for the (user, course) pair.
    assert_eq!(
        ProgressRepository::list_for_user(&engine, "u1").unwrap().len(),
        1
    );
}

#[test]
fn records_are_scoped_per_user_and_course() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.put("u1", "c1", &sample_record()).unwrap();
    engine.put("u1", "c2", &sample_record()).unwrap();
    engine.put("u2", "c1", &sample_record()).unwrap();

    let courses: Vec<String> = ProgressRepository::list_for_user(&engine, "u1")
        .unwrap()
        .into_iter()
        .map(|(course_id, _)| course_id)
        .collect();
    assert_eq!(courses, vec!["c1".to_string(), "c2".to_string()]);
    assert!(engine.get("u2", "c2").unwrap().is_none());
}

#[test]
fn delete_removes_only_the_target() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.put("u1", "c1", &sample_record()).unwrap();
    engine.put("u1", "c2", &sample_record()).unwrap();

    engine.delete("u1", "c1").unwrap();
    assert!(engine.get("u1", "c1").unwrap().is_none());
    assert!(engine.get("u1", "c2").unwrap().is_some());

    // Deleting a missing row is not an error.
    engine.delete("u1", "c1").unwrap();
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passage.db");
    let record = sample_record();

    {
        let engine = StorageEngine::open(&path).unwrap();
        engine.put("u1", "c1", &record).unwrap();
        engine
            .replace_for_user("u1", &[sample_certificate("cert-1", "u1")])
            .unwrap();
    }

    let engine = StorageEngine::open(&path).unwrap();
    assert_eq!(engine.get("u1", "c1").unwrap().unwrap(), record);
    let certs = CertificateCache::list_for_user(&engine, "u1").unwrap();
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0].id, "cert-1");
}

#[test]
fn certificate_cache_replace_is_total() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .replace_for_user(
            "u1",
            &[
                sample_certificate("cert-1", "u1"),
                sample_certificate("cert-2", "u1"),
            ],
        )
        .unwrap();
    engine
        .replace_for_user("u2", &[sample_certificate("cert-3", "u2")])
        .unwrap();

    // A replace swaps out the user's whole set, other users untouched.
    engine
        .replace_for_user("u1", &[sample_certificate("cert-9", "u1")])
        .unwrap();
    let u1 = CertificateCache::list_for_user(&engine, "u1").unwrap();
    assert_eq!(u1.len(), 1);
    assert_eq!(u1[0].id, "cert-9");
    assert_eq!(CertificateCache::list_for_user(&engine, "u2").unwrap().len(), 1);

    // An empty replace clears the cache.
    engine.replace_for_user("u1", &[]).unwrap();
    assert!(CertificateCache::list_for_user(&engine, "u1").unwrap().is_empty());
}

#[test]
fn certificate_fields_roundtrip_through_cache() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut cert = sample_certificate("cert-1", "u1");
    cert.status = CertificateStatus::Rejected;
    cert.rejection_reason = Some("name mismatch".into());
    engine.replace_for_user("u1", std::slice::from_ref(&cert)).unwrap();

    let loaded = &CertificateCache::list_for_user(&engine, "u1").unwrap()[0];
    assert_eq!(loaded.status, CertificateStatus::Rejected);
    assert_eq!(loaded.rejection_reason.as_deref(), Some("name mismatch"));
    assert_eq!(loaded.grade, 88);
}
