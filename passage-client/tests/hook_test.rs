//! End-to-end: store mutations flow through the replication hook into the
//! transport, and an offline backend never fails a local mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use passage_core::config::{GateConfig, SyncConfig};
use passage_core::errors::{ApiError, PassageResult};
use passage_core::models::{
    AttachmentRef, Certificate, CourseAggregate, CourseConfig, Enrollment, LessonProgressPayload,
    ProgressSyncPayload, StageAccessMap, StageId, SurveyFeedback,
};
use passage_core::traits::{ProgressRepository, ProgressTransport};
use passage_client::replicator::{replication_hook, Replicator};
use passage_progress::{AutoSaveStatus, ProgressStore};
use passage_storage::StorageEngine;

#[derive(Default)]
struct CountingTransport {
    offline: AtomicBool,
    snapshots: Mutex<usize>,
    lessons: Mutex<usize>,
}

impl CountingTransport {
    fn check_online(&self) -> PassageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network {
                reason: "offline".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl ProgressTransport for CountingTransport {
    fn sync_progress(&self, _payload: &ProgressSyncPayload) -> PassageResult<()> {
        self.check_online()?;
        *self.snapshots.lock().unwrap() += 1;
        Ok(())
    }

    fn update_lesson_progress(&self, _payload: &LessonProgressPayload) -> PassageResult<()> {
        self.check_online()?;
        *self.lessons.lock().unwrap() += 1;
        Ok(())
    }

    fn fetch_course_progress(&self, course_id: &str) -> PassageResult<CourseAggregate> {
        self.check_online()?;
        Ok(CourseAggregate {
            course_id: course_id.into(),
            overall_progress: 0.0,
        })
    }

    fn fetch_enrollments(&self) -> PassageResult<Vec<Enrollment>> {
        self.check_online()?;
        Ok(Vec::new())
    }

    fn fetch_stage_access(&self, _course_id: &str) -> PassageResult<StageAccessMap> {
        self.check_online()?;
        Ok(StageAccessMap::new())
    }

    fn request_certificate(&self, _course_id: &str) -> PassageResult<()> {
        self.check_online()
    }

    fn fetch_certificates(&self) -> PassageResult<Vec<Certificate>> {
        self.check_online()?;
        Ok(Vec::new())
    }

    fn submit_survey(&self, _feedback: &SurveyFeedback) -> PassageResult<()> {
        self.check_online()
    }

    fn upload_file(&self, file_name: &str, bytes: &[u8]) -> PassageResult<AttachmentRef> {
        self.check_online()?;
        Ok(AttachmentRef {
            file_id: "f-1".into(),
            file_name: file_name.into(),
            size_bytes: bytes.len() as u64,
        })
    }

    fn fetch_file(&self, _file_id: &str) -> PassageResult<Vec<u8>> {
        self.check_online()?;
        Ok(Vec::new())
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap()
}

fn open_store(transport: Arc<CountingTransport>) -> (ProgressStore, Arc<Mutex<Replicator>>) {
    let repo: Arc<dyn ProgressRepository> = Arc::new(StorageEngine::open_in_memory().unwrap());
    let replicator = Arc::new(Mutex::new(Replicator::new(transport, 8)));
    let store = ProgressStore::open(
        repo,
        CourseConfig {
            id: "c1".into(),
            title: "Course".into(),
            has_post_work: false,
            has_final_project: false,
            certificate_delivery: None,
        },
        "u1",
        &SyncConfig::default(),
        GateConfig::default(),
        Some(replication_hook(replicator.clone())),
        t0(),
    )
    .unwrap();
    (store, replicator)
}

#[test]
fn mutations_replicate_through_the_hook() {
    let transport = Arc::new(CountingTransport::default());
    let (mut store, _replicator) = open_store(transport.clone());

    store.mark_step_completed(StageId::Intro, t0()).unwrap();
    store.mark_step_completed(StageId::PreTest, t0()).unwrap();
    assert_eq!(*transport.snapshots.lock().unwrap(), 2);
}

#[test]
fn offline_backend_queues_without_failing_local_saves() {
    let transport = Arc::new(CountingTransport::default());
    let (mut store, replicator) = open_store(transport.clone());

    transport.offline.store(true, Ordering::SeqCst);
    store.mark_step_completed(StageId::Intro, t0()).unwrap();
    // The local save succeeded even though the backend is down.
    assert_eq!(store.auto_save_status(), AutoSaveStatus::Saved);
    assert_eq!(replicator.lock().unwrap().queued_len(), 1);
    assert_eq!(*transport.snapshots.lock().unwrap(), 0);

    // Recovery: the queued snapshot replays ahead of the next one.
    transport.offline.store(false, Ordering::SeqCst);
    store.mark_step_completed(StageId::PreTest, t0()).unwrap();
    assert_eq!(*transport.snapshots.lock().unwrap(), 2);
    assert_eq!(replicator.lock().unwrap().queued_len(), 0);
}
