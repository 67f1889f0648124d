//! ProgressStore: load, mutate, and persist one learner's progress for
//! one course, with best-effort replication to the backend.
//!
//! The repository write is synchronous and authoritative for the session.
//! Replication happens through an optional hook; its failures are logged
//! and swallowed; the backend copy is eventually consistent.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use passage_core::config::{GateConfig, SyncConfig};
use passage_core::errors::{GateError, PassageResult};
use passage_core::models::{
    quiz_key, CourseConfig, LessonProgressPayload, LessonProgressUpdate, ProgressRecord,
    ProgressSyncPayload, QuizScore, StageAccessMap, StageId, StageStatus, Submission,
    SubmissionStage,
};
use passage_core::traits::ProgressRepository;

use crate::debounce::Debouncer;
use crate::gate::{self, GateSnapshot};

/// Observable auto-save indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    /// The local write failed. No retry loop: the next mutator call
    /// re-attempts the persist.
    Error,
}

/// What the store hands to the replication layer.
#[derive(Debug, Clone)]
pub enum ReplicationEvent {
    /// Full-record snapshot after a mutation.
    Snapshot(ProgressSyncPayload),
    /// Incremental lesson progress carrying a numeric percentage.
    Lesson(LessonProgressPayload),
}

/// Best-effort replication hook. Failures are the hook's to report;
/// the store only logs them.
pub type ReplicationHook = Box<dyn Fn(&ReplicationEvent) -> PassageResult<()> + Send + Sync>;

pub struct ProgressStore {
    user_id: String,
    course: CourseConfig,
    record: ProgressRecord,
    repository: Arc<dyn ProgressRepository>,
    hook: Option<ReplicationHook>,
    auto_save_status: AutoSaveStatus,
    deferred: Debouncer,
    deferred_dirty: bool,
    autosave: Debouncer,
    gate_config: GateConfig,
}

impl ProgressStore {
    /// Open the store for `(user, course)`. A missing record is initialized
    /// at the intro stage with `started_at = now` and written back
    /// immediately, so the first load is idempotent: loading again without
    /// mutation yields a byte-identical record.
    pub fn open(
        repository: Arc<dyn ProgressRepository>,
        course: CourseConfig,
        user_id: &str,
        sync_config: &SyncConfig,
        gate_config: GateConfig,
        hook: Option<ReplicationHook>,
        now: DateTime<Utc>,
    ) -> PassageResult<Self> {
        let record = match repository.get(user_id, &course.id)? {
            Some(existing) => existing,
            None => {
                let fresh = ProgressRecord::new(now);
                repository.put(user_id, &course.id, &fresh)?;
                tracing::info!(course = %course.id, "progress: initialized fresh record");
                fresh
            }
        };

        let mut autosave = Debouncer::new(sync_config.auto_save_interval_secs);
        autosave.touch(now);

        Ok(Self {
            user_id: user_id.to_string(),
            course,
            record,
            repository,
            hook,
            auto_save_status: AutoSaveStatus::Idle,
            deferred: Debouncer::new(sync_config.deferred_persist_quiet_secs),
            deferred_dirty: false,
            autosave,
            gate_config,
        })
    }

    // --- Reads ---

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn course(&self) -> &CourseConfig {
        &self.course
    }

    pub fn auto_save_status(&self) -> AutoSaveStatus {
        self.auto_save_status
    }

    pub fn is_course_completed(&self) -> bool {
        self.record.is_course_completed(&self.course)
    }

    fn snapshot(&self) -> GateSnapshot<'_> {
        GateSnapshot {
            current_step: self.record.current_step,
            completed_steps: &self.record.completed_steps,
            is_course_completed: self.record.is_course_completed(&self.course),
        }
    }

    /// Display status for every active stage.
    pub fn stage_statuses(&self, access: &StageAccessMap) -> Vec<(StageId, StageStatus)> {
        gate::stage_statuses(&self.course, &self.snapshot(), access, &self.gate_config)
    }

    // --- Mutators (each persists) ---

    /// Add a stage to the completed set. Re-adding is a no-op on the set
    /// (still persists, so callers see a consistent `Saved` status).
    pub fn mark_step_completed(&mut self, stage: StageId, now: DateTime<Utc>) -> PassageResult<()> {
        if self.course.ordinal(stage).is_none() {
            return Err(GateError::UnknownStage { stage }.into());
        }
        self.record.completed_steps.insert(stage);
        self.record.last_accessed = Some(now);
        self.persist(now)
    }

    /// Unconditional overwrite; no gating here by design. Callers wanting
    /// the click contract go through [`ProgressStore::try_select_stage`].
    pub fn set_current_step(&mut self, stage: StageId, now: DateTime<Utc>) -> PassageResult<()> {
        self.record.current_step = stage;
        self.record.last_accessed = Some(now);
        self.persist(now)
    }

    /// Gate-checked navigation: rejects locked and admin-locked stages
    /// without mutating `current_step`.
    pub fn try_select_stage(
        &mut self,
        stage: StageId,
        access: &StageAccessMap,
        now: DateTime<Utc>,
    ) -> PassageResult<()> {
        gate::select_stage(
            &self.course,
            stage,
            &self.snapshot(),
            access,
            &self.gate_config,
        )?;
        self.set_current_step(stage, now)
    }

    /// Merge a partial update into one lesson's entry: fields present in
    /// the update overwrite the stored values, absent fields are left
    /// alone. `total_time_spent_secs` is re-derived as the sum across
    /// lessons. When the update carries a progress percentage, an
    /// incremental payload also goes to the replication hook.
    pub fn update_lesson_progress(
        &mut self,
        lesson_index: u32,
        update: LessonProgressUpdate,
        now: DateTime<Utc>,
    ) -> PassageResult<()> {
        let entry = self.record.lesson_progress.entry(lesson_index).or_default();
        if let Some(completed) = update.completed {
            entry.completed = completed;
        }
        if let Some(secs) = update.time_spent_secs {
            entry.time_spent_secs = secs;
        }
        if let Some(percent) = update.progress_percent {
            entry.progress_percent = Some(percent);
        }
        entry.last_accessed = Some(now);
        self.record.last_accessed = Some(now);
        self.record.total_time_spent_secs = self
            .record
            .lesson_progress
            .values()
            .map(|l| l.time_spent_secs)
            .sum();
        self.persist(now)?;

        if let Some(percent) = update.progress_percent {
            let payload = LessonProgressPayload {
                course_id: self.course.id.clone(),
                lesson_index,
                progress_percent: percent,
                time_spent_secs: update.time_spent_secs.unwrap_or(0),
            };
            self.replicate(&ReplicationEvent::Lesson(payload));
        }
        Ok(())
    }

    /// Record a quiz score under `pretest_<id>` / `posttest_<id>`,
    /// incrementing the attempt counter. Scores are stored as given.
    pub fn save_quiz_score(
        &mut self,
        quiz_id: &str,
        score: u32,
        is_pre_test: bool,
        now: DateTime<Utc>,
    ) -> PassageResult<()> {
        let key = quiz_key(quiz_id, is_pre_test);
        let attempts = self
            .record
            .quiz_scores
            .get(&key)
            .map(|q| q.attempts)
            .unwrap_or(0)
            + 1;
        self.record.quiz_scores.insert(
            key,
            QuizScore {
                score,
                attempts,
                completed_at: now,
            },
        );
        self.record.last_accessed = Some(now);
        self.persist(now)
    }

    /// Overwrite the submission slot for a stage wholesale: one submission,
    /// editable. Rejected when the course does not have that stage.
    pub fn save_submission(
        &mut self,
        stage: SubmissionStage,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> PassageResult<()> {
        if self.course.ordinal(stage.stage_id()).is_none() {
            return Err(GateError::UnknownStage {
                stage: stage.stage_id(),
            }
            .into());
        }
        self.record.submissions.replace(stage, submission);
        self.record.last_accessed = Some(now);
        self.persist(now)
    }

    /// Stamp `completed_at`. Does not verify stage completeness; callers
    /// check `is_course_completed` first.
    pub fn mark_course_completed(&mut self, now: DateTime<Utc>) -> PassageResult<()> {
        self.record.completed_at = Some(now);
        self.record.last_accessed = Some(now);
        self.persist(now)
    }

    /// Delete and re-initialize (restart the course).
    pub fn reset(&mut self, now: DateTime<Utc>) -> PassageResult<()> {
        self.repository.delete(&self.user_id, &self.course.id)?;
        self.record = ProgressRecord::new(now);
        self.repository
            .put(&self.user_id, &self.course.id, &self.record)?;
        self.auto_save_status = AutoSaveStatus::Saved;
        Ok(())
    }

    // --- Deferred persistence ---

    /// Note a change that should persist after a quiet period instead of
    /// immediately (per-keystroke form fields).
    pub fn defer_persist(&mut self, now: DateTime<Utc>) {
        self.deferred_dirty = true;
        self.deferred.touch(now);
    }

    /// Drive deferred persistence and the periodic auto-save; call from
    /// the caller's event loop. Returns whether a flush happened.
    pub fn tick(&mut self, now: DateTime<Utc>) -> PassageResult<bool> {
        if self.deferred_dirty && self.deferred.ready(now) {
            self.deferred_dirty = false;
            self.deferred.reset();
            self.persist(now)?;
            return Ok(true);
        }
        if self.autosave.ready(now) {
            self.persist(now)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Persist immediately if a deferred change is still pending. Call
    /// before dropping or replacing a store so deferred edits are not lost.
    pub fn flush(&mut self, now: DateTime<Utc>) -> PassageResult<()> {
        if self.deferred_dirty {
            self.deferred_dirty = false;
            self.deferred.reset();
            self.persist(now)?;
        }
        Ok(())
    }

    // --- Persistence ---

    /// Synchronous repository write, then best-effort replication.
    /// Repository failure surfaces as `AutoSaveStatus::Error` and the error
    /// propagates; replication failure is logged and swallowed.
    fn persist(&mut self, now: DateTime<Utc>) -> PassageResult<()> {
        self.auto_save_status = AutoSaveStatus::Saving;
        if let Err(e) = self
            .repository
            .put(&self.user_id, &self.course.id, &self.record)
        {
            self.auto_save_status = AutoSaveStatus::Error;
            return Err(e);
        }
        self.auto_save_status = AutoSaveStatus::Saved;
        self.autosave.touch(now);

        match ProgressSyncPayload::from_record(&self.user_id, &self.course.id, &self.record, now) {
            Ok(payload) => self.replicate(&ReplicationEvent::Snapshot(payload)),
            Err(e) => tracing::warn!("progress: snapshot payload failed: {e}"),
        }
        Ok(())
    }

    fn replicate(&self, event: &ReplicationEvent) {
        if let Some(hook) = &self.hook {
            if let Err(e) = hook(event) {
                tracing::warn!(course = %self.course.id, "progress: replication failed: {e}");
            }
        }
    }
}
