use crate::errors::PassageResult;
use crate::models::{
    AttachmentRef, Certificate, CourseAggregate, Enrollment, LessonProgressPayload,
    ProgressSyncPayload, StageAccessMap, SurveyFeedback,
};

/// The REST contract exposed by the backend (spec'd, not implemented here).
/// The HTTP implementation lives in the client crate behind its `remote`
/// feature; tests substitute a mock.
pub trait ProgressTransport: Send + Sync {
    /// Replicate a full progress record. Full overwrite, last-writer-wins.
    fn sync_progress(&self, payload: &ProgressSyncPayload) -> PassageResult<()>;

    /// Incremental lesson completion.
    fn update_lesson_progress(&self, payload: &LessonProgressPayload) -> PassageResult<()>;

    /// Authoritative aggregate progress for a course.
    fn fetch_course_progress(&self, course_id: &str) -> PassageResult<CourseAggregate>;

    /// Enrolled courses with their aggregate progress.
    fn fetch_enrollments(&self) -> PassageResult<Vec<Enrollment>>;

    /// Admin lock state per stage.
    fn fetch_stage_access(&self, course_id: &str) -> PassageResult<StageAccessMap>;

    /// Request certificate issuance. The backend decides whether one is
    /// created; the client never fabricates a certificate.
    fn request_certificate(&self, course_id: &str) -> PassageResult<()>;

    /// The learner's certificates.
    fn fetch_certificates(&self) -> PassageResult<Vec<Certificate>>;

    /// Post-test survey feedback.
    fn submit_survey(&self, feedback: &SurveyFeedback) -> PassageResult<()>;

    /// Store a binary attachment; returns the opaque handle.
    fn upload_file(&self, file_name: &str, bytes: &[u8]) -> PassageResult<AttachmentRef>;

    /// Retrieve an attachment by its handle.
    fn fetch_file(&self, file_id: &str) -> PassageResult<Vec<u8>>;
}
