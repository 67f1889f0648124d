//! Shared models for the learner journey, serialized with serde throughout.

mod certificate;
mod course;
mod enrollment;
mod progress_record;
mod stage;
mod stage_access;
mod submission;
mod survey;
mod sync;

pub use certificate::{Certificate, CertificateStatus};
pub use course::CourseConfig;
pub use enrollment::Enrollment;
pub use progress_record::{quiz_key, LessonProgress, LessonProgressUpdate, ProgressRecord, QuizScore};
pub use stage::{StageId, StageStatus};
pub use stage_access::{StageAccess, StageAccessMap};
pub use submission::{AttachmentRef, Submission, SubmissionContent, SubmissionStage, Submissions};
pub use survey::SurveyFeedback;
pub use sync::{CourseAggregate, LessonProgressPayload, ProgressSyncPayload};
