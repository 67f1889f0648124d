use crate::errors::PassageResult;
use crate::models::{Certificate, ProgressRecord};

/// Explicit repository interface for progress records. Replaces the
/// original's string-concatenated storage keys: namespacing by
/// `(user_id, course_id)` is the repository's problem, not the caller's.
pub trait ProgressRepository: Send + Sync {
    fn get(&self, user_id: &str, course_id: &str) -> PassageResult<Option<ProgressRecord>>;
    /// Upsert. The full record is written every time (no partial updates).
    fn put(&self, user_id: &str, course_id: &str, record: &ProgressRecord) -> PassageResult<()>;
    fn delete(&self, user_id: &str, course_id: &str) -> PassageResult<()>;
    /// All records for a learner, one per enrolled course.
    fn list_for_user(&self, user_id: &str) -> PassageResult<Vec<(String, ProgressRecord)>>;
}

/// Local read-through cache of backend-owned certificates.
pub trait CertificateCache: Send + Sync {
    /// Replace the cached set for a learner with the backend's list.
    fn replace_for_user(&self, user_id: &str, certificates: &[Certificate]) -> PassageResult<()>;
    fn list_for_user(&self, user_id: &str) -> PassageResult<Vec<Certificate>>;
}
