/// Passage system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire protocol version for backend requests.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Quiet period before a deferred persist is flushed (form-field edits).
pub const DEFERRED_PERSIST_QUIET_SECS: u64 = 2;

/// Interval for the periodic auto-save flush.
pub const AUTO_SAVE_INTERVAL_SECS: u64 = 30;

/// Delay before an eligibility-triggered certificate request fires.
pub const CERTIFICATE_REQUEST_DELAY_SECS: u64 = 5;

/// Aggregate progress (percent) required for certificate eligibility.
pub const ELIGIBILITY_THRESHOLD_PERCENT: f64 = 100.0;

/// Weight of the pre-test score in the final grade.
pub const PRETEST_GRADE_WEIGHT: f64 = 0.3;

/// Weight of the post-test score in the final grade.
pub const POSTTEST_GRADE_WEIGHT: f64 = 0.7;

/// Maximum number of sync payloads held in the offline queue.
pub const MAX_OFFLINE_QUEUE_LEN: usize = 256;
