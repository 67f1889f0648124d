//! Default values shared by the config structs.

use crate::constants;

pub const DEFAULT_DEFERRED_PERSIST_QUIET_SECS: u64 = constants::DEFERRED_PERSIST_QUIET_SECS;
pub const DEFAULT_AUTO_SAVE_INTERVAL_SECS: u64 = constants::AUTO_SAVE_INTERVAL_SECS;
pub const DEFAULT_CERTIFICATE_REQUEST_DELAY_SECS: u64 = constants::CERTIFICATE_REQUEST_DELAY_SECS;
pub const DEFAULT_ELIGIBILITY_THRESHOLD_PERCENT: f64 = constants::ELIGIBILITY_THRESHOLD_PERCENT;
pub const DEFAULT_MAX_OFFLINE_QUEUE_LEN: usize = constants::MAX_OFFLINE_QUEUE_LEN;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
