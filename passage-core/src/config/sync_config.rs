use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence and replication timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Quiet period before a deferred persist flushes (form-field edits).
    pub deferred_persist_quiet_secs: u64,
    /// Interval of the periodic auto-save flush.
    pub auto_save_interval_secs: u64,
    /// Cap on the offline replication queue.
    pub max_offline_queue_len: usize,
    /// HTTP request timeout.
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            deferred_persist_quiet_secs: defaults::DEFAULT_DEFERRED_PERSIST_QUIET_SECS,
            auto_save_interval_secs: defaults::DEFAULT_AUTO_SAVE_INTERVAL_SECS,
            max_offline_queue_len: defaults::DEFAULT_MAX_OFFLINE_QUEUE_LEN,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
