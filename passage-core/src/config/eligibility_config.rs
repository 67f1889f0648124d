use serde::{Deserialize, Serialize};

use super::defaults;

/// Certificate eligibility configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Aggregate progress (percent) at which eligibility flips true.
    pub threshold_percent: f64,
    /// Debounce before the auto-request fires once eligibility holds.
    pub request_delay_secs: u64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            threshold_percent: defaults::DEFAULT_ELIGIBILITY_THRESHOLD_PERCENT,
            request_delay_secs: defaults::DEFAULT_CERTIFICATE_REQUEST_DELAY_SECS,
        }
    }
}
