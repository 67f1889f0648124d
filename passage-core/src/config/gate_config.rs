use serde::{Deserialize, Serialize};

/// How far back a learner may navigate without having completed the
/// intervening stages.
///
/// The original system unlocked every stage at or before the current
/// position as a side effect of an index comparison. Here that laxity is
/// an explicit, named choice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BacktrackPolicy {
    /// Any stage at or before the current position is available, completed
    /// or not. Forgiving review-anything behavior.
    #[default]
    PositionBased,
    /// Only stages whose predecessor is completed unlock. Strict gating.
    CompletedPrefixOnly,
}

/// Stage-gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub backtrack: BacktrackPolicy,
}
