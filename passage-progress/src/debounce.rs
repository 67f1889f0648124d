//! Deterministic quiet-period primitive. No timers: callers feed `now`
//! into [`Debouncer::ready`] from their own event loop, so behavior is
//! fully testable with synthetic clocks.

use chrono::{DateTime, Duration, Utc};

/// Coalesces rapid repeated triggers into one action after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending_since: Option<DateTime<Utc>>,
}

impl Debouncer {
    pub fn new(quiet_secs: u64) -> Self {
        Self {
            quiet: Duration::seconds(quiet_secs as i64),
            pending_since: None,
        }
    }

    /// Register a trigger, restarting the quiet period. Use for
    /// per-keystroke style input where only the trailing edge matters.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.pending_since = Some(now);
    }

    /// Register a trigger without restarting an already-running period.
    /// Use for edge-triggered conditions (eligibility becoming true).
    pub fn arm(&mut self, now: DateTime<Utc>) {
        if self.pending_since.is_none() {
            self.pending_since = Some(now);
        }
    }

    /// Whether the quiet period has elapsed.
    pub fn ready(&self, now: DateTime<Utc>) -> bool {
        match self.pending_since {
            Some(since) => now - since >= self.quiet,
            None => false,
        }
    }

    /// Cancel the pending trigger.
    pub fn reset(&mut self) {
        self.pending_since = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}
