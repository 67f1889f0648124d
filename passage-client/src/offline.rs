//! In-memory queue of sync payloads that could not reach the backend.
//! Drained and replayed on the next successful connection.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use passage_core::models::ProgressSyncPayload;

/// A payload waiting for the backend to come back.
#[derive(Debug, Clone)]
pub struct QueuedSync {
    pub payload: ProgressSyncPayload,
    pub queued_at: DateTime<Utc>,
}

/// Bounded FIFO. When full, the oldest entry is dropped, since each payload is
/// a full snapshot, so losing an old one loses nothing the newer ones
/// don't carry.
#[derive(Debug)]
pub struct OfflineQueue {
    items: VecDeque<QueuedSync>,
    max_len: usize,
}

impl OfflineQueue {
    pub fn new(max_len: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_len,
        }
    }

    pub fn enqueue(&mut self, payload: ProgressSyncPayload, now: DateTime<Utc>) {
        if self.items.len() >= self.max_len {
            self.items.pop_front();
            tracing::warn!("offline queue full, dropped oldest snapshot");
        }
        self.items.push_back(QueuedSync {
            payload,
            queued_at: now,
        });
    }

    /// Take everything, oldest first.
    pub fn drain(&mut self) -> Vec<QueuedSync> {
        self.items.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
