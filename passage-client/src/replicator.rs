//! Replicator: best-effort push of progress snapshots to the backend.
//!
//! Skips pushes whose content hash matches the last accepted one, queues
//! snapshots on network failure, and replays the queue before the next
//! push. Non-network errors propagate; the caller decides what is
//! terminal.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use passage_core::errors::{PassageError, PassageResult};
use passage_core::models::{Certificate, LessonProgressPayload, ProgressSyncPayload};
use passage_core::traits::{CertificateCache, ProgressTransport};
use passage_progress::store::{ReplicationEvent, ReplicationHook};

use crate::offline::OfflineQueue;

/// Outcome of a snapshot push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicationOutcome {
    /// The backend accepted the snapshot.
    Synced,
    /// Content hash unchanged since the last accepted push.
    Skipped,
    /// Network failure; the snapshot waits in the offline queue.
    Queued,
}

pub struct Replicator {
    transport: Arc<dyn ProgressTransport>,
    queue: OfflineQueue,
    last_pushed_hash: Option<String>,
}

impl Replicator {
    pub fn new(transport: Arc<dyn ProgressTransport>, max_queue_len: usize) -> Self {
        Self {
            transport,
            queue: OfflineQueue::new(max_queue_len),
            last_pushed_hash: None,
        }
    }

    /// Push a full snapshot. Replays any queued snapshots first; a network
    /// failure anywhere parks the remainder (and this snapshot) in the
    /// queue and reports `Queued` instead of an error.
    pub fn push_snapshot(
        &mut self,
        payload: &ProgressSyncPayload,
    ) -> PassageResult<ReplicationOutcome> {
        if self.last_pushed_hash.as_deref() == Some(payload.content_hash.as_str()) {
            return Ok(ReplicationOutcome::Skipped);
        }

        // Replay queued snapshots, oldest first.
        if self.queue.has_pending() {
            let queued = self.queue.drain();
            tracing::info!("sync: replaying {} queued snapshots", queued.len());
            for (i, entry) in queued.iter().enumerate() {
                match self.transport.sync_progress(&entry.payload) {
                    Ok(()) => {}
                    Err(e) if e.is_network() => {
                        // Park the unreplayed remainder plus the current payload.
                        for rest in &queued[i..] {
                            self.queue.enqueue(rest.payload.clone(), rest.queued_at);
                        }
                        self.queue.enqueue(payload.clone(), Utc::now());
                        tracing::warn!("sync: backend unreachable during replay: {e}");
                        return Ok(ReplicationOutcome::Queued);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        match self.transport.sync_progress(payload) {
            Ok(()) => {
                self.last_pushed_hash = Some(payload.content_hash.clone());
                Ok(ReplicationOutcome::Synced)
            }
            Err(e) if e.is_network() => {
                tracing::warn!("sync: backend unreachable, queueing snapshot: {e}");
                self.queue.enqueue(payload.clone(), Utc::now());
                Ok(ReplicationOutcome::Queued)
            }
            Err(e) => Err(e),
        }
    }

    /// Incremental lesson progress. Fire-and-forget from the store's point
    /// of view; errors propagate to the hook, which logs them.
    pub fn push_lesson(&self, payload: &LessonProgressPayload) -> PassageResult<()> {
        self.transport.update_lesson_progress(payload)
    }

    /// Fetch the learner's certificates and refresh the local cache.
    pub fn refresh_certificates(
        &self,
        cache: &dyn CertificateCache,
        user_id: &str,
    ) -> PassageResult<Vec<Certificate>> {
        let certificates = self.transport.fetch_certificates()?;
        cache.replace_for_user(user_id, &certificates)?;
        Ok(certificates)
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    pub fn transport(&self) -> &Arc<dyn ProgressTransport> {
        &self.transport
    }
}

/// Adapt a shared replicator into the store's replication hook.
pub fn replication_hook(replicator: Arc<Mutex<Replicator>>) -> ReplicationHook {
    Box::new(move |event: &ReplicationEvent| -> PassageResult<()> {
        let mut guard = replicator.lock().map_err(|_| PassageError::Config {
            reason: "replicator mutex poisoned".to_string(),
        })?;
        match event {
            ReplicationEvent::Snapshot(payload) => {
                guard.push_snapshot(payload)?;
                Ok(())
            }
            ReplicationEvent::Lesson(payload) => guard.push_lesson(payload),
        }
    })
}
