//! StoreRegistry: concurrent per-(user, course) store access via DashMap,
//! for surfaces that hold several courses open at once (the enrollments
//! dashboard).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use passage_core::config::{GateConfig, SyncConfig};
use passage_core::errors::PassageResult;
use passage_core::models::{CourseConfig, ProgressRecord};
use passage_core::traits::ProgressRepository;

use crate::store::ProgressStore;

/// Thread-safe registry of open progress stores.
pub struct StoreRegistry {
    repository: Arc<dyn ProgressRepository>,
    sync_config: SyncConfig,
    gate_config: GateConfig,
    stores: DashMap<(String, String), ProgressStore>,
}

impl StoreRegistry {
    pub fn new(
        repository: Arc<dyn ProgressRepository>,
        sync_config: SyncConfig,
        gate_config: GateConfig,
    ) -> Self {
        Self {
            repository,
            sync_config,
            gate_config,
            stores: DashMap::new(),
        }
    }

    /// Open (or re-open) the store for a course. If the store was already
    /// open, pending deferred edits are flushed before it is replaced.
    /// Replication hooks are per-store, so registry-opened stores persist
    /// locally only.
    pub fn open_store(
        &self,
        user_id: &str,
        course: CourseConfig,
        now: DateTime<Utc>,
    ) -> PassageResult<()> {
        let key = (user_id.to_string(), course.id.clone());
        if let Some(mut existing) = self.stores.get_mut(&key) {
            existing.flush(now)?;
        }
        let store = ProgressStore::open(
            Arc::clone(&self.repository),
            course,
            user_id,
            &self.sync_config,
            self.gate_config.clone(),
            None,
            now,
        )?;
        self.stores.insert(key, store);
        Ok(())
    }

    /// Run a closure against an open store. Returns `None` if the store
    /// was never opened.
    pub fn with_store<F, T>(&self, user_id: &str, course_id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut ProgressStore) -> T,
    {
        let key = (user_id.to_string(), course_id.to_string());
        self.stores.get_mut(&key).map(|mut entry| f(&mut entry))
    }

    /// Snapshot of an open store's record.
    pub fn record_snapshot(&self, user_id: &str, course_id: &str) -> Option<ProgressRecord> {
        self.with_store(user_id, course_id, |store| store.record().clone())
    }

    /// Close a store, dropping its in-memory state (the repository retains
    /// the persisted record).
    pub fn close_store(&self, user_id: &str, course_id: &str) -> bool {
        let key = (user_id.to_string(), course_id.to_string());
        self.stores.remove(&key).is_some()
    }

    pub fn open_count(&self) -> usize {
        self.stores.len()
    }
}
