/**
 * In-Memory Store
 *
 * `MemoryStore` implements both `SequenceAllocator` and `SubmissionStore`
 * with process-local state. It follows the same contracts as the PostgreSQL
 * implementations: counters start at 0 and the first allocation returns 1,
 * `unique_id` is unique, and patches never touch `unique_id` or `created_at`.
 *
 * # Thread Safety
 *
 * Counters and submissions sit behind separate `tokio::sync::Mutex`es. An
 * allocation holds the counter lock for the whole read-increment-write, which
 * is what makes it atomic.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::backend::storage::{
    NewSubmission, SequenceAllocator, StoreError, StoredSubmission, SubmissionStore,
};
use crate::shared::SubmissionPatch;

#[derive(Debug, Default)]
struct SubmissionTable {
    next_row_id: i64,
    rows: HashMap<i64, StoredSubmission>,
}

/// Process-local store for tests and single-instance runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    counters: Arc<Mutex<HashMap<String, i64>>>,
    submissions: Arc<Mutex<SubmissionTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter without incrementing it
    pub async fn current_value(&self, name: &str) -> i64 {
        self.counters.lock().await.get(name).copied().unwrap_or(0)
    }

    /// Number of stored submissions
    pub async fn len(&self) -> usize {
        self.submissions.lock().await.rows.len()
    }

    /// True when no submissions are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SequenceAllocator for MemoryStore {
    async fn next_value(&self, name: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().await;
        let value = counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(&self, record: NewSubmission) -> Result<StoredSubmission, StoreError> {
        let mut table = self.submissions.lock().await;
        if table.rows.contains_key(&record.unique_id) {
            return Err(StoreError::unavailable(format!(
                "duplicate unique_id {}",
                record.unique_id
            )));
        }

        table.next_row_id += 1;
        let stored = StoredSubmission {
            id: table.next_row_id,
            unique_id: record.unique_id,
            fields: record.fields,
            created_at: record.created_at,
            updated_at: record.created_at,
        };
        table.rows.insert(stored.unique_id, stored.clone());
        Ok(stored)
    }

    async fn find_by_unique_id(
        &self,
        unique_id: i64,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        Ok(self.submissions.lock().await.rows.get(&unique_id).cloned())
    }

    async fn update_by_unique_id(
        &self,
        unique_id: i64,
        patch: &SubmissionPatch,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        let mut table = self.submissions.lock().await;
        let Some(stored) = table.rows.get_mut(&unique_id) else {
            return Ok(None);
        };
        patch.apply_to(&mut stored.fields);
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }
}
