//! Storage Module
//!
//! This module defines the two persistence capabilities the submission
//! service depends on, and their implementations.
//!
//! # Capabilities
//!
//! - **`SequenceAllocator`** - hands out increasing integers per named
//!   counter; each call is a single atomic increment-and-fetch
//! - **`SubmissionStore`** - create, find, and patch submissions by their
//!   sequential `unique_id`
//!
//! # Implementations
//!
//! ```text
//! storage/
//! ├── mod.rs          - Traits, record types, StoreError
//! ├── sequence.rs     - PostgreSQL counters table
//! ├── submissions.rs  - PostgreSQL submissions table
//! └── memory.rs       - In-process implementation of both traits
//! ```
//!
//! Neither capability validates field content. That is the service's job.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::shared::{SubmissionFields, SubmissionPatch, SubmissionView};

/// PostgreSQL sequence allocator
pub mod sequence;

/// PostgreSQL submission store
pub mod submissions;

/// In-memory store
pub mod memory;

pub use memory::MemoryStore;
pub use sequence::PgSequenceAllocator;
pub use submissions::PgSubmissionStore;

/// Errors raised by a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or connection failure reported by sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store could not be reached or refused the operation
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },
}

impl StoreError {
    /// Create a new unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A submission ready to be written for the first time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub unique_id: i64,
    pub fields: SubmissionFields,
    pub created_at: DateTime<Utc>,
}

/// A submission as persisted, including store-generated metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    /// Row identity assigned by the store
    pub id: i64,
    /// Sequential identifier, immutable once written
    pub unique_id: i64,
    pub fields: SubmissionFields,
    /// Creation time, immutable once written
    pub created_at: DateTime<Utc>,
    /// Time of the last write
    pub updated_at: DateTime<Utc>,
}

impl StoredSubmission {
    /// Project onto the fields the edit form needs
    pub fn view(&self) -> SubmissionView {
        SubmissionView {
            unique_id: self.unique_id,
            fields: self.fields.clone(),
            created_at: self.created_at,
        }
    }
}

/// Source of per-name increasing integers
///
/// Implementations must make `next_value` a single atomic step: concurrent
/// callers using the same name never observe the same value. A name with no
/// counter yet starts from 0, so the first call returns 1.
#[async_trait]
pub trait SequenceAllocator: Send + Sync {
    /// Increment the counter `name` and return its new value
    async fn next_value(&self, name: &str) -> Result<i64, StoreError>;
}

/// Persistence for submission records keyed by `unique_id`
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Write a new record and return it with its generated metadata
    async fn create(&self, record: NewSubmission) -> Result<StoredSubmission, StoreError>;

    /// Exact lookup by `unique_id`; `Ok(None)` when nothing matches
    async fn find_by_unique_id(&self, unique_id: i64)
        -> Result<Option<StoredSubmission>, StoreError>;

    /// Merge `patch` into the record and return the post-update state
    ///
    /// `unique_id` and `created_at` are never changed. `Ok(None)` when
    /// nothing matches.
    async fn update_by_unique_id(
        &self,
        unique_id: i64,
        patch: &SubmissionPatch,
    ) -> Result<Option<StoredSubmission>, StoreError>;
}
