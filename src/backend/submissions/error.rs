/**
 * Submission Errors
 *
 * Outcomes of a submission operation other than success. Validation, not
 * found, and forbidden are expected results surfaced to the caller as-is.
 * Persistence failures carry internal detail that is logged but not shown
 * to clients.
 */

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::backend::storage::StoreError;
use crate::shared::SharedError;

/// Errors returned by `SubmissionService`
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Missing or malformed input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// No submission carries the requested ID
    #[error("Submission with ID {unique_id} not found.")]
    NotFound {
        /// The ID that was looked up
        unique_id: i64,
    },

    /// The editing deadline has passed
    #[error("The editing deadline has passed. Submissions can no longer be updated.")]
    Forbidden {
        /// The configured deadline
        deadline: DateTime<Utc>,
    },

    /// Sequence allocation or store write failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl SubmissionError {
    /// Create a new validation error for a single field
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }
}
