/**
 * Submission Service
 *
 * Orchestrates the three submission operations over the storage and
 * notification capabilities.
 *
 * # Submit
 *
 * 1. Sanitize the raw body
 * 2. Validate the nine required fields (no ID is allocated on failure)
 * 3. Allocate `uniqueID` from the `submissionID` sequence
 * 4. Persist with a creation timestamp
 * 5. Build the edit link from the caller's origin
 * 6. Notify submitter and admin concurrently, best effort
 *
 * An ID allocated in step 3 is consumed even if step 4 fails, so stored IDs
 * may have gaps. Allocation is never retried with the same value.
 *
 * # Update
 *
 * The deadline is checked before the store is touched. Once it passes, every
 * update is rejected.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::backend::notify::{messages, NotificationDispatcher};
use crate::backend::storage::{NewSubmission, SequenceAllocator, SubmissionStore};
use crate::backend::submissions::error::SubmissionError;
use crate::shared::{sanitize_value, SubmissionFields, SubmissionPatch, SubmissionView};

/// Sequence that submission IDs are drawn from
pub const SUBMISSION_SEQUENCE: &str = "submissionID";

/// Deployment settings the service needs
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    /// Instant from which updates are rejected
    pub edit_deadline: DateTime<Utc>,
    /// Recipient of new-submission alerts
    pub admin_email: String,
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub unique_id: i64,
    pub edit_link: String,
}

/// Edit link for a submission, rooted at `origin` (`scheme://host`)
pub fn edit_link(origin: &str, unique_id: i64) -> String {
    format!("{}/edit?id={}", origin.trim_end_matches('/'), unique_id)
}

/// Parse a client-supplied submission ID
pub fn parse_unique_id(raw: &str) -> Result<i64, SubmissionError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SubmissionError::invalid("id", "Unique ID must be an integer."))
}

/// Submission workflow over pluggable storage and notification
pub struct SubmissionService {
    sequences: Arc<dyn SequenceAllocator>,
    store: Arc<dyn SubmissionStore>,
    notifications: NotificationDispatcher,
    settings: SubmissionSettings,
}

impl SubmissionService {
    pub fn new(
        sequences: Arc<dyn SequenceAllocator>,
        store: Arc<dyn SubmissionStore>,
        notifications: NotificationDispatcher,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            sequences,
            store,
            notifications,
            settings,
        }
    }

    pub fn edit_deadline(&self) -> DateTime<Utc> {
        self.settings.edit_deadline
    }

    /// Whether updates are accepted at `now`
    pub fn is_editing_open(&self, now: DateTime<Utc>) -> bool {
        now < self.settings.edit_deadline
    }

    /// Validate, number, store, and announce a new submission
    ///
    /// # Errors
    ///
    /// * `SubmissionError::Validation` - required fields missing or invalid
    /// * `SubmissionError::Persistence` - allocation or write failed
    pub async fn submit(
        &self,
        mut raw: Value,
        origin: &str,
    ) -> Result<SubmitReceipt, SubmissionError> {
        let removed = sanitize_value(&mut raw);
        if removed > 0 {
            tracing::warn!("Stripped {} operator-like keys from submission body", removed);
        }

        let fields = SubmissionFields::from_json(&raw)?;

        let unique_id = self.sequences.next_value(SUBMISSION_SEQUENCE).await?;

        let record = NewSubmission {
            unique_id,
            fields,
            created_at: Utc::now(),
        };
        let stored = self.store.create(record).await.map_err(|e| {
            tracing::error!("Submission ID {} was allocated but not stored: {}", unique_id, e);
            e
        })?;

        tracing::info!(
            "Stored submission {} from {}",
            stored.unique_id,
            stored.fields.submitter_email
        );

        let edit_link = edit_link(origin, unique_id);
        tokio::join!(
            self.notifications.dispatch(messages::confirmation(
                &stored.fields,
                unique_id,
                &edit_link,
                self.settings.edit_deadline,
            )),
            self.notifications.dispatch(messages::admin_alert(
                &stored.fields,
                unique_id,
                &self.settings.admin_email,
            )),
        );

        Ok(SubmitReceipt {
            unique_id,
            edit_link,
        })
    }

    /// Look up a submission for the edit form
    ///
    /// # Errors
    ///
    /// * `SubmissionError::NotFound` - no submission with this ID
    /// * `SubmissionError::Persistence` - lookup failed
    pub async fn fetch(&self, unique_id: i64) -> Result<SubmissionView, SubmissionError> {
        let stored = self
            .store
            .find_by_unique_id(unique_id)
            .await?
            .ok_or(SubmissionError::NotFound { unique_id })?;

        Ok(stored.view())
    }

    /// Apply an edit before the deadline
    ///
    /// `raw_patch` is the client's `updatedData` object. Identity fields in
    /// it are ignored.
    ///
    /// # Errors
    ///
    /// * `SubmissionError::Forbidden` - the editing deadline has passed
    /// * `SubmissionError::Validation` - the patch is malformed or empty
    /// * `SubmissionError::NotFound` - no submission with this ID
    /// * `SubmissionError::Persistence` - the write failed
    pub async fn update(
        &self,
        unique_id: i64,
        mut raw_patch: Value,
    ) -> Result<SubmissionView, SubmissionError> {
        let removed = sanitize_value(&mut raw_patch);
        if removed > 0 {
            tracing::warn!(
                "Stripped {} operator-like keys from update of submission {}",
                removed,
                unique_id
            );
        }

        if !self.is_editing_open(Utc::now()) {
            tracing::warn!("Rejected update of submission {} after deadline", unique_id);
            return Err(SubmissionError::Forbidden {
                deadline: self.settings.edit_deadline,
            });
        }

        let patch = SubmissionPatch::from_json(&raw_patch)?;

        let stored = self
            .store
            .update_by_unique_id(unique_id, &patch)
            .await?
            .ok_or(SubmissionError::NotFound { unique_id })?;

        tracing::info!("Updated submission {}", unique_id);

        self.notifications
            .dispatch(messages::update_notice(&stored.fields, unique_id))
            .await;

        Ok(stored.view())
    }
}
