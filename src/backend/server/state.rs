/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` trait so handlers can extract only the service they need.
 *
 * # Thread Safety
 *
 * The service is shared behind an `Arc`. It holds no mutable state of its
 * own; concurrency control lives in the backing store.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::submissions::SubmissionService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Submission workflow
    pub submissions: Arc<SubmissionService>,

    /// Public origin for edit links, when it differs from the request host
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(submissions: Arc<SubmissionService>, public_base_url: Option<String>) -> Self {
        Self {
            submissions,
            public_base_url,
        }
    }
}

/// Implement FromRef for the submission service
///
/// This allows handlers to extract `State(Arc<SubmissionService>)` directly.
impl FromRef<AppState> for Arc<SubmissionService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.submissions.clone()
    }
}
