/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised by handlers before the service is called:
 * - Malformed JSON bodies
 * - Missing query parameters or body fields
 * - Unknown routes
 *
 * ## Submission Errors
 *
 * Raised by `SubmissionService` and mapped onto status codes:
 * - Validation → 400
 * - Not found → 404
 * - Deadline passed → 403
 * - Persistence → 500, with a generic message
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::submissions::SubmissionError;

/// Message returned to clients for internal failures
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred while processing the request.";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use abstract_submissions::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Unique ID is required in the query parameters.");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing parameters, invalid request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Error returned by the submission service
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new 400 handler error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Submission(err) => match err {
                SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
                SubmissionError::NotFound { .. } => StatusCode::NOT_FOUND,
                SubmissionError::Forbidden { .. } => StatusCode::FORBIDDEN,
                SubmissionError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Client-facing message
    ///
    /// Internal failures are reduced to a generic message; the detail stays
    /// in the server log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Submission(SubmissionError::Persistence(_)) => INTERNAL_ERROR_MESSAGE.to_string(),
            Self::Submission(err) => err.to_string(),
        }
    }
}
