//! Submissions Module
//!
//! This module implements the abstract submission workflow: numbering and
//! storing new submissions, serving them back for editing, and accepting edits
//! until the editing deadline.
//!
//! # Module Structure
//!
//! ```text
//! submissions/
//! ├── mod.rs        - Module exports and documentation
//! ├── service.rs    - SubmissionService (validation, IDs, deadline, email)
//! ├── handlers.rs   - Axum handlers for /, /submit, /edit, /update
//! ├── edit_page.rs  - Server-rendered edit form
//! └── error.rs      - SubmissionError
//! ```
//!
//! # Lifecycle
//!
//! A submission is created by `submit`, may be edited any number of times by
//! `update` until the deadline, and is locked afterwards. Nothing deletes it.

/// Submission workflow
pub mod service;

/// HTTP handlers
pub mod handlers;

/// HTML edit form
pub mod edit_page;

/// Submission error types
pub mod error;

pub use error::SubmissionError;
pub use service::{SubmissionService, SubmissionSettings, SubmitReceipt, SUBMISSION_SEQUENCE};
