//! Shared Module
//!
//! This module contains the types and input handling that do not depend on
//! the HTTP server or the backing store: the submission data model, the
//! sanitizer applied to incoming JSON, and the validation errors.
//!
//! # Overview
//!
//! Everything here is synchronous and side-effect free, so it can be unit
//! tested in isolation and reused by any front end that speaks the same
//! JSON shape.

/// Submission data model and field validation
pub mod submission;

/// Query-operator sanitization of request bodies
pub mod sanitize;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use sanitize::sanitize_value;
pub use submission::{
    AbstractType, SubmissionFields, SubmissionPatch, SubmissionView, REQUIRED_FIELDS,
};
