//! Shared Error Types
//!
//! This module defines the input errors produced while turning a raw request
//! body into submission fields. They are independent of the HTTP layer and the
//! backing store.
//!
//! # Error Categories
//!
//! - `MissingFields` - One or more required fields were absent or blank
//! - `ValidationError` - A field was present but its value was rejected
//!
//! # Usage
//!
//! ```rust
//! use abstract_submissions::shared::error::SharedError;
//!
//! let error = SharedError::validation("abstractType", "expected 'technical-paper' or 'poster'");
//! assert!(error.to_string().contains("abstractType"));
//! ```
use thiserror::Error;

/// Errors raised while validating submission input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Required fields absent, non-string, or blank
    ///
    /// Field names are reported in canonical form order.
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Wire names of the missing fields
        fields: Vec<&'static str>,
    },

    /// Data validation error
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new missing-fields error
    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self::MissingFields { fields }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
