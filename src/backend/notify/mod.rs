//! Notification Module
//!
//! This module sends the emails that accompany submissions: a confirmation to
//! the submitter, an alert to the conference admin, and an update notice after
//! an edit.
//!
//! # Architecture
//!
//! - **`Notifier`** - one delivery attempt for one message
//! - **`smtp`** - `Notifier` over an SMTP relay (lettre)
//! - **`dispatcher`** - best-effort wrapper that logs and swallows failures
//! - **`messages`** - subject and body text for each notification
//!
//! # Delivery Semantics
//!
//! Notifications never decide the outcome of a request. Once a submission is
//! persisted, a failed email is logged and the request still succeeds. There
//! are no retries.

use async_trait::async_trait;
use thiserror::Error;

/// Best-effort dispatcher
pub mod dispatcher;

/// Notification text
pub mod messages;

/// SMTP transport
pub mod smtp;

pub use dispatcher::NotificationDispatcher;
pub use smtp::{mailbox, SmtpNotifier};

/// A plain-text email to a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Errors raised while delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Sender or recipient is not a valid mailbox
    #[error("Invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled
    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP relay rejected or dropped the message
    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Any other delivery failure
    #[error("Delivery failed: {message}")]
    Delivery {
        /// Human-readable error message
        message: String,
    },
}

impl NotifyError {
    /// Create a new delivery error
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// A channel that can deliver one email per call
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt delivery exactly once
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;
}
