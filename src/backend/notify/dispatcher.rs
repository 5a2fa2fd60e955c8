/**
 * Notification Dispatcher
 *
 * Wraps a `Notifier` so that delivery failures are logged and never
 * propagated. Every notification the service sends goes through here.
 */

use std::sync::Arc;

use crate::backend::notify::{Notifier, OutgoingEmail};

/// Best-effort email dispatch
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Send `email` once, logging the outcome
    ///
    /// Returns whether the notifier accepted the message. Callers are free to
    /// ignore the result.
    pub async fn dispatch(&self, email: OutgoingEmail) -> bool {
        match self.notifier.send(&email).await {
            Ok(()) => {
                tracing::info!("Sent '{}' notification to {}", email.subject, email.to);
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to send '{}' notification to {}: {}",
                    email.subject,
                    email.to,
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::notify::NotifyError;
    use async_trait::async_trait;

    struct Refusing;

    #[async_trait]
    impl Notifier for Refusing {
        async fn send(&self, _email: &OutgoingEmail) -> Result<(), NotifyError> {
            Err(NotifyError::delivery("relay down"))
        }
    }

    struct Accepting;

    #[async_trait]
    impl Notifier for Accepting {
        async fn send(&self, _email: &OutgoingEmail) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "a@x.com".into(),
            subject: "Submission Confirmation".into(),
            body: "hi".into(),
        }
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let dispatcher = NotificationDispatcher::new(Arc::new(Refusing));
        assert!(!dispatcher.dispatch(email()).await);
    }

    #[tokio::test]
    async fn test_success_reported() {
        let dispatcher = NotificationDispatcher::new(Arc::new(Accepting));
        assert!(dispatcher.dispatch(email()).await);
    }
}
