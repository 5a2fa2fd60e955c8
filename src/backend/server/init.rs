/**
 * Server Initialization
 *
 * This module wires the production services together and builds the router.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations (fatal on failure)
 * 2. Build the SMTP notifier (fatal if the sender or admin address is invalid)
 * 3. Check mail connectivity (logged only)
 * 4. Assemble `SubmissionService` and `AppState`
 * 5. Create the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::notify::{mailbox, NotificationDispatcher, NotifyError, SmtpNotifier};
use crate::backend::routes::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::storage::{PgSequenceAllocator, PgSubmissionStore};
use crate::backend::submissions::{SubmissionService, SubmissionSettings};

const MAIL_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    /// Database unreachable
    #[error("Failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migrations failed
    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Mail transport could not be configured
    #[error("Failed to configure mail transport: {0}")]
    Mail(#[from] NotifyError),
}

/// Connect to the database and bring the schema up to date
pub async fn connect_database(database_url: &str) -> Result<PgPool, InitError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Log whether the mail relay accepts our credentials
///
/// Never fails startup. Sends still run per request either way.
async fn check_mail_readiness(notifier: &SmtpNotifier) {
    match tokio::time::timeout(MAIL_CHECK_TIMEOUT, notifier.verify()).await {
        Ok(Ok(true)) => tracing::info!("Mail transport is ready to send emails"),
        Ok(Ok(false)) => tracing::error!("Mail transport check failed: relay refused connection"),
        Ok(Err(e)) => tracing::error!("Mail transport check failed: {}", e),
        Err(_) => tracing::error!(
            "Mail transport check timed out after {}s",
            MAIL_CHECK_TIMEOUT.as_secs()
        ),
    }
}

/// Reject an admin address that no alert could ever be delivered to
fn check_admin_address(admin_email: &str) -> Result<(), InitError> {
    mailbox(admin_email)?;
    Ok(())
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Any `InitError` is fatal: the caller should exit rather than serve
/// requests against a missing database or mail configuration.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing submission server");

    let pool = connect_database(&config.database_url).await?;

    check_admin_address(&config.admin_email)?;
    let notifier = SmtpNotifier::new(&config.smtp_host, &config.email_user, &config.email_pass)?;
    check_mail_readiness(&notifier).await;

    let service = SubmissionService::new(
        Arc::new(PgSequenceAllocator::new(pool.clone())),
        Arc::new(PgSubmissionStore::new(pool)),
        NotificationDispatcher::new(Arc::new(notifier)),
        SubmissionSettings {
            edit_deadline: config.edit_deadline,
            admin_email: config.admin_email.clone(),
        },
    );
    tracing::info!("Editing deadline is {}", config.edit_deadline);

    let app_state = AppState::new(Arc::new(service), config.public_base_url.clone());
    let app = create_router(app_state, &config.static_dir);

    tracing::info!("Router configured");
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_address_checked() {
        assert!(check_admin_address("admin@example.com").is_ok());
        assert!(matches!(
            check_admin_address("not an address"),
            Err(InitError::Mail(NotifyError::Address { .. }))
        ));
    }
}
