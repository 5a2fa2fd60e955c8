/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines all
 * routes and middleware into a single Axum router.
 *
 * # Route Order
 *
 * 1. Submission routes (`/`, `/submit`, `/edit`, `/update`)
 * 2. Static files under `/static`
 * 3. Fallback handler (404 JSON error)
 *
 * Every response passes through the CORS and request-tracing layers.
 */

use std::path::Path;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::submissions::handlers::{edit, health, submit, update};

/// Fallback for unknown routes
async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the submission service
/// * `static_dir` - Directory served under `/static`
///
/// # Route Details
///
/// - `GET /` - Liveness text
/// - `POST /submit` - Create a submission
/// - `GET /edit?id=N` - Fetch a submission for editing
/// - `POST /update` - Edit a submission before the deadline
pub fn create_router(app_state: AppState, static_dir: impl AsRef<Path>) -> Router<()> {
    Router::new()
        .route("/", get(health))
        .route("/submit", post(submit))
        .route("/edit", get(edit))
        .route("/update", post(update))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        // Submission forms are hosted on a separate site
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use crate::backend::notify::{NotificationDispatcher, Notifier, NotifyError, OutgoingEmail};
    use crate::backend::storage::MemoryStore;
    use crate::backend::submissions::{SubmissionService, SubmissionSettings};

    struct Discard;

    #[async_trait]
    impl Notifier for Discard {
        async fn send(&self, _email: &OutgoingEmail) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn router() -> Router<()> {
        let store = MemoryStore::new();
        let service = SubmissionService::new(
            Arc::new(store.clone()),
            Arc::new(store),
            NotificationDispatcher::new(Arc::new(Discard)),
            SubmissionSettings {
                edit_deadline: Utc::now() + Duration::days(1),
                admin_email: "admin@example.com".into(),
            },
        );
        create_router(AppState::new(Arc::new(service), None), "public")
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/submit")
            .header(header::ORIGIN, "https://conference.example.org")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_fallback_is_not_found() {
        let request = Request::builder()
            .uri("/does-not-exist")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_static_file_is_not_found() {
        let request = Request::builder()
            .uri("/static/missing.css")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
