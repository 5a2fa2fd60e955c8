//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - In-memory application setup behind `axum_test::TestServer`
//! - Recording and failing notifiers
//! - A store that fails every write
//! - Request body fixtures

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use abstract_submissions::backend::notify::{
    NotificationDispatcher, Notifier, NotifyError, OutgoingEmail,
};
use abstract_submissions::backend::routes::create_router;
use abstract_submissions::backend::server::AppState;
use abstract_submissions::backend::storage::{
    MemoryStore, NewSubmission, StoreError, StoredSubmission, SubmissionStore,
};
use abstract_submissions::backend::submissions::{SubmissionService, SubmissionSettings};
use abstract_submissions::shared::SubmissionPatch;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Notifier that records every email, optionally failing each send
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self
            .sent
            .lock()
            .await
            .iter()
            .map(|email| email.subject.clone())
            .collect();
        subjects.sort();
        subjects
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        self.sent.lock().await.push(email.clone());
        if self.fail {
            return Err(NotifyError::delivery("relay rejected message"));
        }
        Ok(())
    }
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn create(&self, _record: NewSubmission) -> Result<StoredSubmission, StoreError> {
        Err(StoreError::unavailable("disk full"))
    }

    async fn find_by_unique_id(
        &self,
        _unique_id: i64,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        Err(StoreError::unavailable("disk full"))
    }

    async fn update_by_unique_id(
        &self,
        _unique_id: i64,
        _patch: &SubmissionPatch,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        Err(StoreError::unavailable("disk full"))
    }
}

/// Everything a test may want to inspect after driving requests
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
    pub notifier: Arc<RecordingNotifier>,
}

fn router_for(service: SubmissionService) -> TestServer {
    let state = AppState::new(Arc::new(service), None);
    TestServer::new(create_router(state, "public")).expect("Failed to build test server")
}

fn settings(edit_deadline: DateTime<Utc>) -> SubmissionSettings {
    SubmissionSettings {
        edit_deadline,
        admin_email: ADMIN_EMAIL.to_string(),
    }
}

/// App over an in-memory store with the given deadline and notifier
pub fn app_with(edit_deadline: DateTime<Utc>, notifier: RecordingNotifier) -> TestApp {
    let store = MemoryStore::new();
    let notifier = Arc::new(notifier);
    let service = SubmissionService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        NotificationDispatcher::new(notifier.clone()),
        settings(edit_deadline),
    );

    TestApp {
        server: router_for(service),
        store,
        notifier,
    }
}

/// App whose editing window is open for another week
pub fn open_app() -> TestApp {
    app_with(Utc::now() + Duration::days(7), RecordingNotifier::default())
}

/// App whose editing window closed yesterday
pub fn closed_app() -> TestApp {
    app_with(Utc::now() - Duration::days(1), RecordingNotifier::default())
}

/// App whose submission store rejects every operation
///
/// Returns the server with the in-memory store that still allocates IDs.
pub fn broken_store_app() -> (TestServer, MemoryStore) {
    let sequences = MemoryStore::new();
    let service = SubmissionService::new(
        Arc::new(sequences.clone()),
        Arc::new(FailingStore),
        NotificationDispatcher::new(Arc::new(RecordingNotifier::default())),
        settings(Utc::now() + Duration::days(7)),
    );
    (router_for(service), sequences)
}

/// A complete, valid submission body
pub fn submission_body() -> Value {
    json!({
        "submitterName": "Ada Lovelace",
        "submitterEmail": "ada@example.com",
        "abstractTitle": "Analytical Engines in Practice",
        "abstractType": "technical-paper",
        "theme": "Computing",
        "company": "Babbage & Co",
        "discipline": "Mathematics",
        "authorNames": "Ada Lovelace, Charles Babbage",
        "abstractContent": "We describe the first published algorithm."
    })
}
