//! Backend Module
//!
//! This module contains all server-side code for the abstract submission
//! service: an Axum HTTP server backed by PostgreSQL with SMTP notifications.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly, static files, CORS, tracing
//! - **`submissions`** - Handlers, workflow service, edit page
//! - **`storage`** - Sequence allocator and submission store
//! - **`notify`** - Email composition and best-effort delivery
//! - **`error`** - HTTP error type and response conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── submissions/    - Submission workflow
//! ├── storage/        - Persistence
//! ├── notify/         - Email notifications
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Domain errors (`SharedError`, `SubmissionError`) convert into
//! `BackendError`, which renders as `{"error": ..., "status": ...}`.
//! Notification failures are logged and never reach the client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Submission handlers and workflow
pub mod submissions;

/// Persistence
pub mod storage;

/// Email notifications
pub mod notify;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
