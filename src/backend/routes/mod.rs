//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Routes
//!
//! - `GET /` - Liveness text
//! - `POST /submit` - Create a submission
//! - `GET /edit?id=N` - Fetch a submission (JSON or HTML form)
//! - `POST /update` - Edit a submission before the deadline
//! - `GET /static/*` - Static assets
//!
//! Handlers live in `backend::submissions::handlers`.

/// Main router creation
pub mod router;

// Re-export commonly used functions
pub use router::create_router;
