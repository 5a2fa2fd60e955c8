//! Abstract Submissions - Main Library
//!
//! Backend for a conference call for abstracts. Submitters send an abstract,
//! receive a sequential numeric ID and an edit link by email, and may revise
//! their submission until a configured deadline. Organizers are notified of
//! each new submission.
//!
//! # Module Structure
//!
//! - **`shared`** - Transport-independent types
//!   - Submission fields, patches, and views
//!   - Key sanitization for untrusted JSON
//!   - Validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and handlers
//!   - PostgreSQL storage via sqlx
//!   - SMTP notifications via lettre
//!
//! # Usage
//!
//! ```rust,no_run
//! use abstract_submissions::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types
pub mod shared;

/// Backend server code
pub mod backend;
