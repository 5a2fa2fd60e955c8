/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * (optionally seeded from a `.env` file by `main`).
 *
 * # Variables
 *
 * | Variable          | Required | Default          |
 * |-------------------|----------|------------------|
 * | `DATABASE_URL`    | yes      |                  |
 * | `EMAIL_USER`      | yes      |                  |
 * | `EMAIL_PASS`      | yes      |                  |
 * | `ADMIN_EMAIL`     | yes      |                  |
 * | `EDIT_DEADLINE`   | yes      |                  |
 * | `PORT`            | no       | `3000`           |
 * | `SMTP_HOST`       | no       | `smtp.gmail.com` |
 * | `PUBLIC_BASE_URL` | no       | request host     |
 * | `STATIC_DIR`      | no       | `public`         |
 *
 * # Error Handling
 *
 * Unlike per-request failures, configuration errors are fatal: a missing
 * store connection string or mail credential stops the process at startup.
 */

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {message}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// What was wrong with it
        message: String,
    },
}

/// Parse an editing deadline
///
/// Accepts an RFC 3339 timestamp, or a `YYYY-MM-DD` date meaning editing is
/// allowed through the end of that day (UTC).
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{}'", raw))?;
    date.succ_opt()
        .and_then(|next_day| next_day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("date out of range: '{}'", raw))
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub smtp_host: String,
    /// SMTP login, also used as the sender address
    pub email_user: String,
    pub email_pass: String,
    pub admin_email: String,
    /// Instant from which updates are rejected
    pub edit_deadline: DateTime<Utc>,
    pub port: u16,
    /// Overrides the request host when building edit links
    pub public_base_url: Option<String>,
    pub static_dir: PathBuf,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("email_user", &self.email_user)
            .field("email_pass", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("edit_deadline", &self.edit_deadline)
            .field("port", &self.port)
            .field("public_base_url", &self.public_base_url)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let edit_deadline = parse_deadline(&required("EDIT_DEADLINE")?).map_err(|message| {
            ConfigError::Invalid {
                name: "EDIT_DEADLINE",
                message,
            }
        })?;

        let port = match optional("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            smtp_host: optional("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            email_user: required("EMAIL_USER")?,
            email_pass: required("EMAIL_PASS")?,
            admin_email: required("ADMIN_EMAIL")?,
            edit_deadline,
            port,
            public_base_url: optional("PUBLIC_BASE_URL"),
            static_dir: optional("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
        })
    }
}
