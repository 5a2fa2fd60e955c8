/**
 * Error Conversion
 *
 * This module converts backend errors and request-body rejections into HTTP
 * responses.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side failures are logged here with full detail before the
    /// generic message is sent.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    /// Malformed or non-JSON bodies become a 400 in the usual error shape
    fn from(rejection: JsonRejection) -> Self {
        BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("Invalid JSON body: {}", rejection.body_text()),
        )
    }
}

impl From<QueryRejection> for BackendError {
    /// Unparseable query strings become a 400 in the usual error shape
    fn from(rejection: QueryRejection) -> Self {
        BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("Invalid query string: {}", rejection.body_text()),
        )
    }
}
