/**
 * Submission Handlers
 *
 * HTTP handlers for the submission endpoints. Handlers extract and check the
 * request shape, call `SubmissionService`, and format the response.
 *
 * # Routes
 *
 * - `GET /` - Liveness text
 * - `POST /submit` - Create a submission
 * - `GET /edit?id=N` - Fetch a submission (JSON, or HTML for browsers)
 * - `POST /update` - Edit a submission before the deadline
 */

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::submissions::edit_page::render_edit_page;
use crate::backend::submissions::service::{parse_unique_id, SubmissionService};
use crate::shared::SubmissionView;

/// Response body for a successful submit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    #[serde(rename = "uniqueID")]
    pub unique_id: i64,
}

/// Response body for a successful update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: String,
    pub updated_submission: SubmissionView,
}

/// Query string of `GET /edit`
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub id: Option<String>,
}

/// Origin (`scheme://host`) the request was addressed to
///
/// `public_base_url` wins when configured. Otherwise the `Host` header is
/// used with the scheme from `X-Forwarded-Proto`, defaulting to `http`.
pub fn request_origin(headers: &HeaderMap, public_base_url: Option<&str>) -> String {
    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

/// Whether the client prefers an HTML page over JSON
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

/// Liveness probe
pub async fn health() -> &'static str {
    "Server is running"
}

/// Submit handler
///
/// # Errors
///
/// * `400 Bad Request` - Malformed JSON or missing required fields
/// * `500 Internal Server Error` - ID allocation or persistence failed
///
/// # Example Request
///
/// ```http
/// POST /submit HTTP/1.1
/// Content-Type: application/json
///
/// { "submitterName": "A", "submitterEmail": "a@x.com", "abstractTitle": "T", ... }
/// ```
///
/// # Example Response
///
/// ```json
/// { "message": "Submission successful!", "uniqueID": 1 }
/// ```
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, BackendError> {
    let Json(body) = payload?;
    let origin = request_origin(&headers, state.public_base_url.as_deref());

    let receipt = state.submissions.submit(body, &origin).await?;

    Ok(Json(SubmitResponse {
        message: "Submission successful!".to_string(),
        unique_id: receipt.unique_id,
    }))
}

/// Edit lookup handler
///
/// Returns the submission as JSON, or as a pre-filled HTML form when the
/// `Accept` header asks for `text/html`.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed query, `id` missing or not an integer
/// * `404 Not Found` - No submission with this ID
pub async fn edit(
    State(service): State<Arc<SubmissionService>>,
    headers: HeaderMap,
    query: Result<Query<EditQuery>, QueryRejection>,
) -> Result<Response, BackendError> {
    let Query(query) = query?;
    let raw_id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| BackendError::bad_request("Unique ID is required in the query parameters."))?;
    let unique_id = parse_unique_id(&raw_id)?;

    let view = service.fetch(unique_id).await?;

    if wants_html(&headers) {
        let page = render_edit_page(
            &view,
            service.edit_deadline(),
            service.is_editing_open(Utc::now()),
        );
        return Ok(Html(page).into_response());
    }

    Ok(Json(view).into_response())
}

/// Read the `id` of an update body as an integer
///
/// Accepts a JSON integer or a string of digits.
fn update_id(value: &Value) -> Result<i64, BackendError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| BackendError::bad_request("Unique ID must be an integer.")),
        Value::String(s) => Ok(parse_unique_id(s)?),
        _ => Err(BackendError::bad_request("Unique ID must be an integer.")),
    }
}

/// Update handler
///
/// # Errors
///
/// * `400 Bad Request` - `id` or `updatedData` missing, or invalid patch
/// * `403 Forbidden` - The editing deadline has passed
/// * `404 Not Found` - No submission with this ID
///
/// # Example Request
///
/// ```http
/// POST /update HTTP/1.1
/// Content-Type: application/json
///
/// { "id": 1, "updatedData": { "abstractTitle": "Revised title" } }
/// ```
pub async fn update(
    State(service): State<Arc<SubmissionService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateResponse>, BackendError> {
    let Json(mut body) = payload?;

    let (id, updated_data) = match body.as_object_mut() {
        Some(object) => (object.remove("id"), object.remove("updatedData")),
        None => (None, None),
    };
    let (Some(id), Some(updated_data)) = (
        id.filter(|v| !v.is_null()),
        updated_data.filter(|v| !v.is_null()),
    ) else {
        return Err(BackendError::bad_request(
            "Unique ID and updated data are required.",
        ));
    };

    let unique_id = update_id(&id)?;
    let view = service.update(unique_id, updated_data).await?;

    Ok(Json(UpdateResponse {
        message: "Submission updated successfully!".to_string(),
        updated_submission: view,
    }))
}
