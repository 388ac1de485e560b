//! Axum route handlers for the relay endpoints

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use manto_core::{ErrorBody, HttpError};
use secrecy::SecretString;

use crate::error::RelayError;
use crate::state::RelayState;
use crate::types::MessageRequest;
use crate::validate;

/// Build the relay router with all endpoints
pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        // Deliberately answers any method: a pure read of static data
        .route("/config.js", routing::any(config_descriptor))
        .route("/api/models", routing::get(list_models))
        .route("/api/messages", routing::post(send_message))
        .with_state(state)
}

/// Handle `/config.js`
///
/// Serves the startup-rendered descriptor with a short shared-cache
/// window.
async fn config_descriptor(State(state): State<RelayState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        state.inner.config_script.clone(),
    )
        .into_response()
}

/// Handle `GET /api/models`
async fn list_models(State(state): State<RelayState>, headers: HeaderMap) -> Response {
    let api_key = extract_api_key(&headers);
    if let Err(e) = validate::validate_api_key(&api_key, &state.inner.limits) {
        return error_response(&e);
    }

    match state.inner.client.list_models(&api_key).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `POST /api/messages`
///
/// Takes the raw body so the key check runs before any parsing: a
/// request with both a bad key and a bad body reports the key error.
async fn send_message(State(state): State<RelayState>, headers: HeaderMap, body: Bytes) -> Response {
    let api_key = extract_api_key(&headers);
    if let Err(e) = validate::validate_api_key(&api_key, &state.inner.limits) {
        return error_response(&e);
    }

    let Ok(request) = serde_json::from_slice::<MessageRequest>(&body) else {
        return error_response(&RelayError::MalformedBody);
    };

    if let Err(e) = validate::validate_message_request(&request, &state.inner.limits) {
        return error_response(&e);
    }

    match state.inner.client.send_message(&api_key, request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Pull the `x-api-key` header; absent or non-UTF-8 becomes empty
fn extract_api_key(headers: &HeaderMap) -> SecretString {
    headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .into()
}

/// Render a relay error as the shared `{"error", "details"?}` shape
///
/// Internal errors return a bare 500: the cause is logged server-side,
/// never serialized into the response.
fn error_response(error: &RelayError) -> Response {
    if let RelayError::Internal(cause) = error {
        tracing::error!(error = %cause, "unexpected relay failure");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (error.status_code(), Json(ErrorBody::from_error(error))).into_response()
}
