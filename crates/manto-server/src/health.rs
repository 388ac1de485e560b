use http::StatusCode;

/// Liveness probe: 204, no body, bypasses the relay entirely
pub async fn healthz_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
