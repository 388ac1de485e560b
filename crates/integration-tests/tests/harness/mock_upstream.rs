//! Mock Anthropic backend for integration tests
//!
//! Implements a minimal Messages API that returns canned responses and
//! records what the relay sent it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock upstream that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Status and body returned instead of the canned success
    failure: Option<(StatusCode, String)>,
    /// Delay applied before answering, to exercise client timeouts
    response_delay: Option<Duration>,
    /// Body of the last `/v1/messages` request, as the relay sent it
    last_message_body: Mutex<Option<serde_json::Value>>,
    /// `x-api-key` and `anthropic-version` from the last request
    last_auth_headers: Mutex<Option<(String, String)>>,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None, None).await
    }

    /// Start a mock server that answers every call with the given
    /// status and body
    pub async fn start_failing(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some((status, body.to_owned())), None).await
    }

    /// Start a mock server that sleeps before every answer
    pub async fn start_stalling(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(None, Some(delay)).await
    }

    async fn start_inner(
        failure: Option<(StatusCode, String)>,
        response_delay: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            failure,
            response_delay,
            last_message_body: Mutex::new(None),
            last_auth_headers: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/models", routing::get(handle_models))
            .route("/v1/messages", routing::post(handle_messages))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Body of the last message request the relay forwarded
    pub fn last_message_body(&self) -> Option<serde_json::Value> {
        self.state.last_message_body.lock().unwrap().clone()
    }

    /// `x-api-key` and `anthropic-version` from the last request
    pub fn last_auth_headers(&self) -> Option<(String, String)> {
        self.state.last_auth_headers.lock().unwrap().clone()
    }

    /// The canned model listing body, for passthrough assertions
    pub fn models_body() -> String {
        serde_json::to_string(&models_json()).unwrap()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn models_json() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "type": "model",
                "id": "claude-3-5-haiku-20241022",
                "display_name": "Claude Haiku 3.5"
            }
        ],
        "has_more": false
    })
}

fn record_auth_headers(state: &MockState, headers: &HeaderMap) {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    *state.last_auth_headers.lock().unwrap() = Some((get("x-api-key"), get("anthropic-version")));
}

async fn handle_models(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    record_auth_headers(&state, &headers);

    if let Some(delay) = state.response_delay {
        tokio::time::sleep(delay).await;
    }

    if let Some((status, body)) = &state.failure {
        return (*status, body.clone()).into_response();
    }

    ([(axum::http::header::CONTENT_TYPE, "application/json")], MockUpstream::models_body()).into_response()
}

async fn handle_messages(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    record_auth_headers(&state, &headers);

    if let Some(delay) = state.response_delay {
        tokio::time::sleep(delay).await;
    }

    let model = body["model"].as_str().unwrap_or("claude-3-5-haiku").to_owned();
    *state.last_message_body.lock().unwrap() = Some(body);

    if let Some((status, body)) = &state.failure {
        return (*status, body.clone()).into_response();
    }

    let response = serde_json::json!({
        "id": "msg_test_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": "Hello from the mock upstream"}],
        "model": model,
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    });

    Json(response).into_response()
}
