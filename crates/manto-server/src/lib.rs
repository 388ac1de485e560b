mod health;
mod security_headers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use manto_config::Config;
use manto_relay::RelayState;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use security_headers::SecurityHeaders;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the relay state or security header policy
    /// cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let relay_state = RelayState::from_config(config)?;
        let security = Arc::new(SecurityHeaders::from_config(&config.security)?);

        let mut app = Router::new();

        // Liveness probe, outside the relay and validator
        app = app.route("/healthz", axum::routing::get(health::healthz_handler));

        // Relay routes
        app = app.merge(manto_relay::relay_router(relay_state));

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // Outer deadline wrapping the whole handler chain
        app = app.layer(TimeoutLayer::new(config.server.request_timeout));

        // Panic recovery: a response is always produced
        app = app.layer(CatchPanicLayer::custom(panic_response));

        // Request id for log correlation, echoed on the response
        app = app.layer(PropagateRequestIdLayer::x_request_id());
        app = app.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        // Security headers decorate every response, timeouts and
        // panics included, so they sit outermost
        app = app.layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let policy = Arc::clone(&security);
                async move { security_headers::security_headers_middleware(policy, req, next).await }
            },
        ));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "relay listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Convert a handler panic into a bare 500
///
/// The payload is logged and never reaches the client.
fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> http::Response<Body> {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    http::Response::builder()
        .status(http::StatusCode::INTERNAL_SERVER_ERROR)
        .body(Body::empty())
        .expect("valid empty response")
}
