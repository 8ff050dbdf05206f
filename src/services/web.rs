//! Axum-based HTTP command server.
//!
//! Provides the plotter's remote-control endpoints:
//! - GET `/start` - open the enable gate (resets both PIDs)
//! - GET `/stop` - close the gate, zero outputs, reset both PIDs
//! - GET `/status` - gate state and WiFi health, never mutates
//! - GET `/api/discover` - device identity for client auto-discovery
//! - POST `/api/eye-data` - feed one wire packet to the link decoder
//!
//! Every response carries permissive CORS headers and `Connection: close`;
//! clients open a fresh connection per request, exactly as they do against
//! the on-device server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::WebConfig;
use crate::messages::{
    ControlResponse, DiscoverResponse, ErrorResponse, EyeDataRequest, ProcessedResponse,
    StatusResponse,
};
use crate::traits::MotorDriver;

use super::shared::SharedPlotterState;

// ============================================================================
// Route Handlers
// ============================================================================

fn driver_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("motor driver error")),
    )
        .into_response()
}

/// GET /start - open the enable gate.
async fn start<D: MotorDriver + Send + 'static>(
    State(state): State<Arc<SharedPlotterState<D>>>,
) -> Response {
    let now_ms = state.now_ms();
    match state.with_controller(|c| c.start(now_ms)) {
        Ok(()) => Json(ControlResponse::started()).into_response(),
        Err(_) => driver_error(),
    }
}

/// GET /stop - close the gate and zero both outputs.
async fn stop<D: MotorDriver + Send + 'static>(
    State(state): State<Arc<SharedPlotterState<D>>>,
) -> Response {
    let now_ms = state.now_ms();
    match state.with_controller(|c| c.stop(now_ms)) {
        Ok(()) => Json(ControlResponse::stopped()).into_response(),
        Err(_) => driver_error(),
    }
}

/// GET /status - report gate state and WiFi health.
async fn status<D: MotorDriver + Send + 'static>(
    State(state): State<Arc<SharedPlotterState<D>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse::new(
        state.state().enabled,
        state.wifi_connected(),
    ))
}

/// GET /api/discover - device identity for client auto-discovery.
async fn discover<D: MotorDriver + Send + 'static>(
    State(state): State<Arc<SharedPlotterState<D>>>,
) -> Json<DiscoverResponse> {
    Json(DiscoverResponse::new(state.device()))
}

/// POST /api/eye-data - feed one wire packet to the link decoder.
///
/// A missing or non-string `packet` field is a 400; a packet that fails
/// character validation is not. The decoder drains and resynchronizes,
/// exactly as it would on a corrupted serial byte.
async fn eye_data<D: MotorDriver + Send + 'static>(
    State(state): State<Arc<SharedPlotterState<D>>>,
    body: Bytes,
) -> Response {
    let Ok(req) = serde_json::from_slice::<EyeDataRequest>(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid eye-data request")),
        )
            .into_response();
    };

    state.with_controller(|c| c.feed_packet(&req.packet));
    Json(ProcessedResponse::new()).into_response()
}

/// Fallback handler for 404.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("not found")),
    )
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the command server.
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins.
    pub cors_permissive: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            addr: ([0, 0, 0, 0], 8080).into(),
            cors_permissive: true,
        }
    }
}

impl WebServerConfig {
    /// Create a new config with the given address.
    pub fn new(addr: impl Into<SocketAddr>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set whether CORS should be permissive.
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared [`WebConfig`].
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: ([0, 0, 0, 0], config.port).into(),
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Build the axum router with all routes.
pub fn build_router<D: MotorDriver + Send + 'static>(
    state: Arc<SharedPlotterState<D>>,
    config: &WebServerConfig,
) -> Router {
    let mut router = Router::new()
        .route("/start", get(start::<D>))
        .route("/stop", get(stop::<D>))
        .route("/status", get(status::<D>))
        .route("/api/discover", get(discover::<D>))
        .route("/api/eye-data", post(eye_data::<D>))
        .fallback(not_found)
        .with_state(state)
        // One response per connection, matching the on-device server.
        .layer(SetResponseHeaderLayer::overriding(
            header::CONNECTION,
            HeaderValue::from_static("close"),
        ));

    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Drive the controller's `tick()` on a fixed interval.
///
/// Run this alongside the server; a driver error on one tick leaves the
/// outputs unchanged and the next tick retries.
pub async fn run_tick_loop<D: MotorDriver + Send + 'static>(
    state: Arc<SharedPlotterState<D>>,
    interval_ms: u64,
) {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    loop {
        interval.tick().await;
        let now_ms = state.now_ms();
        let _ = state.with_controller(|c| c.tick(now_ms));
    }
}

/// Start the command server with freshly created shared state.
///
/// This function blocks until the server is shut down. Use
/// [`run_server_with_state`] to keep a handle on the state for the tick
/// loop or a serial feeder.
pub async fn run_server<D: MotorDriver + Send + 'static>(
    controller: crate::plotter::PlotterController<D>,
    config: WebServerConfig,
) -> Result<(), std::io::Error> {
    let state = Arc::new(SharedPlotterState::new(controller));
    run_server_with_state(state, config).await
}

/// Start the command server over existing shared state.
pub async fn run_server_with_state<D: MotorDriver + Send + 'static>(
    state: Arc<SharedPlotterState<D>>,
    config: WebServerConfig,
) -> Result<(), std::io::Error> {
    let router = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    println!("Command server listening on http://{}", config.addr);

    axum::serve(listener, router).await
}
