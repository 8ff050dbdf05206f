//! Integration tests for the WiFi command API.
//!
//! These verify the HTTP endpoints against the mock driver, including the
//! control-loop effects of start/stop and eye-data ingestion.

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use rs_plotter::hal::MockDriver;
use rs_plotter::motor::Axis;
use rs_plotter::pid::PidGains;
use rs_plotter::services::{build_router, SharedPlotterState, WebServerConfig};
use rs_plotter::{
    ControlConfig, ControlResponse, DiscoverResponse, PlotterController, ProcessedResponse,
    StatusResponse,
};

fn create_test_app() -> (axum::Router, Arc<SharedPlotterState<MockDriver>>) {
    let config = ControlConfig::default()
        .with_vertical(PidGains::new(1.0, 0.0, 0.0))
        .with_horizontal(PidGains::new(1.0, 0.0, 0.0));
    let controller = PlotterController::with_config(MockDriver::new(), &config);
    let state = Arc::new(SharedPlotterState::new(controller));
    let router = build_router(Arc::clone(&state), &WebServerConfig::default());
    (router, state)
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_status_initially_disabled() {
    let (app, _state) = create_test_app();

    let response = get(app, "/status").await;
    assert_eq!(response.status(), StatusCode::OK);

    let status: StatusResponse = body_json(response).await;
    assert_eq!(status.status, "disabled");
    assert!(!status.enabled);
    assert!(status.wifi);
}

#[tokio::test]
async fn test_start_enables_the_gate() {
    let (app, state) = create_test_app();

    let response = get(app.clone(), "/start").await;
    assert_eq!(response.status(), StatusCode::OK);

    let control: ControlResponse = body_json(response).await;
    assert_eq!(control.status, "started");
    assert!(control.enabled);
    assert!(state.state().enabled);

    let status: StatusResponse = body_json(get(app, "/status").await).await;
    assert_eq!(status.status, "enabled");
    assert!(status.enabled);
}

#[tokio::test]
async fn test_stop_then_status_reports_disabled() {
    let (app, state) = create_test_app();

    let _ = get(app.clone(), "/start").await;
    let response = get(app.clone(), "/stop").await;
    assert_eq!(response.status(), StatusCode::OK);

    let control: ControlResponse = body_json(response).await;
    assert_eq!(control.status, "stopped");
    assert!(!control.enabled);

    let status: StatusResponse = body_json(get(app, "/status").await).await;
    assert!(!status.enabled);

    // Both integral accumulators are zero immediately after the stop.
    let integrals = state.with_controller(|c| c.integrals());
    assert_eq!(integrals, (0.0, 0.0));
}

#[tokio::test]
async fn test_status_does_not_mutate_state() {
    let (app, state) = create_test_app();

    let _ = get(app.clone(), "/start").await;
    for _ in 0..3 {
        let _ = get(app.clone(), "/status").await;
    }
    assert!(state.state().enabled);
}

#[tokio::test]
async fn test_discover() {
    let (app, _state) = create_test_app();

    let response = get(app, "/api/discover").await;
    assert_eq!(response.status(), StatusCode::OK);

    let discover: DiscoverResponse = body_json(response).await;
    assert_eq!(discover.device_type, "eye-tracker-plotter");
    assert_eq!(discover.device, "rs-plotter");
    assert!(discover.capabilities.contains(&"eye-data".to_string()));
}

async fn post_eye_data(app: axum::Router, body: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/eye-data")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_eye_data_drives_motors_while_enabled() {
    let (app, state) = create_test_app();

    let _ = get(app.clone(), "/start").await;
    let response = post_eye_data(app, r#"{"packet": "U050R100"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let processed: ProcessedResponse = body_json(response).await;
    assert_eq!(processed.status, "processed");

    // The control loop consumes the packet on its next iteration.
    let now_ms = state.now_ms();
    state.with_controller(|c| c.tick(now_ms)).unwrap();

    let pwm_v = state.with_controller(|c| c.driver().output(Axis::Vertical).pwm);
    let pwm_h = state.with_controller(|c| c.driver().output(Axis::Horizontal).pwm);
    assert_eq!(pwm_v, 50);
    assert_eq!(pwm_h, 100);
}

#[tokio::test]
async fn test_eye_data_after_stop_decodes_but_yields_zero_pwm() {
    let (app, state) = create_test_app();

    let _ = get(app.clone(), "/stop").await;
    let response = post_eye_data(app, r#"{"packet": "U050R100"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let now_ms = state.now_ms();
    let decoded = state.with_controller(|c| c.tick(now_ms)).unwrap();
    assert!(decoded.is_some(), "packet still decodes while disabled");

    let stopped = state.with_controller(|c| c.driver().is_stopped());
    assert!(stopped);
}

#[tokio::test]
async fn test_eye_data_malformed_json_is_400() {
    let (app, state) = create_test_app();

    for body in [
        "not json",
        r#"{"data": "U050R100"}"#,
        r#"{"packet": 42}"#,
        "",
    ] {
        let response = post_eye_data(app.clone(), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
    }

    // No effect on control-loop state.
    assert!(!state.state().enabled);
    assert_eq!(state.with_controller(|c| c.buffered_bytes()), 0);
}

#[tokio::test]
async fn test_eye_data_invalid_packet_is_processed_not_an_error() {
    let (app, state) = create_test_app();

    let _ = get(app.clone(), "/start").await;
    let response = post_eye_data(app, r#"{"packet": "X050R100"}"#).await;
    // Character-level validation failures recover inside the decoder.
    assert_eq!(response.status(), StatusCode::OK);

    let now_ms = state.now_ms();
    let decoded = state.with_controller(|c| c.tick(now_ms)).unwrap();
    assert!(decoded.is_none());
    assert_eq!(state.with_controller(|c| c.buffered_bytes()), 0);
}

#[tokio::test]
async fn test_responses_close_the_connection() {
    let (app, _state) = create_test_app();

    let response = get(app, "/status").await;
    assert_eq!(
        response.headers().get(header::CONNECTION).unwrap(),
        "close"
    );
}

#[tokio::test]
async fn test_cors_headers_present() {
    let (app, _state) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _state) = create_test_app();

    let response = get(app, "/api/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
