use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pickup::router::init_router;
use pickup::state::AppState;
use pickup_config::{RateLimitConfig, SessionConfig};
use pickup_core::ManualClock;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tower::ServiceExt;

/// Quotas high enough that ordinary tests never see a 429.
pub fn relaxed_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        general_per_second: 1000,
        general_burst_size: 1000,
        auth_per_second: 1000,
        auth_burst_size: 1000,
    }
}

/// App over the sample directory plus a handle on its clock.
pub fn setup_test_app() -> (Router, ManualClock) {
    let clock = ManualClock::default();
    let state = AppState::for_tests(clock.clone(), relaxed_rate_limit_config());
    (init_router(state), clock)
}

#[allow(dead_code)]
pub fn setup_test_app_with_sessions(session_config: SessionConfig) -> (Router, ManualClock) {
    let clock = ManualClock::default();
    let state = AppState::for_tests_with_sessions(
        clock.clone(),
        relaxed_rate_limit_config(),
        session_config,
    );
    (init_router(state), clock)
}

#[allow(dead_code)]
pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> Router {
    init_router(AppState::for_tests(ManualClock::default(), rate_limit_config))
}

/// Address of a client on the test network, as the server sees the connection.
pub fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([192, 168, 1, last_octet], 40000))
}

/// Attaches the connection's peer address, which the rate limiters key on.
pub fn from_peer(mut request: Request<Body>, addr: SocketAddr) -> Request<Body> {
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

/// Sends a request and returns the status with the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app
        .clone()
        .oneshot(from_peer(request, peer(1)))
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn check_in(app: &Router, parent: &str, students: &[&str], method: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/pickups/check-in",
        Some(json!({
            "parent_name": parent,
            "students": students,
            "pickup_method": method
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "check-in failed: {body}");
    body
}

/// Logs in and returns the bearer token.
#[allow(dead_code)]
pub async fn login(app: &Router, pin: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/teachers/login",
        Some(json!({ "pin": pin })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Activity messages, newest first.
#[allow(dead_code)]
pub async fn activity_messages(app: &Router) -> Vec<String> {
    let (status, body) = send(app, "GET", "/api/activity", None, None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect()
}
