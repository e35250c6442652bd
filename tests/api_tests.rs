//! HTTP API tests driven through the full router

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use loanharmony_server::config::Config;
use loanharmony_server::marketplace::IntakePolicy;
use loanharmony_server::middleware::REQUEST_ID_HEADER;
use loanharmony_server::routes::app_router;
use loanharmony_server::state::AppState;

fn app_with(intake_policy: IntakePolicy) -> Router {
    let config = Config {
        notification_ttl: Duration::from_secs(3),
        intake_policy,
        ..Config::default()
    };
    app_router(AppState::from_config(&config), CorsLayer::permissive())
}

fn app() -> Router {
    app_with(IntakePolicy::Lenient)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn submit(app: &Router, amount: &str, duration: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/requests",
        Some(json!({
            "amount": amount,
            "purpose": "Education",
            "duration": duration,
            "credit_score": "680"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_initial_session() {
    let (status, body) = send(&app(), Method::GET, "/api/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["active_tab"], "dashboard");
    assert_eq!(data["user"]["type"], "lender");
    assert_eq!(data["user"]["karma"], 0);
    assert_eq!(data["requests"], json!([]));
    assert_eq!(data["notification"], Value::Null);
}

#[tokio::test]
async fn test_submit_request() {
    let app = app();
    let body = submit(&app, "5000", "24").await;

    let data = &body["data"];
    assert_eq!(data["total_requests"], 1);
    let request = &data["requests"][0];
    assert_eq!(request["purpose"], "Education");
    assert_eq!(request["amount"], json!({"kind": "value", "value": 5000}));
    assert_eq!(request["karma"], 5);
    assert_eq!(request["matches"], 0);
    assert_eq!(request["status"], "pending");
    assert_eq!(data["draft"]["amount"], "");
    assert_eq!(
        data["notification"]["message"],
        "Loan request submitted successfully!"
    );
}

#[tokio::test]
async fn test_submit_with_empty_body_uses_draft() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/draft",
        Some(json!({"amount": "1200", "purpose": "Home"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["requests"][0]["purpose"], "Home");
}

#[tokio::test]
async fn test_filter_requests() {
    let app = app();
    submit(&app, "3000", "12").await;
    submit(&app, "8000", "12").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/filter",
        Some(json!({"min_amount": "4000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["filter"]["min_amount"], 4000);

    let (_, body) = send(&app, Method::GET, "/api/requests", None).await;
    let requests = body["data"]["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["amount"]["value"], 8000);
    assert_eq!(body["data"]["total"], 2);

    let (_, body) = send(&app, Method::GET, "/api/requests?all=true", None).await;
    assert_eq!(body["data"]["requests"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_inverted_filter_is_empty() {
    let app = app();
    submit(&app, "5000", "12").await;

    send(
        &app,
        Method::PATCH,
        "/api/filter",
        Some(json!({"min_amount": "9000", "max_amount": "1000"})),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/requests", None).await;
    assert_eq!(body["data"]["requests"], json!([]));
}

#[tokio::test]
async fn test_express_interest_twice() {
    let app = app();
    let body = submit(&app, "5000", "24").await;
    let id = body["data"]["requests"][0]["id"].as_i64().unwrap();

    let uri = format!("/api/requests/{}/interest", id);
    send(&app, Method::POST, &uri, None).await;
    let (status, body) = send(&app, Method::POST, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["requests"][0]["matches"], 2);
    assert_eq!(body["data"]["user"]["karma"], 2);
    assert_eq!(
        body["data"]["notification"]["message"],
        "+1 Karma! Interest recorded"
    );
}

#[tokio::test]
async fn test_express_interest_unknown_id() {
    let app = app();
    submit(&app, "5000", "24").await;

    let (status, body) = send(&app, Method::POST, "/api/requests/42/interest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["karma"], 0);
    assert_eq!(body["data"]["requests"][0]["matches"], 0);
}

#[tokio::test]
async fn test_toggle_expanded_card() {
    let app = app();
    let body = submit(&app, "5000", "24").await;
    let id = body["data"]["requests"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/requests/{}/expand", id);

    let (_, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(body["data"]["expanded"], id);
    assert_eq!(body["data"]["requests"][0]["story_text"], "No story provided");

    let (_, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(body["data"]["expanded"], Value::Null);
}

#[tokio::test]
async fn test_toggle_user_type_keeps_tab() {
    let app = app();
    send(
        &app,
        Method::PUT,
        "/api/session/tab",
        Some(json!({"tab": "requests"})),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/session/user/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["type"], "borrower");
    assert_eq!(body["data"]["active_tab"], "requests");
    assert_eq!(body["data"]["tabs"], json!(["dashboard", "requests", "submit"]));
}

#[tokio::test]
async fn test_unknown_tab_is_rejected() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/api/session/tab",
        Some(json!({"tab": "settings"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_strict_intake_rejects_bad_draft() {
    let app = app_with(IntakePolicy::Strict);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/requests",
        Some(json!({"amount": "0", "purpose": "Business", "duration": "12", "credit_score": "700"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = send(&app, Method::GET, "/api/session", None).await;
    assert_eq!(body["data"]["total_requests"], 0);
    assert_eq!(body["data"]["draft"]["amount"], "0");
    assert_eq!(body["data"]["notification"]["kind"], "error");
}

#[tokio::test]
async fn test_malformed_submit_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/requests")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard() {
    let (status, body) = send(&app(), Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trust_score"], 85);
    assert_eq!(body["data"]["total_matches"], 142);
    assert_eq!(body["data"]["top_requests"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_route_and_request_id() {
    let request = Request::builder()
        .uri("/api/nowhere")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
}
