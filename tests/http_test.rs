//! End-to-end tests for the HTTP surface, driven through the router without
//! binding a socket.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use order_guard::audit::{AuditEventKind, AuditOutcome};
use order_guard::web::{router, AppState, REQUEST_ID_HEADER};
use order_guard::Config;

fn app() -> (Router, AppState) {
    let state = AppState::from_config(Config::default()).unwrap();
    (router(state.clone()), state)
}

async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn owner_receives_order_as_json() {
    let (app, _) = app();
    let (status, body) = get(app, "/orders/1001", Some("alice-token")).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": 1001, "ownerId": 1, "description": "Laptop"})
    );
}

#[tokio::test]
async fn json_content_type_on_success() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/1002")
                .header(header::AUTHORIZATION, "Bearer bob-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}

#[tokio::test]
async fn other_principals_order_is_forbidden_without_leaking() {
    let (app, _) = app();
    let (status, body) = get(app, "/orders/1002", Some("alice-token")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Forbidden");
    assert!(!body.contains("Phone"));
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let (app, _) = app();
    let (status, body) = get(app, "/orders/9999", Some("bob-token")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Order not found");
}

#[tokio::test]
async fn malformed_order_id_is_not_found() {
    for uri in [
        "/orders/abc",
        "/orders/01001",
        "/orders/0",
        "/orders/-5",
        "/orders/%FF",
    ] {
        let (app, _) = app();
        let (status, body) = get(app, uri, Some("alice-token")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, "Order not found");
    }
}

#[tokio::test]
async fn undecodable_order_id_is_audited_as_malformed() {
    let (app, state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/%FF")
                .header(header::AUTHORIZATION, "Bearer alice-token")
                .header(REQUEST_ID_HEADER, "trace-ff")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-ff");

    let events = state.service().audit().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].principal(), Some("1"));
    assert_eq!(events[0].resource_id(), Some("<malformed>"));
    assert_eq!(events[0].outcome(), AuditOutcome::Error);
}

#[tokio::test]
async fn undecodable_order_id_without_token_is_unauthorized() {
    let (app, state) = app();
    let (status, body) = get(app, "/orders/%FF", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Unauthorized");
    assert_eq!(
        state.service().audit().events()[0].kind(),
        AuditEventKind::Authentication
    );
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/1001")
                .header(header::AUTHORIZATION, "bearer alice-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/1001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn unknown_token_is_unauthorized_even_for_missing_order() {
    let (app, _) = app();
    let (status, body) = get(app, "/orders/9999", Some("mallory-token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Unauthorized");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/1001")
                .header(header::AUTHORIZATION, "Bearer alice-token")
                .header(REQUEST_ID_HEADER, "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-42");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/9999")
                .header(header::AUTHORIZATION, "Bearer alice-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn every_outcome_is_audited() {
    let (app, state) = app();

    get(app.clone(), "/orders/1001", Some("alice-token")).await;
    get(app.clone(), "/orders/1002", Some("alice-token")).await;
    get(app.clone(), "/orders/9999", Some("alice-token")).await;
    get(app, "/orders/1001", None).await;

    let events = state.service().audit().events();
    assert_eq!(events.len(), 4);

    assert_eq!(events[0].outcome(), AuditOutcome::Success);
    assert_eq!(events[1].outcome(), AuditOutcome::Denied);
    assert_eq!(events[1].resource_id(), Some("1002"));
    assert_eq!(events[2].outcome(), AuditOutcome::Error);
    assert_eq!(events[3].kind(), AuditEventKind::Authentication);
    assert_eq!(events[3].principal(), None);
}

#[tokio::test]
async fn health_needs_no_token() {
    let (app, _) = app();
    let (status, body) = get(app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn health_echoes_request_id() {
    let (app, state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "health-7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "health-7");
    assert!(state.service().audit().is_empty());
}
