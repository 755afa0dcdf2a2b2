mod common;

use axum::{body::to_bytes, http::StatusCode};
use common::{TestApp, json};

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "success");
}

#[tokio::test]
async fn metrics_expose_mail_counters() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@example.com", "password123").await;
    app.delivered(1).await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("mail_queue_emails"));
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let app = TestApp::spawn().await;

    let response = app.get("/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json(response).await;
    for path in [
        "/register",
        "/login",
        "/logout",
        "/activate-user/{uid}/{token}",
        "/me",
        "/",
        "/create-todo/",
        "/todo-detail/{id}/",
        "/todo-edit/{id}/",
        "/todo-delete/{id}/",
    ] {
        assert!(doc["paths"].get(path).is_some(), "{path} missing");
    }
}
