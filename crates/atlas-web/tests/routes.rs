//! Router-level tests: requests go through the full axum stack against a recording backend.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use atlas_config::Config;
use atlas_test_utils::{workspace_json, BackendCall, RecordingBackend};
use atlas_web::router::build_router;
use atlas_web::state::AppState;

fn app_with(config: Config, backend: RecordingBackend) -> (Router, Arc<RecordingBackend>) {
    let backend = Arc::new(backend);
    let state = AppState::new(config, backend.clone()).expect("templates compile");
    (build_router(state), backend)
}

fn app(backend: RecordingBackend) -> (Router, Arc<RecordingBackend>) {
    app_with(Config::default(), backend)
}

fn search(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn test_landing_page_renders_and_issues_session() {
    let (app, _) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("atlas_session="));
    let html = body_text(response).await;
    assert!(html.contains("Atlas"));
    assert!(html.contains("Find a gym routine for beginners"));
}

#[tokio::test]
async fn test_search_redirects_to_created_workspace() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_123"));

    let response = app.oneshot(search("query=+plan+a+trip+")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/workspace/ws_123");
    assert!(response.headers().get(header::SET_COOKIE).is_some());
    assert_eq!(backend.calls(), vec![BackendCall::Create("plan a trip".to_string())]);
}

#[tokio::test]
async fn test_blank_search_is_ignored() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.clone().oneshot(search("query=+++")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(search("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_failed_search_redirects_to_query_route_with_alert() {
    let (app, _) = app(RecordingBackend::failing_with_status(500, "down"));

    let response = app.oneshot(search("query=plan+a+trip")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/workspace/plan%20a%20trip?alert=Error%3A%20HTTP%20error%21%20status%3A%20500%2C%20message%3A%20down"
    );
}

#[tokio::test]
async fn test_workspace_shell_shows_loading_and_alert() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/workspace/ws_1?alert=Error%3A%20boom")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Creating your workspace..."));
    assert!(html.contains("Error: boom"));
    assert!(html.contains("data-resolve-url="));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_resolve_decodes_query_and_renders_workspace() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_7"));

    let response = app.oneshot(get("/workspace/plan%20a%20trip/resolve")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), vec![BackendCall::Create("plan a trip".to_string())]);
    let html = body_text(response).await;
    assert!(html.contains("Japan Travel Planning Workspace"));
    assert!(html.contains("2 suggestions"));
}

#[tokio::test]
async fn test_resolve_decodes_exactly_once() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_7"));

    let response = app.oneshot(get("/workspace/a%2520b/resolve")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), vec![BackendCall::Create("a%20b".to_string())]);
}

#[tokio::test]
async fn test_resolve_keeps_slash_and_question_mark_in_query() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_7"));

    let response = app
        .oneshot(get("/workspace/food%20%26%20drink%2Fjapan%3F/resolve"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), vec![BackendCall::Create("food & drink/japan?".to_string())]);
}

#[tokio::test]
async fn test_shell_resolve_url_is_reencoded() {
    let (app, _) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/workspace/food%20%26%20drink%2Fjapan%3F")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("food%20%26%20drink%2Fjapan%3F"));
    assert!(!html.contains("food & drink"));
    assert!(!html.contains("drink/japan"));
}

#[tokio::test]
async fn test_fallback_route_from_failed_search_resolves_original_query() {
    let (landing, _) = app(RecordingBackend::failing_with_status(500, "down"));
    let response = landing.oneshot(search("query=c%2Fc%2B%2B+books%3F")).await.unwrap();
    let href = location(&response).to_string();
    let path = href.split_once("?alert=").map(|(p, _)| p).unwrap_or(&href).to_string();
    assert_eq!(path, "/workspace/c%2Fc%2B%2B%20books%3F");

    let (workspace, backend) = app(RecordingBackend::succeeding("ws_2"));
    workspace.oneshot(get(&format!("{path}/resolve"))).await.unwrap();
    assert_eq!(backend.calls(), vec![BackendCall::Create("c/c++ books?".to_string())]);
}

#[tokio::test]
async fn test_undecodable_segment_renders_error_page() {
    let (app, backend) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/workspace/%FF/resolve")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Error Loading Workspace"));
    assert!(html.contains("Go Back to Search"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_suggestions_render_empty_panel() {
    let mut doc = workspace_json("ws_5", "q");
    doc["suggestions"] = serde_json::json!("none today");
    let (app, _) = app(RecordingBackend::returning_json(doc));

    let response = app.oneshot(get("/workspace/ws_5/resolve")).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("0 suggestions"));
    assert!(html.contains("Evidence-linked suggestions will appear here."));
}

#[tokio::test]
async fn test_resolve_failure_renders_error_page() {
    let (app, _) = app(RecordingBackend::failing_with_status(503, "unavailable"));

    let response = app.oneshot(get("/workspace/ws_9/resolve")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Error Loading Workspace"));
    assert!(html.contains("HTTP error! status: 503, message: unavailable"));
    assert!(html.contains("Go Back to Search"));
}

#[tokio::test]
async fn test_resolve_fetches_ids_when_enabled() {
    let mut config = Config::default();
    config.backend.fetch_by_id = true;
    let (app, backend) = app_with(config, RecordingBackend::succeeding("ws_42"));

    let response = app.oneshot(get("/workspace/ws_42/resolve")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), vec![BackendCall::Fetch("ws_42".to_string())]);
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let (app, _) = app(RecordingBackend::succeeding("ws_1"));

    let response = app.oneshot(get("/static/css/main.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(".workspace-grid"));
}
