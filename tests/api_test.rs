//! Endpoint tests driving the router with a stubbed completion client.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use diagram_server::llm::{CompletionClient, CompletionRequest, LlmError};
use diagram_server::{create_router, AppState};

const FRONTEND_ORIGIN: &str = "http://localhost:4200";

struct StubClient {
    response: String,
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn app(response: &str) -> Router {
    let state = AppState {
        client: Arc::new(StubClient {
            response: response.to_string(),
        }),
    };
    create_router(state, FRONTEND_ORIGIN).expect("router")
}

async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn generate_diagram_returns_parsed_model_output() {
    let app = app(r#"Sure! {"nodes":[{"key":"API","category":"api"}],"links":[]}"#);

    let (status, body) = post_json(
        app,
        "/generate-diagram",
        json!({ "prompt": "a URL shortener" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"nodes":[{"key":"API","category":"api"}],"links":[]})
    );
}

#[tokio::test]
async fn generate_diagram_reports_extraction_failure_in_body_with_200() {
    let app = app("I can only answer in prose, sorry.");

    let (status, body) = post_json(app, "/generate-diagram", json!({ "prompt": "anything" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Unable to extract JSON from model output.");
    assert_eq!(body["raw"], "I can only answer in prose, sorry.");
}

#[tokio::test]
async fn generate_diagram_reports_parse_failure_in_body_with_200() {
    let app = app(r#"{"nodes": [,], "links": []}"#);

    let (status, body) = post_json(app, "/generate-diagram", json!({ "prompt": "anything" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("Failed to parse model output as JSON"));
    assert!(body.get("raw").is_none());
}

#[tokio::test]
async fn analyze_diagram_returns_analysis_text() {
    let app = app("  The design lacks a cache layer.  ");

    let (status, body) = post_json(
        app,
        "/analyze-diagram",
        json!({
            "nodes": [{"key": "API", "category": "api"}],
            "links": [],
            "question": "Is this secure?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "analysis": "The design lacks a cache layer." }));
}

#[tokio::test]
async fn analyze_diagram_accepts_missing_question() {
    let app = app("Fine.");

    let (status, body) =
        post_json(app, "/analyze-diagram", json!({ "nodes": [], "links": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "analysis": "Fine." }));
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let app = app("unused");

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_configured_frontend_origin_with_credentials() {
    let app = app("unused");

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, FRONTEND_ORIGIN)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("allow-origin header"),
        FRONTEND_ORIGIN
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .expect("allow-credentials header"),
        "true"
    );
}

#[tokio::test]
async fn concurrent_requests_do_not_leak_state() {
    let alpha = app(r#"{"nodes":[{"key":"alpha","category":"service"}],"links":[]}"#);
    let beta = app(r#"{"nodes":[{"key":"beta","category":"service"}],"links":[]}"#);

    let (left, right) = tokio::join!(
        post_json(alpha, "/generate-diagram", json!({ "prompt": "alpha" })),
        post_json(beta, "/generate-diagram", json!({ "prompt": "beta" })),
    );

    assert_eq!(left.1["nodes"][0]["key"], "alpha");
    assert_eq!(right.1["nodes"][0]["key"], "beta");
}
