//! Integration tests for the HTTP router.
//!
//! Requests are driven through `tower::ServiceExt::oneshot` against the full
//! router backed by the in-memory store and the real renderers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use md_reader::adapters::http::{api_router, DocumentAppState};
use md_reader::adapters::{HtmlPreviewRenderer, InMemoryDocumentRepository, PdfRenderer, WordRenderer};
use md_reader::domain::quota::QuotaPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
}

impl TestApp {
    fn with_limit(limit: u32) -> Self {
        let state = DocumentAppState {
            repository: Arc::new(InMemoryDocumentRepository::new()),
            quota_policy: Arc::new(QuotaPolicy::new(limit, ["boss@example.com"])),
            renderers: vec![Arc::new(PdfRenderer::default()), Arc::new(WordRenderer::new())],
            previewer: Arc::new(HtmlPreviewRenderer::new()),
        };
        Self {
            router: api_router().with_state(state),
        }
    }

    fn new() -> Self {
        Self::with_limit(500)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, bytes, headers)
    }

    async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes, _) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(&self, user: &str, content: &str) -> String {
        let (status, body) = self
            .json(post(user, "/api/documents", json!({ "content": content })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

fn as_user(builder: axum::http::request::Builder, user: &str) -> axum::http::request::Builder {
    builder
        .header("X-User-Id", format!("gh-{}", user))
        .header("X-User-Email", format!("{}@example.com", user))
}

fn get(user: &str, uri: &str) -> Request<Body> {
    as_user(Request::builder().method("GET").uri(uri), user)
        .body(Body::empty())
        .unwrap()
}

fn delete(user: &str, uri: &str) -> Request<Body> {
    as_user(Request::builder().method("DELETE").uri(uri), user)
        .body(Body::empty())
        .unwrap()
}

fn post(user: &str, uri: &str, body: Value) -> Request<Body> {
    as_user(Request::builder().method("POST").uri(uri), user)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Documents
// =============================================================================

#[tokio::test]
async fn document_lifecycle_over_http() {
    let app = TestApp::new();

    let id = app.create("ann", "# Trip plan\n- pack").await;

    let (status, list) = app.json(get("ann", "/api/documents")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["document_count"], 1);
    assert_eq!(list["document_limit"], 500);
    assert_eq!(list["unlimited"], false);
    assert_eq!(list["documents"][0]["title"], "Trip plan");

    let (status, saved) = app
        .json(post(
            "ann",
            "/api/documents",
            json!({ "id": id, "title": "Trip", "content": "# Trip plan\n- pack\n- go" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["created"], false);
    assert_eq!(saved["title"], "Trip");

    let (status, doc) = app.json(get("ann", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["content"], "# Trip plan\n- pack\n- go");

    let (status, _) = app.json(delete("ann", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.json(delete("ann", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn requests_without_identity_are_401() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/documents")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "content": "x" }).to_string()))
        .unwrap();

    let (status, body) = app.json(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn empty_content_is_400() {
    let app = TestApp::new();
    let (status, body) = app
        .json(post("ann", "/api/documents", json!({ "content": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "content");
}

#[tokio::test]
async fn malformed_body_id_is_400() {
    let app = TestApp::new();
    let (status, body) = app
        .json(post("ann", "/api/documents", json!({ "id": "nope", "content": "# x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "id");
}

#[tokio::test]
async fn other_users_documents_are_404() {
    let app = TestApp::new();
    let id = app.create("ann", "# Ann only").await;

    let (status, _) = app.json(get("ben", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .json(post("ben", "/api/documents", json!({ "id": id, "content": "# mine" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.json(delete("ben", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.json(get("ann", &format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Quota
// =============================================================================

#[tokio::test]
async fn quota_exceeded_is_403_with_limit() {
    let app = TestApp::with_limit(2);
    app.create("ann", "# one").await;
    app.create("ann", "# two").await;

    let (status, body) = app
        .json(post("ann", "/api/documents", json!({ "content": "# three" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "QUOTA_EXCEEDED");
    assert_eq!(body["details"]["limit"], 2);

    let (status, quota) = app.json(get("ann", "/api/documents/quota")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quota["allowed"], false);
    assert_eq!(quota["document_count"], 2);
    assert_eq!(quota["document_limit"], 2);
}

#[tokio::test]
async fn exempt_user_reports_unlimited() {
    let app = TestApp::with_limit(1);
    app.create("boss", "# one").await;
    app.create("boss", "# two").await;

    let (status, quota) = app.json(get("boss", "/api/documents/quota")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quota["unlimited"], true);
    assert!(quota["document_limit"].is_null());
    assert_eq!(quota["allowed"], true);
}

// =============================================================================
// Export and Preview
// =============================================================================

#[tokio::test]
async fn pdf_export_is_an_attachment() {
    let app = TestApp::new();
    let (status, bytes, headers) = app
        .send(post(
            "ann",
            "/api/export/pdf",
            json!({ "content": "# Hello\nworld", "title": "Hello" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename=\"Hello.pdf\""));
}

#[tokio::test]
async fn word_export_of_stored_document() {
    let app = TestApp::new();
    let id = app.create("ann", "# Stored doc\ntext").await;

    let (status, bytes, headers) = app
        .send(post("ann", "/api/export/word", json!({ "document_id": id })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("Stored doc.docx"));
}

#[tokio::test]
async fn exporting_someone_elses_document_is_404() {
    let app = TestApp::new();
    let id = app.create("ann", "# Ann's").await;

    let (status, _) = app
        .json(post("ben", "/api/export/pdf", json!({ "document_id": id })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_returns_html_fragment() {
    let app = TestApp::new();
    let (status, body) = app
        .json(post("ann", "/api/preview", json!({ "content": "# Hi\n\n<b>x</b>" })))
        .await;

    assert_eq!(status, StatusCode::OK);
    let html = body["html"].as_str().unwrap();
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn health_is_open() {
    let app = TestApp::new();
    let (status, body) = app
        .json(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
