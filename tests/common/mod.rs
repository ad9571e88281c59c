//! Shared utilities for assembler integration tests.

use std::fs;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

/// Create a temporary routes directory containing empty `files`.
pub fn route_tree(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// route module\n").unwrap();
    }
    dir
}

/// Dispatch a GET request and collect status and body.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let res = app
        .clone()
        .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Ordered event log shared between loaders and setup functions.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
pub async fn tag_first(mut req: Request, next: Next) -> Response {
    req.headers_mut()
        .append("x-chain", HeaderValue::from_static("first"));
    next.run(req).await
}

#[allow(dead_code)]
pub async fn tag_second(mut req: Request, next: Next) -> Response {
    req.headers_mut()
        .append("x-chain", HeaderValue::from_static("second"));
    next.run(req).await
}

/// Handler echoing the middleware chain recorded in `x-chain`.
#[allow(dead_code)]
pub async fn chain(headers: HeaderMap) -> String {
    headers
        .get_all("x-chain")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(",")
}
