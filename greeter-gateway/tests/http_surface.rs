//! Property tests over the public HTTP surface.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; no socket
//! is opened.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use greeter_gateway::routes::{create_router, AppState};
use proptest::prelude::*;
use tower::ServiceExt;

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => panic!("failed to build runtime: {e}"),
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{other:02X}"),
        })
        .collect()
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = match Request::builder().uri(uri).body(Body::empty()) {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    };
    let resp = match app.oneshot(req).await {
        Ok(r) => r,
        Err(e) => panic!("handler error: {e}"),
    };
    let status = resp.status();
    let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
        Ok(b) => b,
        Err(e) => panic!("failed to read body: {e}"),
    };
    match serde_json::from_slice(&bytes) {
        Ok(v) => (status, v),
        Err(e) => panic!("invalid JSON: {e}"),
    }
}

proptest! {
    #[test]
    fn hello_query_echoes_any_string(name in "\\PC{0,64}") {
        let app = create_router(AppState::default());
        let (status, body) = runtime().block_on(get(app, &format!("/hello?name={}", encode(&name))));
        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(&body["message"], &serde_json::Value::String(format!("Hello, {name}")));
    }

    #[test]
    fn hello_path_greets_path_safe_names(name in "[A-Za-z0-9_-]{1,40}") {
        let app = create_router(AppState::default());
        let (status, body) = runtime().block_on(get(app, &format!("/hello/{name}")));
        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(&body["message"], &serde_json::Value::String(format!("Hello, {name}!")));
    }

    #[test]
    fn unknown_top_level_paths_are_404(segment in "[a-z]{3,16}") {
        prop_assume!(!["hello", "health", "metrics"].contains(&segment.as_str()));
        let app = create_router(AppState::default());
        let (status, _) = runtime().block_on(get(app, &format!("/{segment}")));
        prop_assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn metrics_identical_under_concurrent_calls() {
    let app = create_router(AppState::default());
    let calls: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { get(app, "/metrics").await })
        })
        .collect();
    let mut bodies = Vec::new();
    for call in calls {
        match call.await {
            Ok((status, body)) => {
                assert_eq!(status, StatusCode::OK);
                bodies.push(body);
            }
            Err(e) => panic!("task failed: {e}"),
        }
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]), "metrics must not vary between calls");
}
