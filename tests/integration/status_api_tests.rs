use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::helpers::test_harness::TestHarness;

#[tokio::test]
async fn test_status_on_fresh_service() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/index/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "vscode-mcp-integration");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["chunks_processed"], 0);
    assert_eq!(
        body["endpoints"]["POST /index/chunk"],
        "Receive code chunks from VS Code"
    );
    assert_eq!(body["endpoints"]["GET /index/status"], "Get indexing status");

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.parse::<DateTime<Utc>>().is_ok());
}

#[tokio::test]
async fn test_status_counts_chunks_not_paths() {
    let harness = TestHarness::new();

    harness
        .post_chunk(json!({"path": "/a.py", "idx": 0, "content": "a"}), None)
        .await;
    harness
        .post_chunk(json!({"path": "/a.py", "idx": 1, "content": "b"}), None)
        .await;

    let (status, body) = harness.get("/index/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chunks_processed"], 2);
    assert_eq!(harness.aggregator.snapshot().total_paths, 1);
}

#[tokio::test]
async fn test_rejected_chunks_are_not_counted() {
    let harness = TestHarness::new();

    harness.post_chunk_raw("nope", None).await;
    harness
        .post_chunk(json!({"path": "/ok.js", "idx": 0, "content": "1"}), None)
        .await;

    let (_, body) = harness.get("/index/status").await;

    assert_eq!(body["chunks_processed"], 1);
}

#[tokio::test]
async fn test_metrics_endpoint_is_text() {
    let harness = TestHarness::new();

    // Body is Prometheus text, not JSON
    let (status, body) = harness.get("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}
