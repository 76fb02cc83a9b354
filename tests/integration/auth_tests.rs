use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::test_harness::{TestHarness, TEST_API_KEY};

fn sample_chunk() -> serde_json::Value {
    json!({"path": "/a/b.py", "idx": 0, "content": "x=1"})
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let harness = TestHarness::with_auth();

    let (status, body) = harness.post_chunk(sample_chunk(), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization header required");
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthorized() {
    let harness = TestHarness::with_auth();
    let body = serde_json::to_vec(&sample_chunk()).unwrap();

    let (status, body) = harness
        .post_chunk_raw(body, Some(&format!("Basic {}", TEST_API_KEY)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization header required");
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_invalid_key_is_unauthorized() {
    let harness = TestHarness::with_auth();

    let (status, body) = harness.post_chunk(sample_chunk(), Some("wrong-key")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid API key");
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_valid_key_is_accepted() {
    let harness = TestHarness::with_auth();

    let (status, body) = harness.post_chunk(sample_chunk(), Some(TEST_API_KEY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["language"], "python");
    assert_eq!(harness.total_chunks(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_checked_before_auth() {
    let harness = TestHarness::with_auth();

    let (status, _) = harness.post_chunk_raw("{", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_needs_no_auth() {
    let harness = TestHarness::with_auth();

    let (status, _) = harness.get("/index/status").await;

    assert_eq!(status, StatusCode::OK);
}
