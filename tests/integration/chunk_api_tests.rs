use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::mock_indexer::{FailingIndexer, RecordingIndexer};
use crate::helpers::test_harness::TestHarness;

#[tokio::test]
async fn test_python_chunk_is_processed() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_chunk(json!({"path": "/a/b.py", "idx": 0, "content": "x=1"}), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Processed chunk 0 from /a/b.py");

    let result = &body["result"];
    assert_eq!(result["file_path"], "/a/b.py");
    assert_eq!(result["chunk_index"], 0);
    assert_eq!(result["file_extension"], "py");
    assert_eq!(result["language"], "python");
    assert_eq!(result["analysis"], "Python file processed");
    assert_eq!(result["content_length"], 3);
    assert_eq!(result["lines_count"], 1);
    assert!(result["processed_at"].is_string());
    assert!(result.get("index").is_none());

    assert_eq!(harness.total_chunks(), 1);
}

#[tokio::test]
async fn test_language_classification_in_response() {
    let harness = TestHarness::new();

    for (path, extension, language) in [
        ("/web/app.ts", "ts", "typescript/javascript"),
        ("/web/app.js", "js", "typescript/javascript"),
        ("/docs/notes.txt", "txt", "generic"),
        ("/bin/Makefile", "", "generic"),
    ] {
        let (status, body) = harness
            .post_chunk(json!({"path": path, "idx": 1, "content": "a\nb"}), None)
            .await;

        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["result"]["file_extension"], extension);
        assert_eq!(body["result"]["language"], language);
        assert_eq!(body["result"]["lines_count"], 2);
    }
}

#[tokio::test]
async fn test_empty_content_is_accepted() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_chunk(json!({"path": "/empty.rs", "idx": 0, "content": ""}), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["content_length"], 0);
    assert_eq!(body["result"]["lines_count"], 1);
}

#[tokio::test]
async fn test_content_length_counts_characters() {
    let harness = TestHarness::new();

    let (_, body) = harness
        .post_chunk(json!({"path": "/u.py", "idx": 0, "content": "héllo"}), None)
        .await;

    assert_eq!(body["result"]["content_length"], 5);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let harness = TestHarness::new();

    let (status, body) = harness.post_chunk_raw("{not json", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_missing_or_mistyped_fields_are_rejected() {
    let harness = TestHarness::new();

    for chunk in [
        json!({"idx": 0, "content": "x"}),
        json!({"path": "/a.py", "content": "x"}),
        json!({"path": "/a.py", "idx": 0}),
        json!({"path": "/a.py", "idx": -1, "content": "x"}),
        json!({"path": "/a.py", "idx": "zero", "content": "x"}),
        json!({"path": 42, "idx": 0, "content": "x"}),
        json!({"path": "", "idx": 0, "content": "x"}),
    ] {
        let (status, body) = harness.post_chunk(chunk.clone(), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", chunk);
        assert!(body["error"].is_string());
    }

    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_duplicate_submissions_double_the_count() {
    let harness = TestHarness::new();
    let chunk = json!({"path": "/a.py", "idx": 0, "content": "x=1"});

    harness.post_chunk(chunk.clone(), None).await;
    harness.post_chunk(chunk, None).await;

    assert_eq!(harness.total_chunks(), 2);
    assert_eq!(harness.aggregator.chunks_for("/a.py").len(), 2);
}

#[tokio::test]
async fn test_chunks_keep_arrival_order() {
    let harness = TestHarness::new();

    for idx in [2, 0, 1] {
        let (status, _) = harness
            .post_chunk(
                json!({"path": "/src/lib.rs", "idx": idx, "content": format!("part {}", idx)}),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let stored: Vec<u64> = harness
        .aggregator
        .chunks_for("/src/lib.rs")
        .iter()
        .map(|c| c.idx)
        .collect();
    assert_eq!(stored, vec![2, 0, 1]);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let harness = TestHarness::with_body_limit(64);
    let content = "x".repeat(1024);

    let (status, body) = harness
        .post_chunk(json!({"path": "/big.py", "idx": 0, "content": content}), None)
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_indexer_result_is_returned() {
    let indexer = Arc::new(RecordingIndexer::default());
    let harness = TestHarness::with_indexer(indexer.clone());

    let (status, body) = harness
        .post_chunk(json!({"path": "/a.ts", "idx": 3, "content": "let a;"}), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["index"]["indexed"], "/a.ts");
    assert_eq!(body["result"]["index"]["bytes"], 6);
    assert_eq!(indexer.call_count(), 1);
}

#[tokio::test]
async fn test_indexer_failure_is_internal_error() {
    let harness = TestHarness::with_indexer(Arc::new(FailingIndexer));

    let (status, body) = harness
        .post_chunk(json!({"path": "/a.py", "idx": 0, "content": "x=1"}), None)
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Processing error"));
    assert!(error.contains("backend unavailable"));
    assert_eq!(harness.total_chunks(), 0);
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let harness = TestHarness::new();

    let (status, _) = harness.get("/index/chunk").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
