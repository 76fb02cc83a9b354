//! HTTP request handlers for chunk ingestion and status.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::state::AppState;
use crate::auth;
use crate::error::IngestError;
use crate::language::{file_extension, line_count, Language};
use crate::metrics;

/// Service identifier reported by the status endpoint.
pub const SERVICE_NAME: &str = "vscode-mcp-integration";

/// Chunk submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkRequest {
    /// Absolute path of the source file
    pub path: String,
    /// Position of the chunk within the file
    pub idx: u64,
    /// Raw source text, may be empty
    pub content: String,
}

impl ChunkRequest {
    fn validate(&self) -> Result<(), IngestError> {
        if self.path.is_empty() {
            return Err(IngestError::MalformedPayload(
                "field `path` must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-request processing summary. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub file_path: String,
    pub chunk_index: u64,
    pub file_extension: String,
    pub content_length: usize,
    pub lines_count: usize,
    pub language: Language,
    pub analysis: &'static str,
    /// Opaque value from the downstream indexer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    pub processed_at: DateTime<Utc>,
}

/// Successful chunk submission response.
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub status: &'static str,
    pub message: String,
    pub result: ProcessingResult,
}

#[derive(Debug, Serialize)]
pub struct EndpointsDescription {
    #[serde(rename = "POST /index/chunk")]
    pub submit_chunk: &'static str,
    #[serde(rename = "GET /index/status")]
    pub status: &'static str,
}

const ENDPOINTS: EndpointsDescription = EndpointsDescription {
    submit_chunk: "Receive code chunks from VS Code",
    status: "Get indexing status",
};

/// Status response payload.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub timestamp: String,
    /// Total chunk records across all paths
    pub chunks_processed: usize,
    pub endpoints: EndpointsDescription,
}

/// Receive a code chunk.
///
/// POST /index/chunk
pub async fn receive_chunk(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChunkResponse>, IngestError> {
    let body = body?;
    let chunk: ChunkRequest = serde_json::from_slice(&body)?;
    chunk.validate()?;

    info!(
        path = %chunk.path,
        idx = chunk.idx,
        content_length = chunk.content.chars().count(),
        "Received chunk"
    );

    auth::authenticate(state.validator.as_deref(), &headers).await?;

    let result = process_chunk(&state, &chunk).await?;

    info!(
        path = %chunk.path,
        idx = chunk.idx,
        language = %result.language,
        "Processed chunk"
    );

    Ok(Json(ChunkResponse {
        status: "ok",
        message: format!("Processed chunk {} from {}", chunk.idx, chunk.path),
        result,
    }))
}

/// Classify, hand off to the indexer if present, then append.
///
/// The indexer runs before the append so a failing indexer leaves the
/// aggregator untouched.
async fn process_chunk(
    state: &AppState,
    chunk: &ChunkRequest,
) -> Result<ProcessingResult, IngestError> {
    let extension = file_extension(&chunk.path);
    let language = Language::from_extension(extension);
    let content_length = chunk.content.chars().count();

    let index = match &state.indexer {
        Some(indexer) => {
            debug!(indexer = indexer.name(), path = %chunk.path, "Invoking indexer");
            let value = indexer
                .index(&chunk.path, &chunk.content)
                .await
                .map_err(|e| {
                    IngestError::InternalProcessingError(format!(
                        "{} indexer failed: {:#}",
                        indexer.name(),
                        e
                    ))
                })?;
            Some(value)
        }
        None => None,
    };

    state
        .aggregator
        .record(&chunk.path, chunk.idx, &chunk.content, Utc::now());

    let snapshot = state.aggregator.snapshot();
    metrics::observe_accepted(content_length, snapshot.total_paths, snapshot.total_chunks);

    Ok(ProcessingResult {
        file_path: chunk.path.clone(),
        chunk_index: chunk.idx,
        file_extension: extension.to_string(),
        content_length,
        lines_count: line_count(&chunk.content),
        language,
        analysis: language.analysis(),
        index,
        processed_at: Utc::now(),
    })
}

/// Report liveness and aggregate counters.
///
/// GET /index/status
pub async fn index_status(State(state): State<AppState>) -> Json<StatusResponse> {
    metrics::STATUS_REQUESTS.inc();
    let snapshot = state.aggregator.snapshot();

    Json(StatusResponse {
        service: SERVICE_NAME,
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        chunks_processed: snapshot.total_chunks,
        endpoints: ENDPOINTS,
    })
}

/// Prometheus metrics endpoint.
///
/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let output = metrics::gather_metrics();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], output)
}
