//! Prometheus metrics for the chunk ingestion service
//!
//! Counters and gauges live in a process-wide registry and are exposed in the
//! text exposition format on `GET /metrics`.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Ingestion metrics
    // ============================================================================

    /// Chunks accepted and appended to the aggregator
    pub static ref CHUNKS_ACCEPTED: IntCounter = IntCounter::with_opts(
        Opts::new(
            "chunk_ingest_chunks_accepted_total",
            "Total number of chunks accepted"
        )
    ).expect("Failed to create CHUNKS_ACCEPTED counter");

    /// Failed requests, labelled by error kind
    pub static ref REQUEST_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "chunk_ingest_request_errors_total",
            "Total number of failed requests by error kind"
        ),
        &["kind"]
    ).expect("Failed to create REQUEST_ERRORS counter");

    /// Size of accepted chunk content in characters
    pub static ref CHUNK_SIZE: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "chunk_ingest_chunk_size_chars",
            "Size of accepted chunk content in characters"
        ).buckets(vec![0.0, 256.0, 1024.0, 4096.0, 16384.0, 65536.0, 262144.0])
    ).expect("Failed to create CHUNK_SIZE histogram");

    // ============================================================================
    // Aggregate state
    // ============================================================================

    /// Distinct file paths seen
    pub static ref TRACKED_FILES: IntGauge = IntGauge::with_opts(
        Opts::new(
            "chunk_ingest_tracked_files",
            "Number of distinct file paths with at least one chunk"
        )
    ).expect("Failed to create TRACKED_FILES gauge");

    /// Chunks held in memory
    pub static ref TRACKED_CHUNKS: IntGauge = IntGauge::with_opts(
        Opts::new(
            "chunk_ingest_tracked_chunks",
            "Number of chunks held by the aggregator"
        )
    ).expect("Failed to create TRACKED_CHUNKS gauge");

    /// Status endpoint hits
    pub static ref STATUS_REQUESTS: IntCounter = IntCounter::with_opts(
        Opts::new(
            "chunk_ingest_status_requests_total",
            "Total number of status requests"
        )
    ).expect("Failed to create STATUS_REQUESTS counter");
}

/// Register all metrics with the global registry
///
/// This function should be called once at application startup.
/// Panics if metrics registration fails.
pub fn register_metrics() {
    REGISTRY
        .register(Box::new(CHUNKS_ACCEPTED.clone()))
        .expect("Failed to register CHUNKS_ACCEPTED");
    REGISTRY
        .register(Box::new(REQUEST_ERRORS.clone()))
        .expect("Failed to register REQUEST_ERRORS");
    REGISTRY
        .register(Box::new(CHUNK_SIZE.clone()))
        .expect("Failed to register CHUNK_SIZE");
    REGISTRY
        .register(Box::new(TRACKED_FILES.clone()))
        .expect("Failed to register TRACKED_FILES");
    REGISTRY
        .register(Box::new(TRACKED_CHUNKS.clone()))
        .expect("Failed to register TRACKED_CHUNKS");
    REGISTRY
        .register(Box::new(STATUS_REQUESTS.clone()))
        .expect("Failed to register STATUS_REQUESTS");
}

/// Gather all metrics and encode them in Prometheus text format
///
/// Returns an empty string if encoding fails.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}

/// Record an accepted chunk and refresh the aggregate gauges.
pub fn observe_accepted(content_length: usize, files: usize, chunks: usize) {
    CHUNKS_ACCEPTED.inc();
    CHUNK_SIZE.observe(content_length as f64);
    TRACKED_FILES.set(files as i64);
    TRACKED_CHUNKS.set(chunks as i64);
}
