//! In-memory, append-only aggregation of received chunks per source file.
//!
//! The [`Aggregator`] is created once at process start and shared with the
//! request handlers through [`crate::web::AppState`]. Its state lives for the
//! lifetime of the process and is discarded on shutdown; nothing is persisted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// A single accepted chunk. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRecord {
    pub idx: u64,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

/// Point-in-time counts across all file logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSnapshot {
    pub total_paths: usize,
    pub total_chunks: usize,
}

#[derive(Default)]
struct Logs {
    /// Path to chunks in arrival order
    by_path: HashMap<String, Vec<ChunkRecord>>,
    /// Running total across all paths
    total_chunks: usize,
}

/// Owner of the per-path chunk logs.
///
/// All reads and writes go through one mutex, so a snapshot never observes a
/// half-applied append. The lock is never held across I/O.
#[derive(Default)]
pub struct Aggregator {
    logs: Mutex<Logs>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Logs> {
        // Appends are single pushes, so a poisoned guard still holds a valid map.
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a chunk to the log for `path`, creating the log on first use.
    ///
    /// Chunks are stored in arrival order; `idx` is neither sorted nor
    /// deduplicated.
    pub fn record(&self, path: &str, idx: u64, content: &str, now: DateTime<Utc>) -> ChunkRecord {
        let record = ChunkRecord {
            idx,
            content: content.to_string(),
            received_at: now,
        };

        let mut logs = self.lock();
        let log = logs.by_path.entry(path.to_string()).or_default();
        log.push(record.clone());
        let position = log.len();
        logs.total_chunks += 1;

        debug!(path, idx, position, "Recorded chunk");
        record
    }

    /// Counts across all logs at call time.
    pub fn snapshot(&self) -> AggregateSnapshot {
        let logs = self.lock();
        AggregateSnapshot {
            total_paths: logs.by_path.len(),
            total_chunks: logs.total_chunks,
        }
    }

    /// Copy of the log for `path` in arrival order. Empty if unknown.
    pub fn chunks_for(&self, path: &str) -> Vec<ChunkRecord> {
        self.lock().by_path.get(path).cloned().unwrap_or_default()
    }

    /// Number of distinct paths seen so far
    pub fn file_count(&self) -> usize {
        self.lock().by_path.len()
    }

    /// Total number of stored chunks
    pub fn chunk_count(&self) -> usize {
        self.lock().total_chunks
    }
}
