//! Optional downstream indexing capability.
//!
//! The ingestion pipeline does not analyze code itself. A host can plug in a
//! [`ChunkIndexer`] that receives each accepted chunk; whatever it returns is
//! passed through to the client untouched.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ChunkIndexer: Send + Sync {
    /// Index `content` originating from `path` and return an opaque result.
    async fn index(&self, path: &str, content: &str) -> Result<Value>;

    /// Name for logging
    fn name(&self) -> &'static str;
}
