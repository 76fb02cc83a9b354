//! Application state shared by the request handlers.

use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::auth::{KeyValidator, StaticKeyValidator};
use crate::config::AuthConfig;
use crate::indexer::ChunkIndexer;

/// Shared application state.
///
/// Cloned per request; the `Arc`s keep a single aggregator for the whole
/// process.
#[derive(Clone)]
pub struct AppState {
    /// Per-path chunk logs
    pub aggregator: Arc<Aggregator>,
    /// Authentication capability, `None` disables authentication
    pub validator: Option<Arc<dyn KeyValidator>>,
    /// Downstream indexing capability, if any
    pub indexer: Option<Arc<dyn ChunkIndexer>>,
}

impl AppState {
    /// State with a fresh aggregator and no authentication or indexer.
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            validator: None,
            indexer: None,
        }
    }

    /// State configured from the `[auth]` section.
    pub fn from_auth_config(aggregator: Arc<Aggregator>, auth: &AuthConfig) -> Self {
        let state = Self::new(aggregator);
        if auth.is_enabled() {
            state.with_validator(Arc::new(StaticKeyValidator::new(auth.api_keys.clone())))
        } else {
            state
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn KeyValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_indexer(mut self, indexer: Arc<dyn ChunkIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    pub fn auth_enabled(&self) -> bool {
        self.validator.is_some()
    }
}
