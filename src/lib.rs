pub mod aggregator;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod indexer;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod web;

pub use aggregator::{AggregateSnapshot, Aggregator, ChunkRecord};
pub use config::Config;
pub use error::IngestError;
