//! Ingestion server command.
//!
//! Builds the aggregator once for the lifetime of the process and serves the
//! chunk endpoints until shutdown.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::web::{AppState, IngestServer};

/// Command-line overrides for `serve`.
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_keys: Vec<String>,
}

/// Merge CLI overrides into the loaded config.
pub fn apply_overrides(mut config: Config, options: ServeOptions) -> Config {
    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    config.auth.api_keys.extend(options.api_keys);
    config
}

fn bind_addr(config: &Config) -> Result<SocketAddr> {
    format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })
}

pub async fn run(config: Config, options: ServeOptions) -> Result<()> {
    let config = apply_overrides(config, options);
    let addr = bind_addr(&config)?;

    let aggregator = Arc::new(Aggregator::new());
    let state = AppState::from_auth_config(aggregator, &config.auth);

    if state.auth_enabled() {
        info!("Authentication enabled");
    } else {
        info!("Authentication disabled, accepting all chunk submissions");
    }

    IngestServer::new(state)
        .with_cors(config.server.cors)
        .with_body_limit(config.server.max_body_bytes)
        .start(addr)
        .await
}
