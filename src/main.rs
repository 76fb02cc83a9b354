use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use chunk_ingest::cli::{Cli, Commands};
use chunk_ingest::commands::serve::ServeOptions;
use chunk_ingest::config::Config;
use chunk_ingest::logging::{init_early_logging, init_logging};
use chunk_ingest::metrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match Config::load(&root) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            tracing::error!("{:#}", e);
            return Err(e);
        }
    };

    // Held until exit so buffered logs are flushed
    let _logging_guard = init_logging(&config.logging, &root)?;

    tracing::debug!("Loaded configuration from: {}", root.display());

    metrics::register_metrics();

    match cli.command {
        Commands::Init { force } => {
            chunk_ingest::commands::init::run(&root, force)?;
        }
        Commands::Serve {
            host,
            port,
            api_keys,
        } => {
            let options = ServeOptions {
                host,
                port,
                api_keys,
            };
            chunk_ingest::commands::serve::run(config, options).await?;
        }
    }

    Ok(())
}
