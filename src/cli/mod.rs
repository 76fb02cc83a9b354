use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chunk-ingest")]
#[command(author, version, about = "HTTP ingestion endpoint for editor code chunks")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file to .chunk-ingest/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Start the ingestion HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Accepted API key, may be repeated (added to configured keys)
        #[arg(long = "api-key")]
        api_keys: Vec<String>,
    },
}
