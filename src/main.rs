//! html-inject: static file server with on-the-fly HTML injection.
//!
//! # Architecture Overview
//!
//! ```text
//! Client Request
//!     → SetRequestId / Trace / Timeout layers
//!     → inject middleware ─────▶ ServeDir (root_dir)
//!                                    │
//!     ← InjectBody (per chunk) ◀─────┘ headers.rs adjusts content-length
//! Client Response
//! ```

use std::path::PathBuf;

use clap::Parser;

use html_inject::config::{load_config, validate_config, ConfigError, ServerConfig};
use html_inject::lifecycle::startup;
use html_inject::observability::logging;

#[derive(Parser)]
#[command(name = "html-inject")]
#[command(about = "Serve static files and inject a script into HTML pages", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to serve.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// File whose contents are injected.
    #[arg(long)]
    payload: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(root) = self.root {
            config.server.root_dir = root;
        }
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }
        if let Some(payload) = self.payload {
            config.inject.payload_file = Some(payload);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);
    tracing::info!("html-inject v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
