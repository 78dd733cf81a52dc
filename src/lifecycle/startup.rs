//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the injection from validated config
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{build_injection, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the server with an already validated config.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let injection = Arc::new(build_injection(&config.inject)?);

    tracing::info!(
        root_dir = %config.server.root_dir.display(),
        payload_len = injection.payload_len(),
        marker = %String::from_utf8_lossy(injection.marker()),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if !config.server.root_dir.is_dir() {
        tracing::warn!(
            root_dir = %config.server.root_dir.display(),
            "Static root is not a directory; every request will 404"
        );
    }

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    HttpServer::new(config, injection)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
