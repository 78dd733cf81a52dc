//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router serving the static root
//! - Wire up middleware (tracing, request ID, timeout, injection)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::inject::{inject_html, HtmlInjector, Injection};

/// Static file server with HTML injection.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, injection: Arc<Injection>) -> Self {
        let injector = config.inject.enabled.then(|| {
            HtmlInjector::new(injection)
                .case_insensitive(config.inject.case_insensitive_content_type)
        });

        let router = Self::build_router(&config, injector);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, injector: Option<HtmlInjector>) -> Router {
        let static_files =
            ServeDir::new(&config.server.root_dir).append_index_html_on_directories(true);

        let mut router = Router::new().fallback_service(static_files);
        if let Some(injector) = injector {
            router = router.layer(middleware::from_fn_with_state(injector, inject_html));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root_dir = %self.config.server.root_dir.display(),
            inject = self.config.inject.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
