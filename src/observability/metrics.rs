//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inject_responses_total` (counter): responses inspected, by outcome
//! - `inject_splices_total` (counter): body chunks rewritten

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How the middleware handled a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Injected,
    Bypassed,
    Malformed,
    Encoded,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Injected => "injected",
            Outcome::Bypassed => "bypassed",
            Outcome::Malformed => "malformed",
            Outcome::Encoded => "encoded",
        }
    }
}

/// Start the Prometheus scrape endpoint. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_response(outcome: Outcome) {
    metrics::counter!("inject_responses_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_splice() {
    metrics::counter!("inject_splices_total").increment(1);
}
