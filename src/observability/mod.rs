//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! inject / http subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (injection outcome counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Metrics are cheap (atomic increments), recorded even without an exporter

pub mod logging;
pub mod metrics;
