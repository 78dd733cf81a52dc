//! Static file server that injects a script into HTML responses.

pub mod config;
pub mod http;
pub mod inject;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use inject::{HtmlInjector, InjectBody, Injection, StreamInjector};
pub use lifecycle::Shutdown;
