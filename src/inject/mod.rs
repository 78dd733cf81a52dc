//! HTML injection subsystem.
//!
//! # Data Flow
//! ```text
//! static file response (ServeDir)
//!     → middleware.rs (engage? content-type, encoding, status)
//!     → headers.rs (content-length += payload length)
//!     → body.rs (wrap outgoing body)
//!     → stream.rs (per-chunk transform)
//!     → splice.rs (last marker search, prefix + payload + suffix)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Payload and marker are fixed at startup and shared via Arc
//! - Chunks are processed independently; a marker split across two
//!   chunks is not detected
//! - Injection never fails a request; problems are logged and the
//!   response goes out unmodified

pub mod body;
pub mod error;
pub mod headers;
pub mod middleware;
pub mod splice;
pub mod stream;

pub use body::InjectBody;
pub use error::MalformedResponseError;
pub use middleware::{inject_html, HtmlInjector};
pub use splice::{Injection, DEFAULT_MARKER, DEFAULT_PAYLOAD};
pub use stream::{Chunk, InjectStream, StreamInjector};
