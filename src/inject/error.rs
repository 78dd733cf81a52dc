//! Errors raised while inspecting a response for injection.

use thiserror::Error;

/// The response declared HTML but its length metadata cannot be adjusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponseError {
    /// No `content-length` header on the response.
    #[error("response has no content-length header")]
    MissingContentLength,

    /// `content-length` is present but not a non-negative integer.
    #[error("invalid content-length: {0}")]
    InvalidContentLength(String),
}
