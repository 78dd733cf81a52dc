//! Response header inspection and content-length adjustment.
//!
//! # Responsibilities
//! - Decide whether a response is HTML
//! - Detect bodies that are not plain bytes (content-encoding)
//! - Rewrite content-length to account for the injected payload

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

use crate::inject::error::MalformedResponseError;

/// Content-type prefix that marks a response as HTML.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Whether `content-type` starts with `text/html`.
///
/// With `case_insensitive` unset this is the plain byte prefix match.
pub fn is_html(headers: &HeaderMap, case_insensitive: bool) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    if case_insensitive {
        content_type
            .get(..HTML_CONTENT_TYPE.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(HTML_CONTENT_TYPE))
    } else {
        content_type.starts_with(HTML_CONTENT_TYPE)
    }
}

/// Whether the body bytes are transformed (gzip, br, ...) on the wire.
pub fn is_encoded(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::CONTENT_ENCODING)
        .iter()
        .any(|v| !v.as_bytes().eq_ignore_ascii_case(b"identity"))
}

/// Whether the response carries a complete body that can be rewritten.
///
/// Partial content and bodiless statuses are left alone.
pub fn carries_full_body(status: StatusCode, headers: &HeaderMap) -> bool {
    if status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::PARTIAL_CONTENT
        || status == StatusCode::NOT_MODIFIED
    {
        return false;
    }
    !headers.contains_key(header::CONTENT_RANGE)
}

/// Parse the declared `content-length`.
pub fn content_length(headers: &HeaderMap) -> Result<u64, MalformedResponseError> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(MalformedResponseError::MissingContentLength)?;

    let text = value
        .to_str()
        .map_err(|_| MalformedResponseError::InvalidContentLength(format!("{:?}", value)))?;

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedResponseError::InvalidContentLength(text.to_string()));
    }

    text.parse::<u64>()
        .map_err(|_| MalformedResponseError::InvalidContentLength(text.to_string()))
}

/// Overwrite `content-length` with `original + payload_len`.
///
/// Headers are left untouched on error.
pub fn adjust_content_length(
    headers: &mut HeaderMap,
    payload_len: usize,
) -> Result<u64, MalformedResponseError> {
    let original = content_length(headers)?;
    let adjusted = original
        .checked_add(payload_len as u64)
        .ok_or_else(|| MalformedResponseError::InvalidContentLength(original.to_string()))?;

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(adjusted));
    Ok(adjusted)
}
