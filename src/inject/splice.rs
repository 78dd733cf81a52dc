//! Marker search and payload splicing.

use bytes::{Bytes, BytesMut};

/// Closing tag the payload is spliced in front of.
pub const DEFAULT_MARKER: &str = "</html>";

/// Payload used when the configuration does not name one.
pub const DEFAULT_PAYLOAD: &str = "<script>alert('injected!')</script>";

/// The fixed payload and marker pair, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    payload: Bytes,
    marker: Bytes,
    /// Whether a marker at offset 0 of a chunk counts as a match.
    match_at_start: bool,
}

impl Injection {
    /// Create an injection splicing `payload` before `marker`.
    pub fn new(payload: impl Into<Bytes>, marker: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            marker: marker.into(),
            match_at_start: false,
        }
    }

    /// Treat a marker at offset 0 of a chunk as a match.
    pub fn with_match_at_start(mut self, match_at_start: bool) -> Self {
        self.match_at_start = match_at_start;
        self
    }

    /// Bytes inserted before the marker.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Closing tag the payload is spliced in front of.
    pub fn marker(&self) -> &Bytes {
        &self.marker
    }

    /// Growth of a body that receives one splice.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Whether a marker at offset 0 counts.
    pub fn matches_at_start(&self) -> bool {
        self.match_at_start
    }

    /// True when splicing can never change a body.
    pub fn is_noop(&self) -> bool {
        self.payload.is_empty() || self.marker.is_empty()
    }

    /// Offset of the rightmost marker occurrence in `chunk`.
    ///
    /// An occurrence at offset 0 is only reported when `match_at_start`
    /// is set. Since the search is from the right, a marker at 0 means
    /// there is no other occurrence in the chunk.
    pub fn splice_point(&self, chunk: &[u8]) -> Option<usize> {
        let marker = &self.marker[..];
        if marker.is_empty() || chunk.len() < marker.len() {
            return None;
        }

        let offset = chunk.windows(marker.len()).rposition(|w| w == marker)?;
        (offset > 0 || self.match_at_start).then_some(offset)
    }

    /// Build `chunk[..i] + payload + chunk[i..]` into a fresh buffer,
    /// where `i` is the splice point. Returns `None` when there is no
    /// splice point.
    pub fn splice(&self, chunk: &[u8]) -> Option<Bytes> {
        let offset = self.splice_point(chunk)?;

        let mut out = BytesMut::with_capacity(chunk.len() + self.payload.len());
        out.extend_from_slice(&chunk[..offset]);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&chunk[offset..]);
        Some(out.freeze())
    }
}

impl Default for Injection {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD, DEFAULT_MARKER)
    }
}
