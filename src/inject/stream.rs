//! Per-chunk injection transform.
//!
//! Each chunk is scanned on its own. Nothing is buffered across chunk
//! boundaries, so a marker split across two chunks passes through
//! untouched.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use pin_project_lite::pin_project;

use crate::inject::splice::Injection;
use crate::observability::metrics;

/// One unit of a streamed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Raw body bytes.
    Bytes(Bytes),
    /// Already-decoded text. Never rewritten.
    Text(String),
}

impl From<Bytes> for Chunk {
    fn from(b: Bytes) -> Self {
        Chunk::Bytes(b)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(v: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(v))
    }
}

impl From<&'static [u8]> for Chunk {
    fn from(b: &'static [u8]) -> Self {
        Chunk::Bytes(Bytes::from_static(b))
    }
}

impl From<String> for Chunk {
    fn from(s: String) -> Self {
        Chunk::Text(s)
    }
}

/// Chunk transform for a single response. Create one per response.
#[derive(Debug, Clone)]
pub struct StreamInjector {
    injection: Arc<Injection>,
    max_splices: Option<usize>,
    splices: usize,
}

impl StreamInjector {
    /// Create a transform with no splice limit.
    pub fn new(injection: Arc<Injection>) -> Self {
        Self {
            injection,
            max_splices: None,
            splices: 0,
        }
    }

    /// Stop splicing once `max` chunks have been rewritten.
    pub fn with_max_splices(mut self, max: usize) -> Self {
        self.max_splices = Some(max);
        self
    }

    /// Number of chunks rewritten so far.
    pub fn splices(&self) -> usize {
        self.splices
    }

    fn exhausted(&self) -> bool {
        self.max_splices.is_some_and(|max| self.splices >= max)
    }

    /// Splice the payload into `data` if it holds the marker.
    pub fn process_bytes(&mut self, data: Bytes) -> Bytes {
        if self.exhausted() {
            return data;
        }

        match self.injection.splice(&data) {
            Some(out) => {
                self.splices += 1;
                metrics::record_splice();
                tracing::trace!(
                    chunk_len = data.len(),
                    payload_len = self.injection.payload_len(),
                    "Payload spliced into chunk"
                );
                out
            }
            None => data,
        }
    }

    /// Transform one chunk. Text chunks are forwarded with a warning.
    pub fn process(&mut self, chunk: Chunk) -> Chunk {
        match chunk {
            Chunk::Bytes(data) => Chunk::Bytes(self.process_bytes(data)),
            Chunk::Text(text) => {
                tracing::warn!(
                    chunk_len = text.len(),
                    "Unexpected chunk encoding (text), forwarding unmodified"
                );
                Chunk::Text(text)
            }
        }
    }
}

pin_project! {
    /// Stream adaptor running a [`StreamInjector`] over fallible chunks.
    ///
    /// Errors are forwarded in place, in order.
    pub struct InjectStream<S> {
        #[pin]
        inner: S,
        injector: StreamInjector,
    }
}

impl<S> InjectStream<S> {
    /// Run `injector` over every chunk of `inner`.
    pub fn new(inner: S, injector: StreamInjector) -> Self {
        Self { inner, injector }
    }
}

impl<S, C, E> Stream for InjectStream<S>
where
    S: Stream<Item = Result<C, E>>,
    C: Into<Chunk>,
{
    type Item = Result<Chunk, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let item = ready!(this.inner.poll_next(cx));
        Poll::Ready(item.map(|res| res.map(|chunk| this.injector.process(chunk.into()))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
