//! Response body wrapper that injects the payload as frames stream out.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use pin_project_lite::pin_project;

use crate::inject::splice::Injection;
use crate::inject::stream::StreamInjector;

pin_project! {
    /// Wraps an outgoing body and splices the payload into data frames.
    ///
    /// When the response already advertises the grown length, at most one
    /// frame is rewritten. If the body ends without a marker the length
    /// difference is made up with trailing spaces so the declared
    /// content-length stays exact.
    pub struct InjectBody<B> {
        #[pin]
        inner: B,
        injector: StreamInjector,
        committed: bool,
        // Bytes owed to a committed content-length until a splice happens.
        owed: usize,
        // Trailers held back while padding is flushed.
        held: Option<Frame<Bytes>>,
        done: bool,
    }
}

impl<B> InjectBody<B> {
    /// Wrap a body whose length was not declared up front.
    pub fn new(inner: B, injection: Arc<Injection>) -> Self {
        Self {
            inner,
            injector: StreamInjector::new(injection),
            committed: false,
            owed: 0,
            held: None,
            done: false,
        }
    }

    /// Wrap a body whose content-length was already grown by the payload length.
    pub fn with_committed_length(inner: B, injection: Arc<Injection>) -> Self {
        let owed = injection.payload_len();
        Self {
            inner,
            injector: StreamInjector::new(injection).with_max_splices(1),
            committed: true,
            owed,
            held: None,
            done: false,
        }
    }

    /// Number of frames rewritten so far.
    pub fn splices(&self) -> usize {
        self.injector.splices()
    }

    fn pending(&self) -> u64 {
        if self.injector.splices() == 0 {
            self.owed as u64
        } else {
            0
        }
    }
}

/// Take the padding still owed, if no splice paid for it.
fn take_padding(owed: &mut usize, injector: &StreamInjector) -> Option<Bytes> {
    let n = std::mem::take(owed);
    if n == 0 || injector.splices() > 0 {
        return None;
    }
    tracing::debug!(
        padding = n,
        "Marker not found in body; padding to declared content-length"
    );
    Some(Bytes::from(vec![b' '; n]))
}

impl<B> Body for InjectBody<B>
where
    B: Body<Data = Bytes>,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();

        if let Some(frame) = this.held.take() {
            return Poll::Ready(Some(Ok(frame)));
        }
        if *this.done {
            return Poll::Ready(None);
        }

        match ready!(this.inner.poll_frame(cx)) {
            Some(Ok(frame)) => match frame.into_data() {
                Ok(data) => Poll::Ready(Some(Ok(Frame::data(this.injector.process_bytes(data))))),
                Err(frame) => match take_padding(this.owed, this.injector) {
                    Some(padding) => {
                        *this.held = Some(frame);
                        Poll::Ready(Some(Ok(Frame::data(padding))))
                    }
                    None => Poll::Ready(Some(Ok(frame))),
                },
            },
            Some(Err(e)) => Poll::Ready(Some(Err(e))),
            None => {
                *this.done = true;
                Poll::Ready(take_padding(this.owed, this.injector).map(|p| Ok(Frame::data(p))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.done || (self.inner.is_end_stream() && self.pending() == 0)
    }

    fn size_hint(&self) -> SizeHint {
        let inner = self.inner.size_hint();

        if !self.committed {
            // Length not declared up front: splices may grow the body.
            let mut hint = SizeHint::new();
            hint.set_lower(inner.lower());
            return hint;
        }

        let pending = self.pending();
        let mut hint = SizeHint::new();
        hint.set_lower(inner.lower().saturating_add(pending));
        if let Some(upper) = inner.upper() {
            hint.set_upper(upper.saturating_add(pending));
        }
        hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};
    use futures_util::stream;
    use http_body_util::{BodyExt, Full, StreamBody};
    use std::convert::Infallible;

    fn injection() -> Arc<Injection> {
        Arc::new(Injection::new("<s/>", "</html>"))
    }

    fn chunked(
        chunks: &[&'static str],
    ) -> StreamBody<impl futures_util::Stream<Item = Result<Frame<Bytes>, Infallible>>> {
        let frames: Vec<_> = chunks
            .iter()
            .map(|&c| Ok::<_, Infallible>(Frame::data(Bytes::from_static(c.as_bytes()))))
            .collect();
        StreamBody::new(stream::iter(frames))
    }

    #[tokio::test]
    async fn test_single_frame_injected() {
        let body = InjectBody::new(Full::new(Bytes::from_static(b"<html>hi</html>")), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html>hi<s/></html>");
    }

    #[tokio::test]
    async fn test_multi_frame_order_preserved() {
        let body = InjectBody::new(chunked(&["<html>", "<body>hi", "</body></html>\n"]), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html><body>hi</body><s/></html>\n");
    }

    #[tokio::test]
    async fn test_marker_at_frame_start() {
        let body = InjectBody::new(chunked(&["<html>hi", "</html>"]), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html>hi</html>");

        let at_start = Arc::new(Injection::new("<s/>", "</html>").with_match_at_start(true));
        let body = InjectBody::new(chunked(&["<html>hi", "</html>"]), at_start);
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html>hi<s/></html>");
    }

    #[tokio::test]
    async fn test_split_marker_passes_through() {
        let body = InjectBody::new(chunked(&["<html>hi</ht", "ml>"]), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_committed_length_padded_when_marker_missing() {
        let body = InjectBody::with_committed_length(chunked(&["<p>hi</p>"]), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<p>hi</p>    ");
        assert_eq!(out.len(), "<p>hi</p>".len() + "<s/>".len());
    }

    #[tokio::test]
    async fn test_committed_length_splices_once() {
        let body = InjectBody::with_committed_length(chunked(&["a</html>", "b</html>"]), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "a<s/></html>b</html>");
    }

    #[tokio::test]
    async fn test_committed_length_uses_first_marker_frame() {
        // An early marker inside <pre> takes the only splice; the real
        // closing tag in a later frame is left alone.
        let frames = ["<html><pre></html></pre>", "<body>text</body></html>"];
        let body = InjectBody::with_committed_length(chunked(&frames), injection());
        let out = body.collect().await.unwrap().to_bytes();
        assert_eq!(out, "<html><pre><s/></html></pre><body>text</body></html>");
        assert_eq!(out.len(), frames.concat().len() + "<s/>".len());
    }

    #[test]
    fn test_committed_size_hint() {
        let inner = Full::new(Bytes::from_static(b"<html>hi</html>"));
        let body = InjectBody::with_committed_length(inner, injection());
        assert_eq!(body.size_hint().exact(), Some(19));

        let inner = Full::new(Bytes::from_static(b"<html>hi</html>"));
        let body = InjectBody::new(inner, injection());
        assert_eq!(body.size_hint().exact(), None);
        assert_eq!(body.size_hint().lower(), 15);
    }

    #[tokio::test]
    async fn test_padding_precedes_trailers() {
        let mut trailers = HeaderMap::new();
        trailers.insert("x-checksum", HeaderValue::from_static("abc"));
        let frames = vec![
            Ok::<_, Infallible>(Frame::data(Bytes::from_static(b"<p></p>"))),
            Ok(Frame::trailers(trailers)),
        ];
        let body = InjectBody::with_committed_length(StreamBody::new(stream::iter(frames)), injection());

        let collected = body.collect().await.unwrap();
        assert_eq!(collected.trailers().unwrap().get("x-checksum").unwrap(), "abc");
        assert_eq!(collected.to_bytes(), "<p></p>    ");
    }

    #[tokio::test]
    async fn test_inner_error_propagates() {
        let frames = vec![
            Ok(Frame::data(Bytes::from_static(b"<html>"))),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let body = InjectBody::new(StreamBody::new(stream::iter(frames)), injection());
        let err = body.collect().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::ConnectionReset);
    }
}
