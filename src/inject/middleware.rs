//! Response hook that engages injection for HTML responses.
//!
//! # Responsibilities
//! - Inspect each outgoing response once
//! - Adjust content-length and wrap the body for HTML responses
//! - Pass everything else through untouched
//!
//! # Design Decisions
//! - Never fails a request: malformed metadata only skips injection
//! - HEAD responses get the adjusted header but no body wrapper

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{response::Parts, Method},
    middleware::Next,
    response::Response,
};

use crate::inject::body::InjectBody;
use crate::inject::error::MalformedResponseError;
use crate::inject::headers;
use crate::inject::splice::Injection;
use crate::observability::metrics::{self, Outcome};

/// What to do with a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    /// Forward untouched.
    Bypass,
    /// Content-length grown to the given value.
    Committed(u64),
    /// No declared length; inject freely.
    Unsized,
}

/// Shared state for the injection middleware.
#[derive(Debug, Clone)]
pub struct HtmlInjector {
    injection: Arc<Injection>,
    case_insensitive: bool,
}

impl HtmlInjector {
    /// Injector matching content-type case-insensitively.
    pub fn new(injection: Arc<Injection>) -> Self {
        Self {
            injection,
            case_insensitive: true,
        }
    }

    /// Fold case when matching the `text/html` content-type prefix.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    fn plan(&self, parts: &mut Parts) -> Plan {
        if self.injection.is_noop() || !headers::is_html(&parts.headers, self.case_insensitive) {
            metrics::record_response(Outcome::Bypassed);
            return Plan::Bypass;
        }

        if !headers::carries_full_body(parts.status, &parts.headers) {
            tracing::debug!(status = %parts.status, "HTML response without a full body, skipping injection");
            metrics::record_response(Outcome::Bypassed);
            return Plan::Bypass;
        }

        if headers::is_encoded(&parts.headers) {
            tracing::warn!(
                content_encoding = ?parts.headers.get(axum::http::header::CONTENT_ENCODING),
                "Unexpected encoding on HTML response, skipping injection"
            );
            metrics::record_response(Outcome::Encoded);
            return Plan::Bypass;
        }

        match headers::adjust_content_length(&mut parts.headers, self.injection.payload_len()) {
            Ok(length) => {
                metrics::record_response(Outcome::Injected);
                Plan::Committed(length)
            }
            Err(MalformedResponseError::MissingContentLength) => {
                tracing::debug!("HTML response has no content-length, injecting into unsized body");
                metrics::record_response(Outcome::Injected);
                Plan::Unsized
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed HTML response, skipping injection");
                metrics::record_response(Outcome::Malformed);
                Plan::Bypass
            }
        }
    }

    /// Rewrite `response` if it is an HTML document.
    pub fn apply(&self, response: Response, method: &Method) -> Response {
        let (mut parts, body) = response.into_parts();
        let plan = self.plan(&mut parts);

        let body = match plan {
            Plan::Bypass => body,
            _ if method == Method::HEAD => body,
            Plan::Committed(length) => {
                tracing::debug!(content_length = length, "Injecting payload into HTML response");
                Body::new(InjectBody::with_committed_length(body, self.injection.clone()))
            }
            Plan::Unsized => Body::new(InjectBody::new(body, self.injection.clone())),
        };

        Response::from_parts(parts, body)
    }
}

/// Axum middleware entry point; install with `from_fn_with_state`.
pub async fn inject_html(
    State(injector): State<HtmlInjector>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let response = next.run(request).await;
    injector.apply(response, &method)
}
