//! Error taxonomy for the relay.
//!
//! Every variant maps to exactly one HTTP status; each error terminates only
//! its own request/response cycle and nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::resolve::ResolveError;

/// Errors surfaced to callers as HTTP error responses.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Wrong HTTP verb on a control endpoint.
    #[error("only {0} requests are supported")]
    MethodNotAllowed(&'static str),

    /// The control-write body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(axum::Error),

    /// The control-write body is not valid JSON for the expected shape.
    #[error("failed to decode request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The decoded `url` field was empty.
    #[error("url must not be empty")]
    MissingUrl,

    /// A forward was attempted before any successful control write.
    #[error("no upstream target configured, call /proxy/info first")]
    TargetNotSet,

    /// The stored base URL or the combined target could not be parsed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The outbound request could not be constructed.
    #[error("failed to build upstream request: {0}")]
    BuildRequest(#[from] axum::http::Error),

    /// Transport-level failure reaching the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The optional per-forward deadline expired before response headers.
    #[error("upstream did not respond within {0} seconds")]
    UpstreamTimeout(u64),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyRead(_)
            | Self::MalformedBody(_)
            | Self::MissingUrl
            | Self::TargetNotSet
            | Self::Resolve(_) => StatusCode::BAD_REQUEST,
            Self::BuildRequest(_) | Self::Upstream(_) | Self::UpstreamTimeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}
