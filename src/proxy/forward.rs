//! The request-forwarding pipeline.
//!
//! # Responsibilities
//! - Snapshot the current upstream target
//! - Resolve the full upstream URL for the inbound path
//! - Rebuild the request: copy headers minus Host, cookie override,
//!   conditional Range forcing (precedence in exactly that order)
//! - Send upstream and stream the response back without buffering

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Response},
};
use http_body_util::BodyExt;

use crate::error::ProxyError;
use crate::http::server::AppState;
use crate::proxy::resolve::resolve_upstream;

/// Path family that is always fetched as a full ranged request, overriding
/// whatever Range the original caller asked for.
const FORCED_RANGE_PATH: &str = "/v/api/v1/media/range/";

/// Catch-all handler: forward the inbound request to the current upstream
/// target and relay the response.
pub async fn forward_request(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    let target = state.targets.get();
    if target.url.is_empty() {
        return Err(ProxyError::TargetNotSet);
    }

    let path = request.uri().path().to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let upstream = resolve_upstream(&target.url, &path_and_query)?;

    let (parts, body) = request.into_parts();

    let mut outbound = Request::builder()
        .method(parts.method.clone())
        .uri(upstream.as_str());

    if let Some(headers) = outbound.headers_mut() {
        // Host is never copied; the client derives it from the resolved
        // URI's authority.
        for (name, value) in parts.headers.iter() {
            if name == header::HOST {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        if !target.cookie.is_empty() {
            let cookie = header::HeaderValue::from_str(&target.cookie)
                .map_err(axum::http::Error::from)?;
            headers.insert(header::COOKIE, cookie);
        }
        if path.contains(FORCED_RANGE_PATH) {
            headers.insert(header::RANGE, header::HeaderValue::from_static("bytes=0-"));
        }
    }

    // The inbound body stream is handed through untouched.
    let outbound = outbound.body(body)?;

    tracing::info!(method = %parts.method, url = %upstream, "forwarding request");

    let response = match state.upstream_timeout {
        Some(deadline) => tokio::time::timeout(deadline, state.client.request(outbound))
            .await
            .map_err(|_| ProxyError::UpstreamTimeout(deadline.as_secs()))??,
        None => state.client.request(outbound).await?,
    };

    // Relay status and headers verbatim and stream the body through. Once
    // bytes are flowing the status line is already on the wire, so a
    // mid-transfer failure can only be logged.
    let (parts, body) = response.into_parts();
    let body = Body::new(body.map_err(|err| {
        tracing::warn!(error = %err, "upstream body stream interrupted");
        err
    }));
    Ok(Response::from_parts(parts, body))
}
