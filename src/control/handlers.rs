//! Handlers for the two control endpoints.
//!
//! Registered with `any()` and checking the method themselves, so that a
//! wrong verb gets a 405 carrying a readable message instead of axum's
//! empty default.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, Request},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;
use crate::http::server::AppState;
use crate::proxy::target::TargetState;

/// Cap on control-write bodies; target payloads are tiny.
const MAX_CONTROL_BODY: usize = 64 * 1024;

/// Body of a control write.
#[derive(Debug, Deserialize)]
pub struct SetTargetRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub cookie: String,
}

/// Acknowledgment payload for a successful control write.
#[derive(Debug, Serialize)]
pub struct Acknowledgment {
    pub code: i32,
    pub status: &'static str,
    pub message: &'static str,
    pub data: bool,
}

/// POST handler that replaces the stored upstream target.
pub async fn set_target(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Json<Acknowledgment>, ProxyError> {
    if request.method() != Method::POST {
        return Err(ProxyError::MethodNotAllowed("POST"));
    }

    let bytes = to_bytes(request.into_body(), MAX_CONTROL_BODY)
        .await
        .map_err(ProxyError::BodyRead)?;
    let payload: SetTargetRequest = serde_json::from_slice(&bytes)?;

    if payload.url.is_empty() {
        return Err(ProxyError::MissingUrl);
    }

    tracing::info!(url = %payload.url, cookie = %payload.cookie, "upstream target updated");

    // No url syntax check here; a malformed value surfaces lazily at
    // forwarding time.
    state.targets.set(payload.url, payload.cookie);

    Ok(Json(Acknowledgment {
        code: 0,
        status: "success",
        message: "proxy target updated",
        data: true,
    }))
}

/// GET handler that returns the stored target verbatim, empty strings
/// included.
pub async fn get_target(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Json<TargetState>, ProxyError> {
    if request.method() != Method::GET {
        return Err(ProxyError::MethodNotAllowed("GET"));
    }
    Ok(Json(state.targets.get()))
}
