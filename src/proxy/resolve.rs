//! Upstream URL resolution.
//!
//! Pure function: no state, no network. Given the stored base URL and the
//! inbound request path, produce the absolute upstream URL.

use thiserror::Error;
use url::Url;

/// Failure to combine the stored base URL with an inbound request path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid upstream base url: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    #[error("invalid request path: {0}")]
    InvalidPath(#[source] url::ParseError),
}

/// Resolve `path` as an absolute-path reference against `base`.
///
/// A path without a leading `/` gets one prepended so it always replaces the
/// base's path rather than resolving relative to its last segment. Query and
/// fragment of the path reference take precedence; scheme, host and port are
/// inherited from the base. An empty path returns the base unchanged.
pub fn resolve_upstream(base: &str, path: &str) -> Result<Url, ResolveError> {
    let base = Url::parse(base).map_err(ResolveError::InvalidBaseUrl)?;
    if path.is_empty() {
        return Ok(base);
    }
    if path.starts_with('/') {
        base.join(path).map_err(ResolveError::InvalidPath)
    } else {
        base.join(&format!("/{path}"))
            .map_err(ResolveError::InvalidPath)
    }
}
