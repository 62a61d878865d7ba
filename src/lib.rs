//! Dynamic-target HTTP media relay.
//!
//! Forwards every non-control request to a runtime-configured upstream base
//! URL, injecting an authentication cookie and applying a small header
//! rewrite policy, then streams the response back unmodified. The upstream
//! target is set and read through two control endpoints and may change
//! while forwards are in flight.
//!
//! # Architecture Overview
//!
//! ```text
//! control caller ──▶ /proxy/info ──▶ TargetStore (write)
//! control caller ──▶ /proxyGet  ──▶ TargetStore (read)
//!
//! any caller ──▶ fallback forwarder ──▶ TargetStore (read)
//!                       │                    │
//!                       ▼                    ▼
//!                 URL resolver ──▶ upstream server
//!                       │
//!            streamed response back to the caller
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod http;
pub mod proxy;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use proxy::{TargetState, TargetStore};
