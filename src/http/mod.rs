//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routing)
//!     → control handlers (exact paths /proxy/info, /proxyGet)
//!     → forwarder fallback (everything else)
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
