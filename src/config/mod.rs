//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (load, or create a default file when missing)
//!     → ProxyConfig (immutable once loaded)
//! ```
//!
//! The config only supplies the listening port and an optional upstream
//! deadline; it has no bearing on forwarding behavior beyond those.

pub mod loader;
pub mod schema;

pub use loader::{load_or_create, ConfigError};
pub use schema::ProxyConfig;
