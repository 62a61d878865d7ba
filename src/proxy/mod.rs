//! Core forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! control write ──────▶ target.rs (shared TargetStore)
//!                            │ snapshot
//! inbound request ──▶ forward.rs ──▶ resolve.rs ──▶ upstream server
//!                            │
//! original caller ◀── streamed response ◀──────────┘
//! ```

pub mod forward;
pub mod resolve;
pub mod target;

pub use target::{TargetState, TargetStore};
