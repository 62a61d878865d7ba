//! Shared mutable upstream target state.
//!
//! The only mutable state in the whole process. Control writes replace the
//! pair, control reads and every forwarded request snapshot it. The lock is
//! held only for the duration of copying two strings, never across an await.

use std::sync::RwLock;

use serde::Serialize;

/// The current upstream target.
///
/// An empty `url` means no target has been set yet; an empty `cookie` means
/// no Cookie header is injected on forwarded requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TargetState {
    pub url: String,
    pub cookie: String,
}

/// Concurrency-safe holder for the upstream target.
///
/// Shared-read / exclusive-write: any number of readers proceed together,
/// a writer excludes everyone for the brief field swap. Readers always see
/// a pair committed by exactly one write, never a mix of two.
#[derive(Debug, Default)]
pub struct TargetStore {
    inner: RwLock<TargetState>,
}

impl TargetStore {
    /// Create a store with the empty/empty initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally overwrite both fields as a single atomic unit.
    /// No validation happens here; a malformed url surfaces lazily at
    /// forwarding time.
    pub fn set(&self, url: String, cookie: String) {
        // A writer only swaps two strings, so a poisoned lock still holds a
        // consistent pair; recover the guard instead of panicking.
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        state.url = url;
        state.cookie = cookie;
    }

    /// Snapshot of the most recently completed write.
    pub fn get(&self) -> TargetState {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
