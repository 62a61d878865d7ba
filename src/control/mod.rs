//! Runtime control surface for the upstream target.

pub mod handlers;

/// Control path for replacing the stored target.
///
/// Both paths are exact, case-sensitive matches. Trailing-slash or case
/// variants fall through to the forwarder like any other path.
pub const SET_TARGET_PATH: &str = "/proxy/info";

/// Control path for reading the stored target back.
pub const GET_TARGET_PATH: &str = "/proxyGet";
