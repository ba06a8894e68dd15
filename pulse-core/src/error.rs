//! Request-level error types.
//!
//! These abort a lookup before any probe runs. Failures *inside* a probe are
//! data, not errors; see [`crate::types::ErrorInfo`].

use thiserror::Error;

/// Errors that reject a lookup request as a whole.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The request named a check kind outside the supported set.
    #[error("invalid check: {0:?}")]
    InvalidCheckKind(String),

    /// The target string could not be canonicalized into a URL with a host.
    #[error("invalid url: {0}")]
    MalformedTarget(String),
}
