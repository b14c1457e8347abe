//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` upward
//! via `#[from]` variants where a query or parse failure crosses a crate
//! boundary.

use thiserror::Error;

/// Errors produced by `gs-core` input validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A request parameter is missing, non-finite, or out of range.
    /// Raised before any computation begins.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown transit mode: {0:?}")]
    UnknownMode(String),
}

/// Shorthand result type for `gs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
