//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enum via a
//! `From` impl so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `ca-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A configuration value is out of its admissible range.  Raised by
    /// [`ModelConfig::validate`][crate::ModelConfig::validate] before any
    /// random draw happens.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ca-core`.
pub type CoreResult<T> = Result<T, CoreError>;
