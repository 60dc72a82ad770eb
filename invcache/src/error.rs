//! Error types for cached inversion
//!
//! This module defines the crate-level error returned by `solve`. Failures
//! raised by the inversion collaborator are carried unchanged inside
//! [`InvCacheError::Computation`].

use crate::invert::InversionError;
use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum InvCacheError {
    /// The inversion collaborator rejected the input
    #[error("Computation failure: {0}")]
    Computation(#[from] InversionError),

    /// `solve` was called on a slot whose input was never set
    #[error("Cache slot has no input matrix; call set_input before solving")]
    MissingInput,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl InvCacheError {
    /// Whether this error came from the inversion collaborator
    pub fn is_computation_failure(&self) -> bool {
        matches!(self, InvCacheError::Computation(_))
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, InvCacheError>;

impl From<String> for InvCacheError {
    fn from(s: String) -> Self {
        InvCacheError::Other(s)
    }
}

impl From<&str> for InvCacheError {
    fn from(s: &str) -> Self {
        InvCacheError::Other(s.to_string())
    }
}
