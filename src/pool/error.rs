//! Error types for pool operations

use std::fmt;

/// Result type alias for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors that can occur while talking to the pool controller
#[derive(Debug)]
pub enum PoolError {
    /// The pool cannot report its current size
    Unavailable(String),

    /// The backend refused a resize request
    Rejected(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Unavailable(msg) => write!(f, "pool unavailable: {msg}"),
            PoolError::Rejected(msg) => write!(f, "resize rejected: {msg}"),
        }
    }
}

impl std::error::Error for PoolError {}
