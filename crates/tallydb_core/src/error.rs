//! Error types for TallyDB core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in TallyDB core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// COMMIT or ROLLBACK issued while no transaction is open.
    #[error("no transaction")]
    NoActiveTransaction,

    /// BEGIN would exceed the configured nesting limit.
    #[error("transaction depth limit of {limit} exceeded")]
    DepthLimitExceeded {
        /// The configured maximum depth.
        limit: usize,
    },

    /// The store and reverse index disagree.
    ///
    /// This is a programming error; once raised the engine state can no
    /// longer be trusted.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },

    /// I/O error while reading commands or writing replies.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Creates a depth limit error.
    pub fn depth_limit_exceeded(limit: usize) -> Self {
        Self::DepthLimitExceeded { limit }
    }

    /// Returns true if the session can keep going after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoActiveTransaction | Self::DepthLimitExceeded { .. }
        )
    }
}
