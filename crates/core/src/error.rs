//! Error types for the median-oracle system.

use thiserror::Error;

use crate::types::Timestamp;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Main error type for the median-oracle system.
///
/// Every variant is rejected synchronously at the call that triggers it and
/// leaves engine state untouched, so a failed call is always safe to retry
/// with corrected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Update called with a timestamp earlier than the last accepted one.
    #[error("non-monotonic timestamp: last seen {last}, got {got}")]
    NonMonotonicTimestamp { last: Timestamp, got: Timestamp },

    /// Read or EMA query before the first update, or a zero-capacity engine.
    #[error("oracle engine is uninitialized")]
    Uninitialized,

    /// Read on an initialized engine that has no weighted history yet.
    #[error("no buffered history to aggregate")]
    EmptyHistory,

    /// Configuration rejected at validation time.
    #[error("configuration error: {0}")]
    Config(String),
}

impl OracleError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        OracleError::Config(msg.into())
    }
}
