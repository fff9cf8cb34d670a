//! Error types for the navigation engine
//!
//! Most navigation operations cannot fail: "nothing to do" outcomes such as
//! popping a single-entry backstack are reported as `false`, not as errors.
//! The variants below cover configuration mistakes and persistence failures.

use crate::types::KeyType;

/// Errors that can occur in navigation operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A key was resolved without any presentation declared for its type
    MissingPresentation {
        /// The key type that has no presentation
        key_type: KeyType,
    },

    /// A multi-stack navigator was built with an initial stack that was never declared
    InvalidInitialStack {
        /// Why the initial stack was rejected
        reason: String,
    },

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// JSON serialization or deserialization failed
    SerializationError(String),
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPresentation { key_type } => write!(
                f,
                "no presentation declared for navigation key type '{}'",
                key_type
            ),
            Self::InvalidInitialStack { reason } => {
                write!(f, "invalid initial stack: {}", reason)
            }
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for NavigationError {}

impl From<serde_json::Error> for NavigationError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type alias for navigation operations
pub type NavigationResult<T> = Result<T, NavigationError>;
