//! Unified error type for SecureTag domain operations
//!
//! Verification failures (unknown or expired tags) are not errors: they are
//! ordinary [`VerificationResult`](crate::VerificationResult) values carrying
//! `verified = false`. This type only covers genuine faults and rejected input.

use serde::{Deserialize, Serialize};

/// Error type for all SecureTag domain operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SecureTagError {
    /// Invalid client input (missing or malformed fields)
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Registry storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl SecureTagError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Standard Result type for SecureTag operations
pub type Result<T> = std::result::Result<T, SecureTagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SecureTagError::invalid("qr code data is required");
        assert_eq!(err.to_string(), "Invalid: qr code data is required");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_storage_error_is_not_client_error() {
        let err = SecureTagError::storage("lock poisoned");
        assert!(matches!(err, SecureTagError::Storage { .. }));
        assert!(!err.is_client_error());
    }
}
