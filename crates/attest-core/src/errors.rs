//! Encoding errors and the uniform caller-facing error shape

use serde::{Deserialize, Serialize};

/// Canonical encoding failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A text field exceeds its fixed width
    #[error("field `{field}` is {len} bytes, exceeds the {max}-byte limit")]
    TooLong {
        /// Field name in the canonical layout
        field: &'static str,
        /// Actual byte length of the supplied value
        len: usize,
        /// Fixed width of the field
        max: usize,
    },

    /// An integer field is negative or does not fit in 32 bits
    #[error("field `{field}` value {value} is outside the u32 range")]
    OutOfRange {
        /// Field name in the canonical layout
        field: &'static str,
        /// Rejected value
        value: i64,
    },
}

/// Uniform error shape returned to callers
///
/// Every failure in the attestation pipeline collapses to this shape; the
/// transport layer serializes it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error label
    pub error: String,
    /// Human-readable description of the stage that failed
    pub error_description: String,
}

impl ErrorBody {
    /// Build the uniform oracle error body
    pub fn oracle(description: impl Into<String>) -> Self {
        Self {
            error: "Oracle Error".to_string(),
            error_description: description.into(),
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.error_description)
    }
}
