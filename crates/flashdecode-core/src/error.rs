//! Error types for the call-data decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single call.
///
/// Decoding is all-or-nothing: any of these aborts the call and no partial
/// record is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed hex call-data: {reason}")]
    MalformedHex { reason: String },

    #[error("Unsupported method selector {selector}")]
    UnsupportedMethod { selector: String },

    #[error("Truncated input: need at least {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("Invalid offset for '{field}': {reason}")]
    InvalidOffset { field: String, reason: String },

    #[error("Integer overflow in '{field}': value does not fit in uint{bits}")]
    IntegerOverflow { field: String, bits: u16 },

    #[error("Array '{field}' declares {len} elements, limit is {max}")]
    ArrayTooLong { field: String, len: usize, max: usize },

    #[error("Address '{field}' has non-zero bytes in its 12-byte padding")]
    NonZeroPadding { field: String },
}

impl DecodeError {
    /// Short stable label, used as a log field and for failure tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::MalformedHex { .. } => "malformed_hex",
            DecodeError::UnsupportedMethod { .. } => "unsupported_method",
            DecodeError::TruncatedInput { .. } => "truncated_input",
            DecodeError::InvalidOffset { .. } => "invalid_offset",
            DecodeError::IntegerOverflow { .. } => "integer_overflow",
            DecodeError::ArrayTooLong { .. } => "array_too_long",
            DecodeError::NonZeroPadding { .. } => "non_zero_padding",
        }
    }
}
