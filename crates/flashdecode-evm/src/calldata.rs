//! Hex call-data as stored in transaction records.

use flashdecode_core::{error::DecodeError, types::Selector};

/// Raw call-data bytes: a 4-byte selector followed by the ABI-encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calldata {
    bytes: Vec<u8>,
}

impl Calldata {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse a hex string, with or without a `0x` prefix.
    ///
    /// # Errors
    /// `DecodeError::MalformedHex` for an odd number of digits or any
    /// character that is not a hex digit, surrounding whitespace included.
    pub fn from_hex(input: &str) -> Result<Self, DecodeError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.len() % 2 != 0 {
            return Err(DecodeError::MalformedHex {
                reason: format!("odd number of hex digits ({})", digits.len()),
            });
        }
        let bytes = hex::decode(digits).map_err(|e| DecodeError::MalformedHex {
            reason: e.to_string(),
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Split into selector and body.
    ///
    /// # Errors
    /// `DecodeError::TruncatedInput` when fewer than 4 bytes are present.
    pub fn split(&self) -> Result<(Selector, &[u8]), DecodeError> {
        split_selector(&self.bytes)
    }
}

/// Split raw call-data into its selector and the remaining body.
pub fn split_selector(data: &[u8]) -> Result<(Selector, &[u8]), DecodeError> {
    match data {
        [a, b, c, d, body @ ..] => Ok(([*a, *b, *c, *d], body)),
        _ => Err(DecodeError::TruncatedInput {
            expected: 4,
            actual: data.len(),
        }),
    }
}
