//! Function selector computation.
//!
//! The selector of a function is the first four bytes of the keccak256 hash
//! of its canonical signature string, e.g.:
//!   keccak256("transfer(address,uint256)")[..4] → 0xa9059cbb

use flashdecode_core::types::Selector;
use tiny_keccak::{Hasher, Keccak};

/// Compute the 4-byte selector of a canonical signature string.
pub fn compute(signature: &str) -> Selector {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    [output[0], output[1], output[2], output[3]]
}

/// Parse `"0xaabbccdd"` (prefix optional) into a selector.
pub fn parse(hex_str: &str) -> Option<Selector> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let mut out = [0u8; 4];
    hex::decode_to_slice(hex_str, &mut out).ok()?;
    Some(out)
}
