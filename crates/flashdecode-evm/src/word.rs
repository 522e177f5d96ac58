//! 32-byte word access over an ABI-encoded region.
//!
//! Every read is bounds-checked and returns `None` instead of panicking, so
//! the decoder can turn a short region into a typed error.

use alloy_primitives::U256;

/// Size of one ABI word in bytes.
pub const WORD: usize = 32;

/// A read-only view over an encoded region, addressed by byte offset or slot index.
#[derive(Debug, Clone, Copy)]
pub struct Words<'a> {
    region: &'a [u8],
}

impl<'a> Words<'a> {
    pub fn new(region: &'a [u8]) -> Self {
        Self { region }
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// The word starting at byte `offset`.
    pub fn at(&self, offset: usize) -> Option<&'a [u8; WORD]> {
        let end = offset.checked_add(WORD)?;
        self.region.get(offset..end)?.try_into().ok()
    }

    /// The word in head slot `index` (byte offset `32 * index`).
    pub fn slot(&self, index: usize) -> Option<&'a [u8; WORD]> {
        self.at(index.checked_mul(WORD)?)
    }

    /// `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.region.get(offset..end)
    }

    /// Everything from `offset` to the end of the region.
    pub fn tail(&self, offset: usize) -> Option<Words<'a>> {
        self.region.get(offset..).map(Words::new)
    }
}

/// Interpret a word as a length or offset. `None` when the value does not
/// fit in 64 bits or in the platform's `usize`.
pub fn as_usize(word: &[u8; WORD]) -> Option<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low)).ok()
}

/// The low 20 bytes of a word as a lowercase `0x`-prefixed address.
/// `None` when any of the 12 high padding bytes is non-zero.
pub fn as_address(word: &[u8; WORD]) -> Option<String> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Some(format!("0x{}", hex::encode(&word[12..])))
}

/// A word as a big-endian unsigned integer.
pub fn as_uint(word: &[u8; WORD]) -> U256 {
    U256::from_be_bytes(*word)
}

/// `len` rounded up to a whole number of words.
pub fn padded_len(len: usize) -> Option<usize> {
    Some(len.checked_add(WORD - 1)? / WORD * WORD)
}
