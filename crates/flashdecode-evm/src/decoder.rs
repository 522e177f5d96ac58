//! Offset-aware ABI decoder for call-data bodies.
//!
//! # Layout
//! The body (call-data minus the selector) is a head of one 32-byte word per
//! parameter followed by a tail of dynamic payloads:
//! - static params (`address`, `uintN`) sit inline in their head word
//! - dynamic params (`bytes`, `T[]`) hold a byte offset into the body; at that
//!   offset is a count word, then the payload (`count` element slots, or
//!   `count` bytes padded to a word boundary)
//!
//! Array elements follow the same rule relative to the start of the element
//! region, so nested dynamic element types decode too. Every offset and
//! length is range-checked before anything is read or allocated.

use flashdecode_core::{
    call::DecodedCall,
    error::DecodeError,
    types::{AbiValue, Descriptor, ParamType, Selector},
};
use indexmap::IndexMap;

use crate::calldata::{split_selector, Calldata};
use crate::dispatch::DispatchTable;
use crate::word::{self, Words, WORD};

/// Default cap on the element count of a single array.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 10_000;

/// Resource bounds applied while decoding untrusted call-data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Arrays declaring more elements than this fail with `ArrayTooLong`.
    pub max_array_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
        }
    }
}

/// Decode `body` against `descriptor` with the default limits.
///
/// `selector` only tags the result; dispatch has already happened.
pub fn decode(
    selector: Selector,
    descriptor: &Descriptor,
    body: &[u8],
) -> Result<DecodedCall, DecodeError> {
    decode_with_limits(selector, descriptor, body, DecodeLimits::default())
}

/// Decode `body` against `descriptor`.
///
/// # Errors
/// - `TruncatedInput` if the body is shorter than the head (one word per param)
/// - `InvalidOffset` if a dynamic offset, count or payload escapes the body
/// - `IntegerOverflow` if a `uintN` word (N < 256) holds more than N bits
/// - `ArrayTooLong` if an array count exceeds `limits.max_array_len`
pub fn decode_with_limits(
    selector: Selector,
    descriptor: &Descriptor,
    body: &[u8],
    limits: DecodeLimits,
) -> Result<DecodedCall, DecodeError> {
    let head_len = descriptor.head_len();
    if body.len() < head_len {
        return Err(DecodeError::TruncatedInput {
            expected: head_len,
            actual: body.len(),
        });
    }

    let words = Words::new(body);
    let mut params = IndexMap::with_capacity(descriptor.params.len());
    for (index, param) in descriptor.params.iter().enumerate() {
        let value = decode_slot(&words, index, &param.name, &param.ty, limits)?;
        params.insert(param.name.clone(), value);
    }

    Ok(DecodedCall {
        method: descriptor.method.clone(),
        selector,
        params,
    })
}

/// Decode the value whose head word is slot `index` of `region`.
fn decode_slot(
    region: &Words<'_>,
    index: usize,
    field: &str,
    ty: &ParamType,
    limits: DecodeLimits,
) -> Result<AbiValue, DecodeError> {
    let head = region.slot(index).ok_or_else(|| DecodeError::TruncatedInput {
        expected: (index + 1) * WORD,
        actual: region.len(),
    })?;

    if !ty.is_dynamic() {
        return decode_static(head, field, ty);
    }

    let offset = word::as_usize(head).ok_or_else(|| invalid(field, "offset does not fit in 64 bits"))?;
    decode_tail(region, offset, field, ty, limits)
}

fn decode_static(word: &[u8; WORD], field: &str, ty: &ParamType) -> Result<AbiValue, DecodeError> {
    match ty {
        ParamType::Address => word::as_address(word)
            .map(AbiValue::Address)
            .ok_or_else(|| DecodeError::NonZeroPadding {
                field: field.to_string(),
            }),
        ParamType::Uint(bits) => {
            let value = word::as_uint(word);
            if *bits < 256 && value.bit_len() > usize::from(*bits) {
                return Err(DecodeError::IntegerOverflow {
                    field: field.to_string(),
                    bits: *bits,
                });
            }
            Ok(AbiValue::Uint(value))
        }
        ParamType::Bytes | ParamType::Array(_) => {
            Err(invalid(field, "dynamic type in a static position"))
        }
    }
}

/// Decode a dynamic payload that starts (count word first) at byte `offset` of `region`.
fn decode_tail(
    region: &Words<'_>,
    offset: usize,
    field: &str,
    ty: &ParamType,
    limits: DecodeLimits,
) -> Result<AbiValue, DecodeError> {
    let count_word = region.at(offset).ok_or_else(|| {
        invalid(
            field,
            format!("offset {offset} is past the end of a {}-byte region", region.len()),
        )
    })?;
    let count = word::as_usize(count_word)
        .ok_or_else(|| invalid(field, "length does not fit in 64 bits"))?;
    // offset + WORD cannot overflow: `at(offset)` succeeded
    let data_start = offset + WORD;

    match ty {
        ParamType::Bytes => {
            let padded = word::padded_len(count)
                .ok_or_else(|| invalid(field, format!("length {count} overflows")))?;
            let payload = region.bytes(data_start, padded).ok_or_else(|| {
                invalid(
                    field,
                    format!(
                        "{count} bytes at offset {data_start} exceed a {}-byte region",
                        region.len()
                    ),
                )
            })?;
            Ok(AbiValue::Bytes(payload[..count].to_vec()))
        }
        ParamType::Array(elem) => {
            if count > limits.max_array_len {
                return Err(DecodeError::ArrayTooLong {
                    field: field.to_string(),
                    len: count,
                    max: limits.max_array_len,
                });
            }
            let heads_len = count
                .checked_mul(WORD)
                .ok_or_else(|| invalid(field, format!("element count {count} overflows")))?;
            let elements = region
                .tail(data_start)
                .filter(|tail| tail.len() >= heads_len)
                .ok_or_else(|| {
                    invalid(
                        field,
                        format!(
                            "{count} elements at offset {data_start} exceed a {}-byte region",
                            region.len()
                        ),
                    )
                })?;

            let mut items = Vec::with_capacity(count);
            for i in 0..count {
                items.push(decode_slot(&elements, i, field, elem, limits)?);
            }
            Ok(AbiValue::Array(items))
        }
        ParamType::Address | ParamType::Uint(_) => {
            Err(invalid(field, "static type in a dynamic position"))
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> DecodeError {
    DecodeError::InvalidOffset {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Call-data decoder: selector dispatch plus body decoding.
///
/// Holds no mutable state; share one instance across threads freely.
#[derive(Debug, Clone)]
pub struct CallDecoder {
    table: DispatchTable,
    limits: DecodeLimits,
}

impl Default for CallDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CallDecoder {
    /// Decoder over the built-in flash-loan dispatch table.
    pub fn new() -> Self {
        Self::with_table(DispatchTable::builtin().clone())
    }

    /// Decoder over a caller-supplied table (e.g. the built-in one plus extra shapes).
    pub fn with_table(table: DispatchTable) -> Self {
        Self {
            table,
            limits: DecodeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Decode a hex call-data string (optional `0x` prefix).
    pub fn decode_hex(&self, input: &str) -> Result<DecodedCall, DecodeError> {
        let calldata = Calldata::from_hex(input)?;
        self.decode_calldata(calldata.as_bytes())
    }

    /// Decode raw call-data bytes, selector included.
    pub fn decode_calldata(&self, data: &[u8]) -> Result<DecodedCall, DecodeError> {
        let (selector, body) = split_selector(data)?;
        let descriptor = self.table.resolve(selector)?;
        decode_with_limits(selector, descriptor, body, self.limits)
    }
}
