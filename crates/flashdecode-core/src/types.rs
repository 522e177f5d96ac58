//! ABI type and value model.
//!
//! `ParamType` is the closed set of kinds the known flash-loan signatures use,
//! `Descriptor` pairs a method name with its ordered parameter slots, and
//! `AbiValue` is what the decoder produces for each slot.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First four bytes of call-data.
pub type Selector = [u8; 4];

/// Render a selector as `0x` + 8 lowercase hex characters.
pub fn selector_hex(selector: &Selector) -> String {
    format!("0x{}", hex::encode(selector))
}

/// Kinds of ABI parameters understood by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// 20-byte address, right-aligned in a word.
    Address,
    /// Big-endian unsigned integer of the given width in bits, right-aligned in a word.
    Uint(u16),
    /// Variable-length byte string.
    Bytes,
    /// Variable-length array of the element type.
    Array(Box<ParamType>),
}

impl ParamType {
    /// Shorthand for `Array(Box::new(elem))`.
    pub fn array(elem: ParamType) -> Self {
        ParamType::Array(Box::new(elem))
    }

    /// Dynamic types are referenced by an offset in the head instead of inline.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::Array(_))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

/// A named parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

/// Method name plus its ordered parameter slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub method: String,
    pub params: Vec<Param>,
}

impl Descriptor {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter slot.
    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    /// Size of the head region in bytes: one word per parameter.
    pub fn head_len(&self) -> usize {
        self.params.len() * 32
    }

    /// Canonical signature, e.g. `flashLoanSimple(address,address,uint256,bytes,uint16)`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.method, types.join(","))
    }
}

/// A decoded ABI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AbiValue {
    /// Lowercase `0x`-prefixed 40-hex-character address.
    Address(String),
    /// Exact unsigned value, serialized as a decimal string.
    Uint(#[serde(with = "u256_decimal")] U256),
    /// Raw bytes, serialized as `0x`-prefixed hex.
    Bytes(#[serde(with = "hex_prefixed")] Vec<u8>),
    Array(Vec<AbiValue>),
}

impl AbiValue {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            AbiValue::Address(a) => Some(a.as_str()),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Address(a) => write!(f, "{a}"),
            AbiValue::Uint(v) => write!(f, "{v}"),
            AbiValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            AbiValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

mod u256_decimal {
    use alloy_primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        let s = String::deserialize(d)?;
        s.parse::<U256>().map_err(de::Error::custom)
    }
}

mod hex_prefixed {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(de::Error::custom)
    }
}
