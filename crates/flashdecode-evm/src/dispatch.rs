//! Selector → descriptor dispatch.
//!
//! The built-in table holds the two flash-loan call shapes of the lending
//! pools under analysis. Adding a shape means registering another
//! `(selector, Descriptor)` pair; the decoder itself never changes.

use flashdecode_core::{
    error::DecodeError,
    types::{selector_hex, Descriptor, ParamType, Selector},
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::selector;

/// Selector routed to the single-asset `flashLoanSimple` shape.
///
/// This is the keccak selector of the ERC-3156 `flashLoan(address,address,uint256,bytes)`,
/// which the collected data labels as `flashLoanSimple`.
pub const FLASH_LOAN_SIMPLE_SELECTOR: Selector = [0x5c, 0xff, 0xe9, 0xde];

/// Selector of the multi-asset `flashLoan` shape.
pub const FLASH_LOAN_SELECTOR: Selector = [0xab, 0x9c, 0x4b, 0x5d];

static BUILTIN: Lazy<DispatchTable> = Lazy::new(|| {
    let mut table = DispatchTable::new();
    table.register(FLASH_LOAN_SIMPLE_SELECTOR, flash_loan_simple());
    table.register(FLASH_LOAN_SELECTOR, flash_loan());
    table
});

/// `flashLoanSimple(address receiverAddress, address asset, uint256 amount, bytes params, uint16 referralCode)`
pub fn flash_loan_simple() -> Descriptor {
    Descriptor::new("flashLoanSimple")
        .param("receiverAddress", ParamType::Address)
        .param("asset", ParamType::Address)
        .param("amount", ParamType::Uint(256))
        .param("params", ParamType::Bytes)
        .param("referralCode", ParamType::Uint(16))
}

/// `flashLoan(address receiverAddress, address[] assets, uint256[] amounts, uint256[] modes,
/// address onBehalfOf, bytes params, uint16 referralCode)`
pub fn flash_loan() -> Descriptor {
    Descriptor::new("flashLoan")
        .param("receiverAddress", ParamType::Address)
        .param("assets", ParamType::array(ParamType::Address))
        .param("amounts", ParamType::array(ParamType::Uint(256)))
        .param("modes", ParamType::array(ParamType::Uint(256)))
        .param("onBehalfOf", ParamType::Address)
        .param("params", ParamType::Bytes)
        .param("referralCode", ParamType::Uint(16))
}

/// Immutable-after-construction map from selector to call shape.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: HashMap<Selector, Descriptor>,
}

impl DispatchTable {
    /// An empty table. Most callers want [`DispatchTable::builtin`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table with the two flash-loan shapes.
    pub fn builtin() -> &'static DispatchTable {
        &BUILTIN
    }

    /// Register a call shape. Returns the descriptor previously bound to
    /// `selector`, if any.
    pub fn register(&mut self, selector: Selector, descriptor: Descriptor) -> Option<Descriptor> {
        self.entries.insert(selector, descriptor)
    }

    /// Look up the descriptor for `selector`.
    ///
    /// # Errors
    /// `DecodeError::UnsupportedMethod` when the selector is not registered.
    pub fn resolve(&self, selector: Selector) -> Result<&Descriptor, DecodeError> {
        self.entries
            .get(&selector)
            .ok_or_else(|| DecodeError::UnsupportedMethod {
                selector: selector_hex(&selector),
            })
    }

    /// Look up a hex-encoded selector such as `"0x5cffe9de"`.
    ///
    /// # Errors
    /// `MalformedHex` unless the input is exactly 4 hex-encoded bytes,
    /// otherwise as [`resolve`](Self::resolve).
    pub fn resolve_hex(&self, input: &str) -> Result<&Descriptor, DecodeError> {
        let parsed = selector::parse(input).ok_or_else(|| DecodeError::MalformedHex {
            reason: format!("'{input}' is not a 4-byte selector"),
        })?;
        self.resolve(parsed)
    }

    /// Registered `(selector, descriptor)` pairs, sorted by method name.
    pub fn entries(&self) -> Vec<(Selector, &Descriptor)> {
        let mut out: Vec<_> = self.entries.iter().map(|(s, d)| (*s, d)).collect();
        out.sort_by(|a, b| a.1.method.cmp(&b.1.method));
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
