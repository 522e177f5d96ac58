//! The decoded form of a flash-loan call.

use crate::types::{selector_hex, AbiValue, Selector};
use alloy_primitives::U256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of decoding one call's call-data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    /// Method name from the descriptor (e.g. "flashLoanSimple")
    pub method: String,
    /// First 4 bytes of the call-data
    #[serde(with = "selector_serde")]
    pub selector: Selector,
    /// Decoded parameters in declaration order
    pub params: IndexMap<String, AbiValue>,
}

impl DecodedCall {
    /// Selector as a hex string ("0xaabbccdd")
    pub fn selector_hex(&self) -> String {
        selector_hex(&self.selector)
    }

    /// Look up a decoded parameter by name
    pub fn param(&self, name: &str) -> Option<&AbiValue> {
        self.params.get(name)
    }

    pub fn address(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(AbiValue::as_address)
    }

    pub fn uint(&self, name: &str) -> Option<U256> {
        self.param(name).and_then(AbiValue::as_uint)
    }

    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.param(name).and_then(AbiValue::as_bytes)
    }

    /// Tokens borrowed by this call: the `asset` field of a single-asset
    /// loan, or every element of the `assets` array of a multi-asset loan.
    pub fn assets(&self) -> Vec<&str> {
        if let Some(asset) = self.address("asset") {
            return vec![asset];
        }
        self.param("assets")
            .and_then(AbiValue::as_array)
            .map(|items| items.iter().filter_map(AbiValue::as_address).collect())
            .unwrap_or_default()
    }
}

mod selector_serde {
    use crate::types::Selector;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(selector: &Selector, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&crate::types::selector_hex(selector))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Selector, D::Error> {
        let s = String::deserialize(d)?;
        let raw = hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(de::Error::custom)?;
        raw.try_into()
            .map_err(|_| de::Error::custom("selector must be exactly 4 bytes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(method: &str, params: Vec<(&str, AbiValue)>) -> DecodedCall {
        DecodedCall {
            method: method.into(),
            selector: [0xab, 0x9c, 0x4b, 0x5d],
            params: params
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn selector_hex_format() {
        let c = call("flashLoan", vec![]);
        assert_eq!(c.selector_hex(), "0xab9c4b5d");
    }

    #[test]
    fn assets_from_single_asset_call() {
        let c = call(
            "flashLoanSimple",
            vec![
                ("receiverAddress", AbiValue::Address("0x11".into())),
                ("asset", AbiValue::Address("0x22".into())),
            ],
        );
        assert_eq!(c.assets(), vec!["0x22"]);
    }

    #[test]
    fn assets_from_multi_asset_call() {
        let c = call(
            "flashLoan",
            vec![(
                "assets",
                AbiValue::Array(vec![
                    AbiValue::Address("0xaa".into()),
                    AbiValue::Address("0xbb".into()),
                ]),
            )],
        );
        assert_eq!(c.assets(), vec!["0xaa", "0xbb"]);
        assert!(c.address("asset").is_none());
    }

    #[test]
    fn json_shape_keeps_param_order() {
        let c = call(
            "flashLoanSimple",
            vec![
                ("receiverAddress", AbiValue::Address("0x11".into())),
                ("amount", AbiValue::Uint(U256::from(1000u64))),
            ],
        );
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""selector":"0xab9c4b5d""#));
        let recv = json.find("receiverAddress").unwrap();
        let amount = json.find("amount").unwrap();
        assert!(recv < amount);

        let back: DecodedCall = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
