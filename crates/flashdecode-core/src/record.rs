//! Transaction records as exported by the document store.
//!
//! One record per transaction, in the store's snake_case field naming. Numeric
//! fields are accepted either as JSON numbers or as decimal strings since the
//! exporters disagree on which they emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Function names that mark a record as a flash-loan invocation.
pub const FLASH_LOAN_FUNCTIONS: [&str; 2] = ["flashLoan", "flashLoanSimple"];

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash (0x-prefixed)
    #[serde(default)]
    pub hash: String,
    /// Network slug, e.g. "ethereum" or "polygon"
    pub network: String,
    /// Sender address
    #[serde(default)]
    pub from: String,
    /// Function name resolved by the collector
    #[serde(default)]
    pub function_name: String,
    /// Hex call-data
    #[serde(default)]
    pub input: String,
    /// Block timestamp, unix seconds
    #[serde(deserialize_with = "int_or_string")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "int_or_string")]
    pub gas_used: u64,
    /// Gas price in wei
    #[serde(default, deserialize_with = "int_or_string")]
    pub gas_price: u128,
    /// 0 for a successful transaction
    #[serde(default, deserialize_with = "int_or_string")]
    pub is_error: u8,
    /// Transferred value in wei, kept verbatim
    #[serde(default)]
    pub value: String,
}

impl TransactionRecord {
    pub fn is_flash_loan(&self) -> bool {
        FLASH_LOAN_FUNCTIONS.contains(&self.function_name.as_str())
    }

    pub fn succeeded(&self) -> bool {
        self.is_error == 0
    }

    /// Block time in UTC, `None` for out-of-range timestamps.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

fn int_or_string<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let text = match IntOrString::deserialize(d)? {
        IntOrString::Unsigned(v) => v.to_string(),
        IntOrString::Signed(v) => v.to_string(),
        IntOrString::Text(s) => s,
    };
    text.trim().parse::<T>().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_numeric_encodings() {
        let json = r#"{
            "hash": "0xabc",
            "network": "polygon",
            "from": "0xfeed",
            "function_name": "flashLoanSimple",
            "input": "0x5cffe9de",
            "timestamp": "1700000000",
            "gas_used": 210000,
            "gas_price": "30000000000",
            "is_error": 0,
            "value": "0"
        }"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.timestamp, 1_700_000_000);
        assert_eq!(rec.gas_used, 210_000);
        assert_eq!(rec.gas_price, 30_000_000_000);
        assert!(rec.is_flash_loan());
        assert!(rec.succeeded());
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"network": "ethereum", "timestamp": 0}"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.gas_price, 0);
        assert!(!rec.is_flash_loan());
        assert_eq!(
            rec.datetime().unwrap().to_rfc3339(),
            "1970-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn rejects_non_numeric_gas() {
        let json = r#"{"network": "ethereum", "timestamp": 0, "gas_used": "lots"}"#;
        assert!(serde_json::from_str::<TransactionRecord>(json).is_err());
    }
}
