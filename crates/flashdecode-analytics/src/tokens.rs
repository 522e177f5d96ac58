//! Which tokens get flash-borrowed, and how often.

use flashdecode_core::record::TransactionRecord;
use flashdecode_evm::{batch::decode_records, CallDecoder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::AnalysisConfig;

/// Number of flash loans that borrowed `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    /// `None` when counts are aggregated across networks
    pub network: Option<String>,
    pub token: String,
    pub count: u64,
}

/// Count borrowed tokens over successful flash-loan records.
///
/// Each decoded call contributes every token it borrows (one for
/// `flashLoanSimple`, one per `assets` entry for `flashLoan`). Undecodable
/// call-data is logged and skipped. Sorted by count, highest first.
pub fn token_frequency(
    decoder: &CallDecoder,
    config: &AnalysisConfig,
    records: &[TransactionRecord],
    by_network: bool,
) -> Vec<TokenCount> {
    let loans: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| r.is_flash_loan() && r.succeeded())
        .collect();
    let outcome = decode_records(decoder, &loans);

    let mut counts: BTreeMap<(Option<&str>, String), u64> = BTreeMap::new();
    for (idx, call) in &outcome.decoded {
        let network = by_network.then(|| loans[*idx].network.as_str());
        for token in call.assets() {
            if config.is_invalid_token(token) {
                continue;
            }
            *counts.entry((network, token.to_string())).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<TokenCount> = counts
        .into_iter()
        .map(|((network, token), count)| TokenCount {
            network: network.map(str::to_string),
            token,
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.network.cmp(&b.network))
            .then_with(|| a.token.cmp(&b.token))
    });

    for row in rows.iter().take(5) {
        info!(token = %row.token, count = row.count, network = ?row.network, "top borrowed token");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{multi_input, record, simple_input};

    #[test]
    fn counts_tokens_per_network() {
        let records = vec![
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 0),
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 0),
            record("polygon", "flashLoanSimple", simple_input(0xaa), 0),
            record("ethereum", "flashLoan", multi_input(&[0xbb, 0xaa]), 0),
        ];
        let rows = token_frequency(&CallDecoder::new(), &AnalysisConfig::default(), &records, true);
        let aa = format!("0x{}", "aa".repeat(20));
        let bb = format!("0x{}", "bb".repeat(20));
        assert_eq!(
            rows,
            vec![
                TokenCount { network: Some("ethereum".into()), token: aa.clone(), count: 3 },
                TokenCount { network: Some("ethereum".into()), token: bb, count: 1 },
                TokenCount { network: Some("polygon".into()), token: aa, count: 1 },
            ]
        );
    }

    #[test]
    fn aggregates_across_networks() {
        let records = vec![
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 0),
            record("polygon", "flashLoanSimple", simple_input(0xaa), 0),
        ];
        let rows = token_frequency(&CallDecoder::new(), &AnalysisConfig::default(), &records, false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].network, None);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn skips_failed_invalid_and_undecodable() {
        let records = vec![
            // reverted transaction
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 1),
            // zero-address asset is excluded by default
            record("ethereum", "flashLoanSimple", simple_input(0x00), 0),
            // not a flash loan
            record("ethereum", "transfer", simple_input(0xaa), 0),
            // garbage input
            record("ethereum", "flashLoan", "0x1234".into(), 0),
        ];
        let rows = token_frequency(&CallDecoder::new(), &AnalysisConfig::default(), &records, true);
        assert!(rows.is_empty());
    }
}
