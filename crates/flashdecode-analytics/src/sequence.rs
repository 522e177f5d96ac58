//! What wallets do right after taking a flash loan.
//!
//! For a sample of flash-loan wallets on one network, every loan is paired
//! with the wallet's next few transactions on that same network.

use flashdecode_core::record::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Wallets sampled per network.
pub const MAX_WALLETS: usize = 20;
/// Transactions kept after each loan.
pub const FOLLOW_UP: usize = 5;

/// One flash loan and the transactions its sender sent next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSequence {
    pub wallet: String,
    pub network: String,
    pub loan: TransactionRecord,
    /// Same wallet and network, strictly later timestamps, oldest first
    pub following: Vec<TransactionRecord>,
}

/// Sequences for the first `max_wallets` wallets (in order of their earliest
/// flash loan) on `network`. Reverted loans count as loans.
pub fn wallet_sequences(
    records: &[TransactionRecord],
    network: &str,
    max_wallets: usize,
    follow_up: usize,
) -> Vec<LoanSequence> {
    let mut by_wallet: HashMap<&str, Vec<&TransactionRecord>> = HashMap::new();
    for record in records.iter().filter(|r| r.network == network) {
        by_wallet.entry(record.from.as_str()).or_default().push(record);
    }
    for txs in by_wallet.values_mut() {
        txs.sort_by_key(|r| r.timestamp);
    }

    let mut loans: Vec<&TransactionRecord> = records
        .iter()
        .filter(|r| r.network == network && r.is_flash_loan())
        .collect();
    loans.sort_by_key(|r| r.timestamp);

    let mut chosen: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for loan in &loans {
        if chosen.len() == max_wallets {
            break;
        }
        if seen.insert(loan.from.as_str()) {
            chosen.push(loan.from.as_str());
        }
    }

    let mut sequences = Vec::new();
    for wallet in chosen {
        let txs = by_wallet.get(wallet).map(Vec::as_slice).unwrap_or_default();
        for loan in txs.iter().filter(|r| r.is_flash_loan()) {
            let following = txs
                .iter()
                .filter(|r| r.timestamp > loan.timestamp)
                .take(follow_up)
                .map(|r| (*r).clone())
                .collect();
            sequences.push(LoanSequence {
                wallet: wallet.to_string(),
                network: network.to_string(),
                loan: (*loan).clone(),
                following,
            });
        }
    }
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;

    fn tx(network: &str, from: &str, function_name: &str, timestamp: i64) -> TransactionRecord {
        TransactionRecord {
            from: from.into(),
            timestamp,
            hash: format!("0x{from}{timestamp}"),
            ..record(network, function_name, String::new(), 0)
        }
    }

    #[test]
    fn samples_at_most_twenty_wallets() {
        let records: Vec<_> = (0..25)
            .map(|i| tx("ethereum", &format!("w{i:02}"), "flashLoan", 100 + i))
            .collect();
        let sequences = wallet_sequences(&records, "ethereum", MAX_WALLETS, FOLLOW_UP);
        assert_eq!(sequences.len(), 20);
        // earliest borrowers first
        assert_eq!(sequences[0].wallet, "w00");
        assert_eq!(sequences[19].wallet, "w19");
    }

    #[test]
    fn keeps_next_five_transactions() {
        let mut records = vec![tx("polygon", "w", "flashLoanSimple", 10)];
        for t in (11..18).rev() {
            records.push(tx("polygon", "w", "swap", t));
        }
        let sequences = wallet_sequences(&records, "polygon", MAX_WALLETS, FOLLOW_UP);
        assert_eq!(sequences.len(), 1);
        let times: Vec<_> = sequences[0].following.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![11, 12, 13, 14, 15]);
    }

    #[test]
    fn only_strictly_later_transactions_follow() {
        let records = vec![
            tx("ethereum", "w", "approve", 49),
            tx("ethereum", "w", "swap", 50),
            tx("ethereum", "w", "flashLoan", 50),
            tx("ethereum", "w", "repay", 51),
        ];
        let sequences = wallet_sequences(&records, "ethereum", MAX_WALLETS, FOLLOW_UP);
        assert_eq!(sequences.len(), 1);
        let names: Vec<_> = sequences[0]
            .following
            .iter()
            .map(|r| r.function_name.as_str())
            .collect();
        assert_eq!(names, vec!["repay"]);
    }

    #[test]
    fn stays_on_one_network_and_wallet() {
        let records = vec![
            tx("ethereum", "w", "flashLoan", 1),
            tx("polygon", "w", "swap", 2),
            tx("ethereum", "other", "swap", 3),
            tx("ethereum", "w", "flashLoanSimple", 4),
        ];
        let sequences = wallet_sequences(&records, "ethereum", MAX_WALLETS, FOLLOW_UP);
        // both loans are reported; the second also follows the first
        assert_eq!(sequences.len(), 2);
        let first: Vec<_> = sequences[0].following.iter().map(|r| r.timestamp).collect();
        assert_eq!(first, vec![4]);
        assert!(sequences[1].following.is_empty());
        assert!(wallet_sequences(&records, "arbitrum", MAX_WALLETS, FOLLOW_UP).is_empty());
    }
}
