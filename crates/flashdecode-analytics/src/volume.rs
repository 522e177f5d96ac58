//! Transaction volume by function, network and outcome.

use flashdecode_core::record::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Transactions calling `function_name` on `network` with the given outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRow {
    pub function_name: String,
    pub network: String,
    pub is_error: u8,
    pub count: u64,
}

/// Flash loans against all transactions seen on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkVolume {
    pub network: String,
    pub flash_loans: u64,
    pub all: u64,
}

impl NetworkVolume {
    /// Flash loans as a fraction of all transactions, 0.0 when empty.
    pub fn flash_loan_share(&self) -> f64 {
        if self.all == 0 {
            0.0
        } else {
            self.flash_loans as f64 / self.all as f64
        }
    }
}

/// Volume report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeReport {
    /// One row for every function × network × outcome combination, zeros included
    pub rows: Vec<VolumeRow>,
    pub networks: Vec<NetworkVolume>,
}

impl VolumeReport {
    /// Every network merged into one row named `all`.
    pub fn total(&self) -> NetworkVolume {
        self.networks.iter().fold(
            NetworkVolume {
                network: "all".into(),
                flash_loans: 0,
                all: 0,
            },
            |mut acc, n| {
                acc.flash_loans += n.flash_loans;
                acc.all += n.all;
                acc
            },
        )
    }
}

pub fn volume(records: &[TransactionRecord]) -> VolumeReport {
    let mut counts: BTreeMap<(&str, &str, u8), u64> = BTreeMap::new();
    let mut functions = BTreeSet::new();
    let mut networks: BTreeMap<&str, NetworkVolume> = BTreeMap::new();

    for record in records {
        let outcome = u8::from(!record.succeeded());
        *counts
            .entry((record.function_name.as_str(), record.network.as_str(), outcome))
            .or_insert(0) += 1;
        functions.insert(record.function_name.as_str());

        let entry = networks
            .entry(record.network.as_str())
            .or_insert_with(|| NetworkVolume {
                network: record.network.clone(),
                flash_loans: 0,
                all: 0,
            });
        entry.all += 1;
        if record.is_flash_loan() {
            entry.flash_loans += 1;
        }
    }

    let mut rows = Vec::with_capacity(functions.len() * networks.len() * 2);
    for function_name in &functions {
        for network in networks.keys() {
            for is_error in [0u8, 1] {
                rows.push(VolumeRow {
                    function_name: function_name.to_string(),
                    network: network.to_string(),
                    is_error,
                    count: counts
                        .get(&(*function_name, *network, is_error))
                        .copied()
                        .unwrap_or(0),
                });
            }
        }
    }

    VolumeReport {
        rows,
        networks: networks.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{record, simple_input};

    #[test]
    fn fills_missing_combinations_with_zero() {
        let records = vec![
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 0),
            record("ethereum", "flashLoanSimple", simple_input(0xaa), 1),
            record("polygon", "transfer", String::new(), 0),
        ];
        let report = volume(&records);
        // 2 functions × 2 networks × 2 outcomes
        assert_eq!(report.rows.len(), 8);

        let count = |f: &str, n: &str, e: u8| {
            report
                .rows
                .iter()
                .find(|r| r.function_name == f && r.network == n && r.is_error == e)
                .map(|r| r.count)
        };
        assert_eq!(count("flashLoanSimple", "ethereum", 0), Some(1));
        assert_eq!(count("flashLoanSimple", "ethereum", 1), Some(1));
        assert_eq!(count("flashLoanSimple", "polygon", 0), Some(0));
        assert_eq!(count("transfer", "polygon", 0), Some(1));
    }

    #[test]
    fn network_share_counts_every_flash_loan() {
        let records = vec![
            record("ethereum", "flashLoan", String::new(), 1),
            record("ethereum", "flashLoanSimple", String::new(), 0),
            record("ethereum", "swap", String::new(), 0),
            record("ethereum", "approve", String::new(), 0),
        ];
        let report = volume(&records);
        assert_eq!(report.networks.len(), 1);
        let eth = &report.networks[0];
        assert_eq!((eth.flash_loans, eth.all), (2, 4));
        assert!((eth.flash_loan_share() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn total_merges_networks() {
        let records = vec![
            record("ethereum", "flashLoan", String::new(), 0),
            record("ethereum", "swap", String::new(), 0),
            record("polygon", "flashLoanSimple", String::new(), 1),
            record("polygon", "flashLoan", String::new(), 0),
            record("polygon", "transfer", String::new(), 0),
        ];
        let total = volume(&records).total();
        assert_eq!(total.network, "all");
        assert_eq!((total.flash_loans, total.all), (3, 5));
        assert!((total.flash_loan_share() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn empty_input() {
        let report = volume(&[]);
        assert!(report.rows.is_empty());
        assert!(report.networks.is_empty());
        assert_eq!(report.total().all, 0);
    }
}
