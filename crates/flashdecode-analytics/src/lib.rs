//! # flashdecode-analytics
//!
//! Flash-loan usage analyses over exported transaction records: which tokens
//! are borrowed, what the loans cost in gas, how much of the traffic they
//! make up, when they happen and what borrowers do next.
//!
//! Results are memoized through an injected [`Cache`] under stable keys so a
//! shared store can serve repeated reports.

pub mod cache;
pub mod config;
pub mod error;
pub mod fees;
pub mod frequency;
pub mod records;
pub mod sequence;
pub mod tokens;
pub mod volume;

pub use cache::{cached_json, MemoryCache};
pub use config::{AnalysisConfig, LogConfig, NetworkConfig};
pub use error::AnalysisError;
pub use fees::FeeMetrics;
pub use frequency::{DailyCount, HourlyHeatmap};
pub use records::{filter_min_value, load_records};
pub use sequence::LoanSequence;
pub use tokens::TokenCount;
pub use volume::{NetworkVolume, VolumeReport, VolumeRow};

use flashdecode_core::{cache::Cache, record::TransactionRecord};
use flashdecode_evm::CallDecoder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Loan sequences for one configured network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSequences {
    pub network: String,
    pub sequences: Vec<LoanSequence>,
}

/// Runs the analyses with a shared decoder, configuration and cache.
pub struct Analyzer {
    config: AnalysisConfig,
    decoder: CallDecoder,
    cache: Arc<dyn Cache>,
}

impl Analyzer {
    /// The decoder's array cap comes from `config.max_array_len`.
    pub fn new(config: AnalysisConfig, cache: Arc<dyn Cache>) -> Self {
        let decoder = CallDecoder::new().with_limits(config.decode_limits());
        Self {
            config,
            decoder,
            cache,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn decoder(&self) -> &CallDecoder {
        &self.decoder
    }

    /// Cached under `flash_loan_tokens` (per network) or `flash_loan_tokens_all`.
    pub fn token_frequency(
        &self,
        records: &[TransactionRecord],
        by_network: bool,
        use_cache: bool,
    ) -> Result<Vec<TokenCount>, AnalysisError> {
        let key = if by_network {
            "flash_loan_tokens"
        } else {
            "flash_loan_tokens_all"
        };
        cached_json(self.cache.as_ref(), key, use_cache, || {
            tokens::token_frequency(&self.decoder, &self.config, records, by_network)
        })
    }

    /// Fee metrics for every configured network that has flash loans, in
    /// config order. Each network is cached under `flash_loan_fee_<network>`.
    pub fn fees(
        &self,
        records: &[TransactionRecord],
        use_cache: bool,
    ) -> Result<Vec<FeeMetrics>, AnalysisError> {
        let mut metrics = Vec::with_capacity(self.config.networks.len());
        for (network, settings) in &self.config.networks {
            let key = format!("flash_loan_fee_{network}");
            let computed: Option<FeeMetrics> =
                cached_json(self.cache.as_ref(), &key, use_cache, || {
                    fees::fee_metrics(records, network, settings.native_price_usd)
                })?;
            metrics.extend(computed);
        }
        Ok(metrics)
    }

    /// Cached under `flash_loan_volume`.
    pub fn volume(
        &self,
        records: &[TransactionRecord],
        use_cache: bool,
    ) -> Result<VolumeReport, AnalysisError> {
        cached_json(self.cache.as_ref(), "flash_loan_volume", use_cache, || {
            volume::volume(records)
        })
    }

    /// Cached under `flash_loan_frequency` (per network) or `flash_loan_frequency_all`.
    pub fn daily_frequency(
        &self,
        records: &[TransactionRecord],
        by_network: bool,
        use_cache: bool,
    ) -> Result<Vec<DailyCount>, AnalysisError> {
        let key = if by_network {
            "flash_loan_frequency"
        } else {
            "flash_loan_frequency_all"
        };
        cached_json(self.cache.as_ref(), key, use_cache, || {
            frequency::daily_frequency(records, by_network)
        })
    }

    /// Cached under `flash_loan_frequency_day_hour`.
    pub fn day_hour_heatmap(
        &self,
        records: &[TransactionRecord],
        use_cache: bool,
    ) -> Result<HourlyHeatmap, AnalysisError> {
        cached_json(
            self.cache.as_ref(),
            "flash_loan_frequency_day_hour",
            use_cache,
            || frequency::day_hour_heatmap(records),
        )
    }

    /// Up to [`sequence::MAX_WALLETS`] borrowers per configured network, each
    /// loan followed by the sender's next [`sequence::FOLLOW_UP`] transactions.
    /// Cached per network under `flash_loan_wallets_analysis_<network>`.
    pub fn wallet_sequences(
        &self,
        records: &[TransactionRecord],
        use_cache: bool,
    ) -> Result<Vec<WalletSequences>, AnalysisError> {
        let mut out = Vec::with_capacity(self.config.networks.len());
        for network in self.config.networks.keys() {
            let key = format!("flash_loan_wallets_analysis_{network}");
            let sequences = cached_json(self.cache.as_ref(), &key, use_cache, || {
                sequence::wallet_sequences(
                    records,
                    network,
                    sequence::MAX_WALLETS,
                    sequence::FOLLOW_UP,
                )
            })?;
            out.push(WalletSequences {
                network: network.clone(),
                sequences,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use flashdecode_core::record::TransactionRecord;

    const PAD: &str = "000000000000000000000000";

    pub fn record(network: &str, function_name: &str, input: String, is_error: u8) -> TransactionRecord {
        TransactionRecord {
            hash: "0xfeed".into(),
            network: network.into(),
            from: String::new(),
            function_name: function_name.into(),
            input,
            timestamp: 1_700_000_000,
            gas_used: 100_000,
            gas_price: 1_000_000_000,
            is_error,
            value: "0".into(),
        }
    }

    fn word(value: usize) -> String {
        format!("{value:064x}")
    }

    fn address(fill: u8) -> String {
        format!("{PAD}{}", format!("{fill:02x}").repeat(20))
    }

    /// flashLoanSimple borrowing 1000 of the token `0x<fill × 20>`.
    pub fn simple_input(fill: u8) -> String {
        let mut hex = String::from("0x5cffe9de");
        hex += &address(0x11);
        hex += &address(fill);
        hex += &word(1000);
        hex += &word(0xa0);
        hex += &word(0);
        hex += &word(0);
        hex
    }

    /// flashLoan borrowing 1000 of each token `0x<fill × 20>`.
    pub fn multi_input(fills: &[u8]) -> String {
        let array_len = 32 * (1 + fills.len());
        let assets = 7 * 32;
        let amounts = assets + array_len;
        let modes = amounts + array_len;
        let params = modes + array_len;

        let mut hex = String::from("0xab9c4b5d");
        hex += &address(0x11);
        hex += &word(assets);
        hex += &word(amounts);
        hex += &word(modes);
        hex += &address(0x11);
        hex += &word(params);
        hex += &word(0);

        hex += &word(fills.len());
        for fill in fills {
            hex += &address(*fill);
        }
        hex += &word(fills.len());
        for _ in fills {
            hex += &word(1000);
        }
        hex += &word(fills.len());
        for _ in fills {
            hex += &word(0);
        }
        hex += &word(0);
        hex
    }
}
