//! Analysis configuration, loaded from YAML.
//!
//! Every field has a default so an empty file (or no file) is valid.

use flashdecode_evm::{decoder::DEFAULT_MAX_ARRAY_LEN, DecodeLimits};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use crate::error::AnalysisError;

/// Per-network settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Price of the network's native gas token in USD
    pub native_price_usd: Decimal,
}

/// The `log:` section. `RUST_LOG`, when set, takes precedence over all of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level for everything without an override
    pub level: String,
    /// Per-crate levels, e.g. `flashdecode-evm: warn` to hide one warning per
    /// undecodable record during a batch
    pub components: BTreeMap<String, String>,
    /// One JSON object per event on stderr instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Filter directives in `EnvFilter` syntax. Crate names are accepted in
    /// either `flashdecode-evm` or `flashdecode_evm` form.
    pub fn directives(&self) -> String {
        self.components
            .iter()
            .fold(self.level.clone(), |mut out, (component, level)| {
                out.push(',');
                out.push_str(&component.replace('-', "_"));
                out.push('=');
                out.push_str(level);
                out
            })
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Largest array element count accepted from call-data
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Token addresses excluded from token statistics (compared case-insensitively)
    #[serde(default = "default_invalid_tokens")]
    pub invalid_tokens: Vec<String>,
    /// network slug → settings; fee metrics are reported for these networks, in order
    #[serde(default = "default_networks")]
    pub networks: IndexMap<String, NetworkConfig>,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_max_array_len() -> usize {
    DEFAULT_MAX_ARRAY_LEN
}

fn default_invalid_tokens() -> Vec<String> {
    vec![format!("0x{}", "0".repeat(40))]
}

fn default_networks() -> IndexMap<String, NetworkConfig> {
    let mut networks = IndexMap::new();
    networks.insert(
        "ethereum".to_string(),
        NetworkConfig {
            native_price_usd: Decimal::new(251_587, 2),
        },
    );
    networks.insert(
        "polygon".to_string(),
        NetworkConfig {
            native_price_usd: Decimal::new(32, 2),
        },
    );
    networks
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_array_len: default_max_array_len(),
            invalid_tokens: default_invalid_tokens(),
            networks: default_networks(),
            log: LogConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, AnalysisError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_array_len: self.max_array_len,
        }
    }

    pub fn is_invalid_token(&self, token: &str) -> bool {
        self.invalid_tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token))
    }
}
