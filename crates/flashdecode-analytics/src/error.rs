//! Errors raised by the analysis layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid transaction record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot serialize result for cache key '{key}': {source}")]
    CachePayload {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
