//! In-memory `Cache` implementation and the JSON read-through helper.
//!
//! Suitable for tests, CLI use and single-process deployments.

use flashdecode_core::cache::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};
use tracing::{debug, warn};

use crate::error::AnalysisError;

/// Thread-safe in-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: Vec<u8>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// Return the JSON value cached under `key`, or compute, cache and return it.
///
/// With `use_cache == false` the lookup is skipped but the fresh result is
/// still stored. An entry that no longer deserializes is treated as a miss.
pub fn cached_json<T, F>(
    cache: &dyn Cache,
    key: &str,
    use_cache: bool,
    compute: F,
) -> Result<T, AnalysisError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if use_cache {
        if let Some(bytes) = cache.get(key) {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key, "loaded result from cache");
                    return Ok(value);
                }
                Err(e) => warn!(key, "discarding unreadable cache entry: {e}"),
            }
        }
    }

    let value = compute();
    let bytes = serde_json::to_vec(&value).map_err(|source| AnalysisError::CachePayload {
        key: key.to_string(),
        source,
    })?;
    cache.put(key, bytes);
    debug!(key, "stored result in cache");
    Ok(value)
}
