//! The result-cache capability handed to analyses.
//!
//! Analyses never reach for a global client; whoever builds them passes an
//! implementation in. Values are opaque bytes so the store can be anything
//! from an in-process map to a remote key-value server.

/// A byte-oriented key-value cache.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one cache can be shared by
/// analyses running on different threads.
pub trait Cache: Send + Sync {
    /// Fetch the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: Vec<u8>);
}

/// A cache that never holds anything. Every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _key: &str, _value: Vec<u8>) {}
}
