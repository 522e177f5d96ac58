//! Rayon-powered batch decoding of stored transactions.
//!
//! Every call decodes independently, so records are fanned out across the
//! Rayon pool without coordination. Failures never abort the batch: each is
//! logged and returned alongside the successes.

use flashdecode_core::{call::DecodedCall, error::DecodeError, record::TransactionRecord};
use rayon::prelude::*;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::decoder::CallDecoder;

/// Result of decoding a batch. Both lists carry the input index and are in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub decoded: Vec<(usize, DecodedCall)>,
    pub failures: Vec<(usize, DecodeError)>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.decoded.len() + self.failures.len()
    }

    /// Failure tally keyed by `DecodeError::kind`.
    pub fn failure_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, err) in &self.failures {
            *counts.entry(err.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Successful decodes tallied by method name.
    pub fn method_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for (_, call) in &self.decoded {
            *counts.entry(call.method.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Decode hex call-data strings in parallel.
pub fn decode_hex_batch<S: AsRef<str> + Sync>(decoder: &CallDecoder, inputs: &[S]) -> BatchOutcome {
    let results: Vec<(usize, Result<DecodedCall, DecodeError>)> = inputs
        .par_iter()
        .enumerate()
        .map(|(idx, input)| (idx, decoder.decode_hex(input.as_ref())))
        .collect();
    split(results)
}

/// Decode the `input` of every record in parallel, logging each failure
/// with its transaction hash.
pub fn decode_records<R>(decoder: &CallDecoder, records: &[R]) -> BatchOutcome
where
    R: Borrow<TransactionRecord> + Sync,
{
    let results: Vec<(usize, Result<DecodedCall, DecodeError>)> = records
        .par_iter()
        .enumerate()
        .map(|(idx, record)| {
            let record: &TransactionRecord = Borrow::borrow(record);
            let result = decoder.decode_hex(&record.input);
            if let Err(err) = &result {
                warn!(
                    tx = %record.hash,
                    network = %record.network,
                    kind = err.kind(),
                    "skipping undecodable call-data: {err}"
                );
            }
            (idx, result)
        })
        .collect();

    let outcome = split(results);
    info!(
        decoded = outcome.decoded.len(),
        failed = outcome.failures.len(),
        "batch decode complete"
    );
    outcome
}

fn split(results: Vec<(usize, Result<DecodedCall, DecodeError>)>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (idx, r) in results {
        match r {
            Ok(call) => outcome.decoded.push((idx, call)),
            Err(err) => outcome.failures.push((idx, err)),
        }
    }
    outcome
}
