//! `flashdecode batch`: decode every record of a JSON-lines export.

use anyhow::{Context, Result};
use flashdecode_analytics::load_records;
use flashdecode_evm::{decode_records, CallDecoder};
use std::{path::Path, time::Instant};

pub fn run(decoder: &CallDecoder, records_path: &Path, as_json: bool) -> Result<()> {
    let records = load_records(records_path)
        .with_context(|| format!("load records from '{}'", records_path.display()))?;

    let start = Instant::now();
    let outcome = decode_records(decoder, &records);
    let elapsed = start.elapsed();

    if as_json {
        let summary = serde_json::json!({
            "total": outcome.total(),
            "decoded": outcome.decoded.len(),
            "methods": outcome.method_counts(),
            "failures": outcome.failure_counts(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Records:   {}", outcome.total());
    println!("Decoded:   {}", outcome.decoded.len());
    for (method, count) in outcome.method_counts() {
        println!("  {:20} {}", method, count);
    }
    println!("Failed:    {}", outcome.failures.len());
    for (kind, count) in outcome.failure_counts() {
        println!("  {:20} {}", kind, count);
    }
    println!("Duration:  {:.3}s", elapsed.as_secs_f64());
    Ok(())
}
