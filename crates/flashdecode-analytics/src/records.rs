//! Loading transaction records exported as JSON lines.

use flashdecode_core::record::TransactionRecord;
use std::{
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info};

use crate::error::AnalysisError;

/// Read one `TransactionRecord` per non-blank line.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<TransactionRecord>, AnalysisError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnalysisError::Io {
            path: "<records>".into(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| AnalysisError::Record {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load a JSON-lines export from disk.
pub fn load_records(path: &Path) -> Result<Vec<TransactionRecord>, AnalysisError> {
    let file = std::fs::File::open(path).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = read_records(BufReader::new(file))?;
    info!(path = %path.display(), count = records.len(), "loaded transaction records");
    Ok(records)
}

/// Keep records whose `value` (wei) is at least `min_value`. Records with a
/// value that is not a decimal integer are dropped.
pub fn filter_min_value(records: Vec<TransactionRecord>, min_value: u128) -> Vec<TransactionRecord> {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| {
            r.value
                .trim()
                .parse::<u128>()
                .map_or(false, |v| v >= min_value)
        })
        .collect();
    debug!(min_value, before, after = kept.len(), "filtered records by value");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;

    #[test]
    fn min_value_keeps_equal_and_larger() {
        let with_value = |value: &str| TransactionRecord {
            value: value.into(),
            ..record("ethereum", "flashLoan", String::new(), 0)
        };
        let records = vec![
            with_value("999"),
            with_value("1000"),
            with_value("1000000000000000000000"),
            with_value("0x10"),
            with_value(""),
        ];
        let kept = filter_min_value(records, 1000);
        let values: Vec<_> = kept.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["1000", "1000000000000000000000"]);
    }

    #[test]
    fn zero_min_value_keeps_parsable_records() {
        let records = vec![record("ethereum", "swap", String::new(), 0)];
        assert_eq!(filter_min_value(records, 0).len(), 1);
    }

    #[test]
    fn skips_blank_lines() {
        let text = "\n{\"network\":\"ethereum\",\"timestamp\":1}\n\n{\"network\":\"polygon\",\"timestamp\":2}\n";
        let records = read_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].network, "polygon");
    }

    #[test]
    fn reports_offending_line() {
        let text = "{\"network\":\"ethereum\",\"timestamp\":1}\n{oops}\n";
        match read_records(text.as_bytes()) {
            Err(AnalysisError::Record { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a record error, got {other:?}"),
        }
    }
}
