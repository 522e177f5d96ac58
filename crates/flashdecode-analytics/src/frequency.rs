//! When flash loans happen: per-day counts and a weekday × hour heatmap.

use chrono::{Datelike, NaiveDate, Timelike};
use flashdecode_core::record::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Successful flash loans on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    /// `None` when counts are aggregated across networks
    pub network: Option<String>,
    pub count: u64,
}

/// Successful flash loans bucketed by weekday (Monday first) and UTC hour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyHeatmap {
    pub counts: [[u64; 24]; 7],
}

impl HourlyHeatmap {
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// `(weekday, hour)` of the fullest bucket, earliest on ties.
    /// `None` for an empty heatmap.
    pub fn busiest(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, u64)> = None;
        for (day, hours) in self.counts.iter().enumerate() {
            for (hour, &count) in hours.iter().enumerate() {
                if count > 0 && best.map_or(true, |(_, _, c)| count > c) {
                    best = Some((day, hour, count));
                }
            }
        }
        best.map(|(day, hour, _)| (day, hour))
    }
}

fn successful_loans(records: &[TransactionRecord]) -> impl Iterator<Item = &TransactionRecord> {
    records.iter().filter(|r| r.is_flash_loan() && r.succeeded())
}

/// Per-day flash-loan counts, ordered by date then network.
pub fn daily_frequency(records: &[TransactionRecord], by_network: bool) -> Vec<DailyCount> {
    let mut counts: BTreeMap<(NaiveDate, Option<&str>), u64> = BTreeMap::new();
    for record in successful_loans(records) {
        let Some(time) = record.datetime() else {
            warn!(tx = %record.hash, timestamp = record.timestamp, "timestamp out of range, skipping");
            continue;
        };
        let network = by_network.then_some(record.network.as_str());
        *counts.entry((time.date_naive(), network)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((date, network), count)| DailyCount {
            date,
            network: network.map(str::to_string),
            count,
        })
        .collect()
}

pub fn day_hour_heatmap(records: &[TransactionRecord]) -> HourlyHeatmap {
    let mut heatmap = HourlyHeatmap::default();
    for record in successful_loans(records) {
        let Some(time) = record.datetime() else {
            warn!(tx = %record.hash, timestamp = record.timestamp, "timestamp out of range, skipping");
            continue;
        };
        let day = time.weekday().num_days_from_monday() as usize;
        heatmap.counts[day][time.hour() as usize] += 1;
    }
    heatmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{record, simple_input};

    // 2023-11-14 22:13:20 UTC, a Tuesday
    const TUESDAY_22H: i64 = 1_700_000_000;
    const HOUR: i64 = 3_600;

    fn at(network: &str, timestamp: i64, is_error: u8) -> TransactionRecord {
        let mut r = record(network, "flashLoanSimple", simple_input(0xaa), is_error);
        r.timestamp = timestamp;
        r
    }

    #[test]
    fn daily_counts_split_at_utc_midnight() {
        let records = vec![
            at("ethereum", TUESDAY_22H, 0),
            at("ethereum", TUESDAY_22H + HOUR, 0),
            at("polygon", TUESDAY_22H + 2 * HOUR, 0),
            at("ethereum", TUESDAY_22H, 1),
        ];
        let tue = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
        let wed = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();

        let all = daily_frequency(&records, false);
        assert_eq!(
            all,
            vec![
                DailyCount { date: tue, network: None, count: 2 },
                DailyCount { date: wed, network: None, count: 1 },
            ]
        );

        let split = daily_frequency(&records, true);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].network.as_deref(), Some("ethereum"));
        assert_eq!(split[1], DailyCount { date: wed, network: Some("polygon".into()), count: 1 });
    }

    #[test]
    fn heatmap_is_monday_first() {
        let records = vec![
            at("ethereum", TUESDAY_22H, 0),
            at("ethereum", TUESDAY_22H + 60, 0),
            at("ethereum", TUESDAY_22H + 3 * HOUR, 0),
        ];
        let heatmap = day_hour_heatmap(&records);
        assert_eq!(heatmap.counts[1][22], 2);
        assert_eq!(heatmap.counts[2][1], 1);
        assert_eq!(heatmap.total(), 3);
        assert_eq!(heatmap.busiest(), Some((1, 22)));
    }

    #[test]
    fn empty_heatmap_has_no_peak() {
        assert_eq!(day_hour_heatmap(&[]).busiest(), None);
    }

    #[test]
    fn non_loans_are_ignored() {
        let mut transfer = at("ethereum", TUESDAY_22H, 0);
        transfer.function_name = "transfer".into();
        assert!(daily_frequency(&[transfer], true).is_empty());
    }
}
