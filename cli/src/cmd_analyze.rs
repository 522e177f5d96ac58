//! `flashdecode analyze`: usage reports over a JSON-lines export.

use anyhow::{Context, Result};
use clap::ValueEnum;
use flashdecode_analytics::{filter_min_value, load_records, Analyzer};
use flashdecode_core::record::TransactionRecord;
use std::path::Path;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Tokens,
    Fees,
    Volume,
    Frequency,
    /// What flash-loan wallets do next
    Sequence,
    All,
}

impl Report {
    fn includes(self, other: Report) -> bool {
        self == Report::All || self == other
    }
}

pub fn run(
    analyzer: &Analyzer,
    records_path: &Path,
    report: Report,
    by_network: bool,
    min_value: Option<u128>,
    as_json: bool,
) -> Result<()> {
    let mut records = load_records(records_path)
        .with_context(|| format!("load records from '{}'", records_path.display()))?;
    if let Some(min_value) = min_value {
        records = filter_min_value(records, min_value);
    }

    if as_json {
        print_json(analyzer, &records, report, by_network)
    } else {
        print_text(analyzer, &records, report, by_network)
    }
}

fn print_json(
    analyzer: &Analyzer,
    records: &[TransactionRecord],
    report: Report,
    by_network: bool,
) -> Result<()> {
    let mut out = serde_json::Map::new();
    if report.includes(Report::Tokens) {
        let tokens = analyzer.token_frequency(records, by_network, true)?;
        out.insert("tokens".into(), serde_json::to_value(tokens)?);
    }
    if report.includes(Report::Fees) {
        out.insert("fees".into(), serde_json::to_value(analyzer.fees(records, true)?)?);
    }
    if report.includes(Report::Volume) {
        let volume = analyzer.volume(records, true)?;
        out.insert(
            "volume".into(),
            serde_json::json!({
                "rows": volume.rows,
                "networks": volume.networks,
                "total": volume.total(),
            }),
        );
    }
    if report.includes(Report::Frequency) {
        let daily = analyzer.daily_frequency(records, by_network, true)?;
        let heatmap = analyzer.day_hour_heatmap(records, true)?;
        out.insert(
            "frequency".into(),
            serde_json::json!({ "daily": daily, "day_hour": heatmap.counts }),
        );
    }
    if report.includes(Report::Sequence) {
        let sequences = analyzer.wallet_sequences(records, true)?;
        out.insert("sequence".into(), serde_json::to_value(sequences)?);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_text(
    analyzer: &Analyzer,
    records: &[TransactionRecord],
    report: Report,
    by_network: bool,
) -> Result<()> {
    if report.includes(Report::Tokens) {
        println!("Borrowed tokens:");
        for row in analyzer.token_frequency(records, by_network, true)? {
            println!(
                "  {:10} {:42} {}",
                row.network.as_deref().unwrap_or("all"),
                row.token,
                row.count
            );
        }
        println!();
    }

    if report.includes(Report::Fees) {
        println!("Gas fees:");
        for m in analyzer.fees(records, true)? {
            println!("  {} ({} loans)", m.network, m.transactions);
            println!("    total:    {} (${})", m.total_fee_paid, m.total_fee_paid_usd.round_dp(2));
            println!("    average:  {} (${})", m.average_fee_paid, m.average_fee_paid_usd.round_dp(2));
        }
        println!();
    }

    if report.includes(Report::Volume) {
        let volume = analyzer.volume(records, true)?;
        println!("Volume:");
        for n in volume.networks.iter().chain(std::iter::once(&volume.total())) {
            println!(
                "  {:10} {} of {} transactions are flash loans ({:.2}%)",
                n.network,
                n.flash_loans,
                n.all,
                100.0 * n.flash_loan_share()
            );
        }
        for row in volume.rows.iter().filter(|r| r.count > 0) {
            let outcome = if row.is_error == 0 { "ok" } else { "reverted" };
            println!(
                "  {:20} {:10} {:8} {}",
                row.function_name, row.network, outcome, row.count
            );
        }
        println!();
    }

    if report.includes(Report::Frequency) {
        println!("Flash loans per day:");
        for day in analyzer.daily_frequency(records, by_network, true)? {
            println!(
                "  {} {:10} {}",
                day.date,
                day.network.as_deref().unwrap_or("all"),
                day.count
            );
        }
        let heatmap = analyzer.day_hour_heatmap(records, true)?;
        if let Some((day, hour)) = heatmap.busiest() {
            println!(
                "Busiest slot: {} {:02}:00 UTC ({} loans)",
                WEEKDAYS[day], hour, heatmap.counts[day][hour]
            );
        }
        println!();
    }

    if report.includes(Report::Sequence) {
        println!("After the loan:");
        for group in analyzer.wallet_sequences(records, true)? {
            for seq in &group.sequences {
                println!(
                    "  {:10} {} {} at {}",
                    group.network, seq.wallet, seq.loan.function_name, seq.loan.timestamp
                );
                for next in &seq.following {
                    println!("    +{:>6}s {}", next.timestamp - seq.loan.timestamp, next.function_name);
                }
            }
        }
    }
    Ok(())
}
