//! flashdecode CLI.
//!
//! # Commands
//! ```text
//! flashdecode decode    --calldata <hex> [--json]
//! flashdecode selectors
//! flashdecode batch     --records <file.jsonl> [--json]
//! flashdecode analyze   --records <file.jsonl> [--config <yaml>] [--report <kind>] [--by-network] [--min-value <wei>] [--json]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flashdecode_analytics::{AnalysisConfig, Analyzer, MemoryCache};
use flashdecode_evm::CallDecoder;
use std::{path::PathBuf, sync::Arc};

mod cmd_analyze;
mod cmd_batch;
mod cmd_decode;
mod logging;

#[derive(Parser)]
#[command(
    name = "flashdecode",
    about = "Decode flash-loan call-data and report on flash-loan activity",
    long_about = "
flashdecode: decode Aave-style flashLoan / flashLoanSimple call-data and
analyse exported transaction records.

ENVIRONMENT VARIABLES:
  RUST_LOG    Log filter, overrides the config file and --verbose
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML analysis config (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one call-data payload
    Decode {
        /// Raw call-data (hex, 0x prefix optional)
        #[arg(long)]
        calldata: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered selectors
    Selectors,

    /// Decode every record of a JSON-lines export and summarise the outcome
    Batch {
        /// JSON-lines file, one transaction record per line
        #[arg(long)]
        records: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run usage reports over a JSON-lines export
    Analyze {
        /// JSON-lines file, one transaction record per line
        #[arg(long)]
        records: PathBuf,
        /// Which report to produce
        #[arg(long, value_enum, default_value_t = cmd_analyze::Report::All)]
        report: cmd_analyze::Report,
        /// Split token and daily counts by network
        #[arg(long)]
        by_network: bool,
        /// Drop records transferring less than this many wei
        #[arg(long)]
        min_value: Option<u128>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AnalysisConfig::default(),
    };
    logging::init(&config.log, cli.verbose);

    match cli.command {
        Commands::Decode { calldata, json } => {
            let decoder = CallDecoder::new().with_limits(config.decode_limits());
            cmd_decode::run(&decoder, &calldata, json)
        }

        Commands::Selectors => cmd_decode::selectors(&CallDecoder::new()),

        Commands::Batch { records, json } => {
            let decoder = CallDecoder::new().with_limits(config.decode_limits());
            cmd_batch::run(&decoder, &records, json)
        }

        Commands::Analyze { records, report, by_network, min_value, json } => {
            let analyzer = Analyzer::new(config, Arc::new(MemoryCache::new()));
            cmd_analyze::run(&analyzer, &records, report, by_network, min_value, json)
        }
    }
}
