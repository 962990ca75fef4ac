//! CLI interface for cloudwise
//!
//! This module defines the command-line interface using clap. Global flags
//! select the billing source and detection threshold; the subcommand picks
//! which view of the analysis to print.
//!
//! # Example
//!
//! ```bash
//! # Anomaly report over the bundled synthetic data
//! cloudwise
//!
//! # Scored daily series from a billing export, as JSON
//! cloudwise --source csv --file billing.csv --json daily
//!
//! # Lower the detection threshold
//! cloudwise --threshold 1.5 anomalies
//! ```

use crate::error::Result;
use crate::types::{DailyDate, DataSource, ZScoreThreshold};
use clap::{Parser, Subcommand};
use cloudwise_source_synthetic::SyntheticConfig;
use std::path::PathBuf;

/// Detect anomalous days in cloud billing data
#[derive(Parser, Debug, Clone)]
#[command(name = "cloudwise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Billing data source: csv or synthetic
    #[arg(
        long,
        short = 's',
        default_value = "synthetic",
        env = "CLOUDWISE_SOURCE",
        global = true
    )]
    pub source: DataSource,

    /// Billing CSV file (required with --source csv)
    #[arg(long, short = 'f', env = "CLOUDWISE_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Z-score above which a day is flagged as anomalous
    #[arg(
        long,
        short = 't',
        default_value = "2.0",
        env = "CLOUDWISE_THRESHOLD",
        global = true
    )]
    pub threshold: ZScoreThreshold,

    /// Seed for synthetic data
    #[arg(long, default_value_t = SyntheticConfig::DEFAULT_SEED, global = true)]
    pub seed: u64,

    /// First day of synthetic data (YYYY-MM-DD)
    #[arg(long, default_value = "2025-06-01", global = true)]
    pub start: DailyDate,

    /// Last day of synthetic data (YYYY-MM-DD)
    #[arg(long, default_value = "2025-08-31", global = true)]
    pub end: DailyDate,

    /// Seed for explanation templates (random when omitted)
    #[arg(long, global = true)]
    pub explain_seed: Option<u64>,

    /// Subcommand to execute (defaults to `anomalies`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show anomalous days with their top service and an explanation
    Anomalies,
    /// Show the gap-filled daily series with z-scores
    Daily,
    /// Show total cost per service
    Services,
    /// Show total cost per region
    Regions,
    /// Show total cost per calendar month
    Monthly,
    /// Show a date × service cost matrix
    Pivot,
    /// Show each service's share of daily spend
    Contribution,
}

impl Cli {
    /// Subcommand to run, defaulting to the anomaly report
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Anomalies)
    }

    /// Generator settings from the synthetic-data flags
    pub fn synthetic_config(&self) -> Result<SyntheticConfig> {
        SyntheticConfig::new(self.seed, self.start, self.end)
    }
}
