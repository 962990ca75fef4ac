//! cloudwise - Detect anomalous days in cloud billing data
//!
//! This library provides functionality to:
//! - Load billing line items from a CSV export or a seeded synthetic generator
//! - Aggregate costs per day, service, region and month
//! - Score each day's spend with a population z-score and flag outliers
//! - Attribute every flagged day to its most expensive service
//! - Render the results as tables or JSON
//!
//! # Examples
//!
//! ```
//! use cloudwise::{
//!     pipeline::Analysis,
//!     source::load_records,
//!     types::{DataSource, ZScoreThreshold},
//! };
//! use cloudwise_source_synthetic::SyntheticConfig;
//!
//! # fn main() -> cloudwise::Result<()> {
//! let records = load_records(DataSource::Synthetic, None, SyntheticConfig::default())?;
//! let analysis = Analysis::run(&records, ZScoreThreshold::default())?;
//!
//! for row in &analysis.report {
//!     println!("{} {} {}", row.date, row.top_service, row.severity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod anomaly;
pub mod cli;
pub mod commands;
pub mod explain;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;

pub use cloudwise_core::{aggregation_types, error, types};

// Re-export commonly used types
pub use error::{CloudwiseError, Result};
pub use types::{BillingRecord, DailyDate, DataSource, ServiceName, Severity, ZScoreThreshold};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
