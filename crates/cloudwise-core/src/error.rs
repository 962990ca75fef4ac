//! Error types for cloudwise
//!
//! This module defines the error types used throughout the cloudwise library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use cloudwise_core::error::{CloudwiseError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CloudwiseError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::types::DailyDate;

/// Main error type for cloudwise operations
///
/// Source-layer variants (`Io`, `Csv`, `InputFormat`, `InvalidSource`) halt
/// the pipeline before any result is produced. Pipeline variants
/// (`EmptyInput`, `EmptyRange`, `NonFiniteStatistics`, `NoMatchingRecords`)
/// are explicit outcomes rather than numeric garbage.
#[derive(Error, Debug)]
pub enum CloudwiseError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Billing input is missing columns or has unparseable values
    #[error("Invalid input format: {0}")]
    InputFormat(String),

    /// No billing records to aggregate
    #[error("No billing records to analyze")]
    EmptyInput,

    /// A date range cannot be derived from an empty series
    #[error("Cannot build a date range from an empty series")]
    EmptyRange,

    /// Cost arithmetic overflowed to infinity or NaN
    #[error("Cost statistics are not finite: {0}")]
    NonFiniteStatistics(String),

    /// A flagged day has no raw records to explain it
    #[error("No billing records found for {0}")]
    NoMatchingRecords(DailyDate),

    /// Unrecognized or incomplete data source selection
    #[error("Invalid data source: {0}")]
    InvalidSource(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in cloudwise
///
/// # Example
///
/// ```
/// use cloudwise_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CloudwiseError>;
