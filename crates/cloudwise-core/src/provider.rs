//! Source trait for billing record loaders
//!
//! This module defines the `BillingSource` trait that every record source
//! crate implements. It provides a uniform interface the binary dispatches
//! on, regardless of whether records come from a file or a generator.

use crate::error::Result;
use crate::types::BillingRecord;

/// Trait for billing record sources.
///
/// The whole dataset is materialised in memory; there is no streaming
/// ingestion.
pub trait BillingSource {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Load every billing record the source provides.
    fn load_records(&self) -> Result<Vec<BillingRecord>>;
}
