//! Billing source selection
//!
//! Maps a [`DataSource`] choice onto a concrete [`BillingSource`].

use crate::error::{CloudwiseError, Result};
use crate::types::{BillingRecord, DataSource};
use cloudwise_core::provider::BillingSource;
use cloudwise_source_csv::CsvLoader;
use cloudwise_source_synthetic::{SyntheticConfig, SyntheticGenerator};
use std::path::Path;
use tracing::info;

/// Build the source for `source`.
///
/// `csv` requires `file`; `synthetic` ignores it.
pub fn source_for(
    source: DataSource,
    file: Option<&Path>,
    synthetic: SyntheticConfig,
) -> Result<Box<dyn BillingSource>> {
    match (source, file) {
        (DataSource::Csv, Some(path)) => Ok(Box::new(CsvLoader::new(path))),
        (DataSource::Csv, None) => Err(CloudwiseError::InvalidSource(
            "csv source requires a file path".to_string(),
        )),
        (DataSource::Synthetic, _) => Ok(Box::new(SyntheticGenerator::new(synthetic))),
    }
}

/// Load every record from the selected source.
pub fn load_records(
    source: DataSource,
    file: Option<&Path>,
    synthetic: SyntheticConfig,
) -> Result<Vec<BillingRecord>> {
    let loader = source_for(source, file, synthetic)?;
    info!("Loading billing records from {} source", loader.name());
    loader.load_records()
}
