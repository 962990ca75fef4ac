//! Core types, traits, and utilities for cloudwise
//!
//! This crate provides the foundational billing types, the aggregated
//! row types handed to the presentation layer, error handling, and the
//! `BillingSource` trait implemented by every record source.

pub mod aggregation_types;
pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use error::{CloudwiseError, Result};
pub use provider::BillingSource;
pub use types::{BillingRecord, DailyDate, DataSource, RegionName, ServiceName, Severity, ZScoreThreshold};
