//! CSV source for cloudwise
//!
//! This crate implements the source trait for billing exports stored as
//! CSV, normalising column names and coercing cost values.

pub mod data_loader;

pub use data_loader::CsvLoader;
