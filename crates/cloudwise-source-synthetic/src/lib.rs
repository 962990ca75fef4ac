//! Synthetic source for cloudwise
//!
//! This crate implements the source trait with a seeded generator, so
//! demos and tests get realistic billing data without an export file.

pub mod generator;

pub use generator::{SyntheticConfig, SyntheticGenerator};
