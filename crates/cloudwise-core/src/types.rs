//! Core domain types for cloudwise
//!
//! This module contains the fundamental types used throughout the cloudwise
//! library. These types provide strong typing for billing concepts like
//! service and region names, calendar days, and anomaly severity.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CloudwiseError;

/// Strongly-typed service name wrapper
///
/// # Examples
/// ```
/// use cloudwise_core::types::ServiceName;
///
/// let service = ServiceName::new("EC2");
/// assert_eq!(service.as_str(), "EC2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceName(String);

impl ServiceName {
    /// Create a new ServiceName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed region name wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionName(String);

impl RegionName {
    /// Create a new RegionName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RegionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Calendar day used as the key of every daily series
///
/// # Examples
/// ```
/// use cloudwise_core::types::DailyDate;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let daily = DailyDate::new(date);
///
/// assert_eq!(daily.format("%Y-%m-%d"), "2024-01-15");
/// assert_eq!(daily.format("%B %d, %Y"), "January 15, 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse(s: &str) -> crate::Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CloudwiseError::InvalidDate(format!("'{s}', expected YYYY-MM-DD")))
    }

    /// The following calendar day, or `None` at the end of chrono's range
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// First day of this date's month
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Whole days from `self` to `other` (negative if `other` is earlier)
    pub fn days_until(&self, other: &Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DailyDate {
    type Err = CloudwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A single billing line item
///
/// Records are produced by a [`BillingSource`](crate::provider::BillingSource)
/// and never mutated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Day the cost was incurred
    pub date: DailyDate,
    /// Billed service (e.g. "EC2")
    pub service: ServiceName,
    /// Region the usage ran in
    pub region: RegionName,
    /// Usage category (e.g. "Compute")
    pub usage_type: String,
    /// Cost in USD
    pub cost: f64,
}

impl BillingRecord {
    /// Create a new record
    pub fn new(
        date: DailyDate,
        service: impl Into<String>,
        region: impl Into<String>,
        usage_type: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            date,
            service: ServiceName::new(service),
            region: RegionName::new(region),
            usage_type: usage_type.into(),
            cost,
        }
    }
}

/// Fixed-threshold classification of a z-score
///
/// Severity cut-offs are constants and do not follow the configurable
/// detection threshold, so a day can be flagged at threshold 1.5 and still
/// be `Normal`.
///
/// # Examples
/// ```
/// use cloudwise_core::types::Severity;
///
/// assert_eq!(Severity::from_zscore(3.5), Severity::Severe);
/// assert_eq!(Severity::from_zscore(-2.5), Severity::Moderate);
/// assert_eq!(Severity::from_zscore(2.0), Severity::Normal);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Normal,
    Moderate,
    Severe,
}

impl Severity {
    /// |z| above this is `Severe`
    pub const SEVERE_CUTOFF: f64 = 3.0;
    /// |z| above this is at least `Moderate`
    pub const MODERATE_CUTOFF: f64 = 2.0;

    /// Classify a z-score
    pub fn from_zscore(zscore: f64) -> Self {
        let magnitude = zscore.abs();
        if magnitude > Self::SEVERE_CUTOFF {
            Self::Severe
        } else if magnitude > Self::MODERATE_CUTOFF {
            Self::Moderate
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Severe => write!(f, "Severe"),
        }
    }
}

/// Z-score cut-off above which a day is flagged as anomalous
///
/// Always finite and strictly positive.
///
/// # Examples
/// ```
/// use cloudwise_core::types::ZScoreThreshold;
/// use std::str::FromStr;
///
/// let threshold = ZScoreThreshold::from_str("2.5").unwrap();
/// assert!(threshold.is_exceeded_by(-2.6));
/// assert!(!threshold.is_exceeded_by(2.5));
/// assert!(ZScoreThreshold::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ZScoreThreshold(f64);

impl ZScoreThreshold {
    /// Default detection threshold
    pub const DEFAULT: f64 = 2.0;

    /// Validate and wrap a threshold
    pub fn new(value: f64) -> crate::Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CloudwiseError::InvalidArgument(format!(
                "z-score threshold must be a positive number, got {value}"
            )))
        }
    }

    /// Get the raw threshold
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Strict comparison on the absolute z-score
    pub fn is_exceeded_by(&self, zscore: f64) -> bool {
        zscore.abs() > self.0
    }
}

impl Default for ZScoreThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for ZScoreThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ZScoreThreshold {
    type Err = CloudwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|_| {
            CloudwiseError::InvalidArgument(format!("'{s}' is not a valid z-score threshold"))
        })?;
        Self::new(value)
    }
}

/// Where billing records come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Billing export CSV file
    Csv,
    /// Deterministic generated data
    #[default]
    Synthetic,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Synthetic => write!(f, "synthetic"),
        }
    }
}

impl FromStr for DataSource {
    type Err = CloudwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "synthetic" => Ok(Self::Synthetic),
            _ => Err(CloudwiseError::InvalidSource(format!(
                "'{s}', expected 'csv' or 'synthetic'"
            ))),
        }
    }
}
