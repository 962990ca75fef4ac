//! Aggregation data types for cloudwise
//!
//! Pure data structures produced by the analysis pipeline and handed to
//! the presentation layer. These types carry no aggregation logic.

use crate::types::{DailyDate, ServiceName, Severity};
use serde::{Deserialize, Serialize};

/// Total spend for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    /// Day of spend
    pub date: DailyDate,
    /// Summed cost of every record on that day
    pub daily_cost: f64,
}

impl DailyCost {
    pub fn new(date: DailyDate, daily_cost: f64) -> Self {
        Self { date, daily_cost }
    }
}

/// Daily spend annotated with its z-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDay {
    /// Day of spend
    pub date: DailyDate,
    /// Summed cost for the day
    pub daily_cost: f64,
    /// Standard deviations from the series mean (0 when the series has no variance)
    pub zscore: f64,
    /// Whether |zscore| exceeded the detection threshold
    pub is_anomaly: bool,
    /// Fixed-cutoff classification of |zscore|
    pub severity: Severity,
}

/// One row of the anomaly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReportRow {
    /// Flagged day
    pub date: DailyDate,
    /// Spend on that day
    pub daily_cost: f64,
    /// Series mean, rounded to cents
    pub expected: f64,
    /// Z-score rounded to two decimals
    pub zscore: f64,
    pub severity: Severity,
    /// Service with the largest spend on that day
    pub top_service: ServiceName,
    /// Spend of `top_service` on that day
    pub top_service_cost: f64,
    /// Templated explanation, filled in after the report is built
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Grouped spend for one value of a categorical dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Service or region name
    pub name: String,
    /// Summed cost across the period
    pub total_cost: f64,
}

/// Spend for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCost {
    /// First day of the month
    pub month: DailyDate,
    pub monthly_cost: f64,
}

/// Share of a day's spend attributable to one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceShare {
    pub date: DailyDate,
    pub service: ServiceName,
    pub cost: f64,
    /// Fraction of the day's total in `[0, 1]`; 0 when the day's total is 0
    pub pct_of_day: f64,
}

/// Date × service cost matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePivot {
    /// Column order, sorted by service name
    pub services: Vec<ServiceName>,
    /// One row per date present in the input, ascending
    pub rows: Vec<PivotRow>,
}

/// One row of a [`ServicePivot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub date: DailyDate,
    /// Costs aligned with [`ServicePivot::services`]; missing combinations are 0
    pub costs: Vec<f64>,
}

/// Calculate totals from aggregated data
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_cost: f64,
    pub days: usize,
    pub mean_daily_cost: f64,
}

impl Totals {
    pub fn from_daily(daily: &[DailyCost]) -> Self {
        let total_cost: f64 = daily.iter().map(|d| d.daily_cost).sum();
        let days = daily.len();
        let mean_daily_cost = if days == 0 {
            0.0
        } else {
            total_cost / days as f64
        };
        Self {
            total_cost,
            days,
            mean_daily_cost,
        }
    }
}
