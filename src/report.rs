//! Anomaly report builder
//!
//! Joins each flagged day back to the raw billing records to find the
//! service that drove that day's spend.

use crate::aggregation::grouped_totals;
use crate::anomaly::SeriesStats;
use crate::error::{CloudwiseError, Result};
use crate::types::{BillingRecord, DailyDate, ServiceName};
use cloudwise_core::aggregation_types::{AnomalyReportRow, ScoredDay};
use tracing::debug;

/// Build one report row per flagged day, in series order.
///
/// `expected` is the mean daily cost of the whole scored series (the same
/// mean the z-scores were computed against). A series with no flagged days
/// yields an empty report.
pub fn anomaly_report(
    scored: &[ScoredDay],
    records: &[BillingRecord],
) -> Result<Vec<AnomalyReportRow>> {
    let flagged: Vec<&ScoredDay> = scored.iter().filter(|d| d.is_anomaly).collect();
    if flagged.is_empty() {
        return Ok(Vec::new());
    }

    let expected = SeriesStats::population(scored.iter().map(|d| d.daily_cost))
        .map(|stats| round_cents(stats.mean))
        .unwrap_or(0.0);

    let rows = flagged
        .into_iter()
        .map(|day| {
            let (top_service, top_service_cost) = top_service_for_date(records, day.date)?;
            Ok(AnomalyReportRow {
                date: day.date,
                daily_cost: day.daily_cost,
                expected,
                zscore: round_cents(day.zscore),
                severity: day.severity,
                top_service,
                top_service_cost,
                explanation: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Built anomaly report with {} rows", rows.len());
    Ok(rows)
}

/// Service with the highest summed cost on `date`.
///
/// Ties go to the service that appears first in `records`.
pub fn top_service_for_date(
    records: &[BillingRecord],
    date: DailyDate,
) -> Result<(ServiceName, f64)> {
    grouped_totals(
        records.iter().filter(|r| r.date == date),
        |r| r.service.as_str(),
    )
    .into_iter()
    .next()
    .map(|row| (ServiceName::new(row.name), row.total_cost))
    .ok_or(CloudwiseError::NoMatchingRecords(date))
}

/// Round to two decimal places, ties to even
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
