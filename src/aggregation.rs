//! Aggregation module for summarizing billing data
//!
//! This module collapses raw billing records into the daily cost series the
//! anomaly detector consumes, plus the service, region, monthly, pivot and
//! per-day contribution breakdowns shown alongside it.
//!
//! Grouped breakdowns keep the order in which each key first appears in the
//! input, and sort with a stable sort, so equal totals stay in that order.
//!
//! # Examples
//!
//! ```
//! use cloudwise::aggregation::{daily_total, fill_missing_daily, service_breakdown};
//! use cloudwise::types::{BillingRecord, DailyDate};
//!
//! # fn main() -> cloudwise::Result<()> {
//! let records = vec![
//!     BillingRecord::new(DailyDate::parse("2025-06-01")?, "EC2", "us-east-1", "Compute", 10.0),
//!     BillingRecord::new(DailyDate::parse("2025-06-03")?, "S3", "us-east-1", "Storage", 4.0),
//! ];
//!
//! let daily = fill_missing_daily(&daily_total(&records)?)?;
//! assert_eq!(daily.len(), 3);
//! assert_eq!(daily[1].daily_cost, 0.0);
//!
//! let services = service_breakdown(&records);
//! assert_eq!(services[0].name, "EC2");
//! # Ok(())
//! # }
//! ```

use crate::error::{CloudwiseError, Result};
use crate::types::{BillingRecord, DailyDate, ServiceName};
use cloudwise_core::aggregation_types::{
    BreakdownRow, DailyCost, MonthlyCost, PivotRow, ServicePivot, ServiceShare,
};
use chrono::Months;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Sum cost per calendar day, ascending by date.
///
/// Days without records are absent; see [`fill_missing_daily`].
pub fn daily_total(records: &[BillingRecord]) -> Result<Vec<DailyCost>> {
    if records.is_empty() {
        return Err(CloudwiseError::EmptyInput);
    }

    let mut by_day: BTreeMap<DailyDate, f64> = BTreeMap::new();
    for record in records {
        *by_day.entry(record.date).or_insert(0.0) += record.cost;
    }

    if let Some((date, _)) = by_day.iter().find(|(_, cost)| !cost.is_finite()) {
        return Err(CloudwiseError::InputFormat(format!(
            "daily total for {date} is not finite"
        )));
    }

    debug!(
        "Aggregated {} records into {} days",
        records.len(),
        by_day.len()
    );
    Ok(by_day
        .into_iter()
        .map(|(date, cost)| DailyCost::new(date, cost))
        .collect())
}

/// Densify a daily series so every day from the first to the last date is
/// present, inserting zero-cost days for gaps.
pub fn fill_missing_daily(series: &[DailyCost]) -> Result<Vec<DailyCost>> {
    let (Some(first), Some(last)) = (
        series.iter().map(|d| d.date).min(),
        series.iter().map(|d| d.date).max(),
    ) else {
        return Err(CloudwiseError::EmptyRange);
    };

    let mut known: HashMap<DailyDate, f64> = HashMap::with_capacity(series.len());
    for day in series {
        *known.entry(day.date).or_insert(0.0) += day.daily_cost;
    }

    let span = first.days_until(&last) as usize + 1;
    let mut filled = Vec::with_capacity(span);
    let mut current = Some(first);
    while let Some(date) = current.filter(|d| *d <= last) {
        filled.push(DailyCost::new(
            date,
            known.get(&date).copied().unwrap_or(0.0),
        ));
        current = date.next_day();
    }

    if filled.len() > series.len() {
        debug!("Filled {} missing days", filled.len() - series.len());
    }
    Ok(filled)
}

/// Total cost per service, largest first.
pub fn service_breakdown(records: &[BillingRecord]) -> Vec<BreakdownRow> {
    grouped_totals(records, |r| r.service.as_str())
}

/// Total cost per region, largest first.
pub fn region_breakdown(records: &[BillingRecord]) -> Vec<BreakdownRow> {
    grouped_totals(records, |r| r.region.as_str())
}

/// Sum cost by `key`, sorted descending by total; ties keep first-seen order.
pub(crate) fn grouped_totals<'a, I, F>(records: I, key: F) -> Vec<BreakdownRow>
where
    I: IntoIterator<Item = &'a BillingRecord>,
    F: Fn(&'a BillingRecord) -> &'a str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<BreakdownRow> = Vec::new();

    for record in records {
        let name = key(record);
        let index = *positions.entry(name).or_insert_with(|| {
            rows.push(BreakdownRow {
                name: name.to_string(),
                total_cost: 0.0,
            });
            rows.len() - 1
        });
        rows[index].total_cost += record.cost;
    }

    rows.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    rows
}

/// Cost per calendar month, bucketed on the first of the month.
///
/// Months between the first and last record with no spend appear with 0.
pub fn monthly_total(records: &[BillingRecord]) -> Vec<MonthlyCost> {
    let mut by_month: BTreeMap<DailyDate, f64> = BTreeMap::new();
    for record in records {
        *by_month.entry(record.date.month_start()).or_insert(0.0) += record.cost;
    }

    let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back())
    else {
        return Vec::new();
    };

    let mut months = Vec::with_capacity(by_month.len());
    let mut current = Some(first);
    while let Some(month) = current.filter(|m| *m <= last) {
        months.push(MonthlyCost {
            month,
            monthly_cost: by_month.get(&month).copied().unwrap_or(0.0),
        });
        current = month
            .inner()
            .checked_add_months(Months::new(1))
            .map(DailyDate::new);
    }
    months
}

/// Date × service matrix of summed cost.
///
/// Columns are service names in lexical order; rows are the dates present
/// in the input. Combinations with no records are 0.
pub fn pivot_service_by_date(records: &[BillingRecord]) -> ServicePivot {
    let services: Vec<ServiceName> = records
        .iter()
        .map(|r| r.service.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column: HashMap<&ServiceName, usize> =
        services.iter().enumerate().map(|(i, s)| (s, i)).collect();

    let mut by_day: BTreeMap<DailyDate, Vec<f64>> = BTreeMap::new();
    for record in records {
        let costs = by_day
            .entry(record.date)
            .or_insert_with(|| vec![0.0; services.len()]);
        if let Some(&i) = column.get(&record.service) {
            costs[i] += record.cost;
        }
    }

    let rows = by_day
        .into_iter()
        .map(|(date, costs)| PivotRow { date, costs })
        .collect();
    ServicePivot { services, rows }
}

/// Each service's share of its day's total spend.
///
/// Ordered by date ascending, then share descending. A day whose total is
/// zero gives every service a 0 share.
pub fn percent_contribution_per_day(records: &[BillingRecord]) -> Vec<ServiceShare> {
    let mut by_day_service: BTreeMap<(DailyDate, ServiceName), f64> = BTreeMap::new();
    let mut day_totals: HashMap<DailyDate, f64> = HashMap::new();
    for record in records {
        *by_day_service
            .entry((record.date, record.service.clone()))
            .or_insert(0.0) += record.cost;
        *day_totals.entry(record.date).or_insert(0.0) += record.cost;
    }

    let mut shares: Vec<ServiceShare> = by_day_service
        .into_iter()
        .map(|((date, service), cost)| {
            let total = day_totals.get(&date).copied().unwrap_or(0.0);
            let pct_of_day = if total == 0.0 { 0.0 } else { cost / total };
            ServiceShare {
                date,
                service,
                cost,
                pct_of_day,
            }
        })
        .collect();

    shares.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| b.pct_of_day.total_cmp(&a.pct_of_day))
    });
    shares
}
