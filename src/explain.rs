//! Templated explanations for anomaly report rows
//!
//! Each row gets one of a fixed set of sentences naming the top service and
//! the day. The choice is random and carries no analysis of the data; pass
//! a seeded RNG for reproducible output.

use crate::types::{DailyDate, ServiceName};
use cloudwise_core::aggregation_types::AnomalyReportRow;
use rand::Rng;

/// Usage type named when the row carries none
pub const DEFAULT_USAGE_TYPE: &str = "general";

const TEMPLATE_COUNT: usize = 5;

/// Pick one explanation sentence for a service spike.
pub fn explain_anomaly<R: Rng + ?Sized>(
    rng: &mut R,
    service: &ServiceName,
    date: DailyDate,
    usage_type: Option<&str>,
) -> String {
    let usage = usage_type.unwrap_or(DEFAULT_USAGE_TYPE);
    match rng.gen_range(0..TEMPLATE_COUNT) {
        0 => format!("High {usage} usage in {service} caused the cost spike on {date}."),
        1 => format!("{service} cost increased on {date} due to unexpected {usage} activity."),
        2 => format!(
            "Billing anomaly for {service} on {date} likely caused by excessive {usage} usage."
        ),
        3 => format!("Temporary surge in {usage} for {service} led to higher charges on {date}."),
        _ => format!("Unplanned {usage} usage in {service} resulted in the cost spike on {date}."),
    }
}

/// Fill in the `explanation` of every row.
pub fn explain_anomalies<R: Rng + ?Sized>(rows: &mut [AnomalyReportRow], rng: &mut R) {
    for row in rows {
        row.explanation = Some(explain_anomaly(rng, &row.top_service, row.date, None));
    }
}
