//! End-to-end analysis pipeline
//!
//! Runs records through aggregation, gap filling, scoring and the report
//! join, keeping every intermediate result for the presentation layer.
//!
//! # Examples
//!
//! ```
//! use cloudwise::pipeline::Analysis;
//! use cloudwise::types::{BillingRecord, DailyDate, ZScoreThreshold};
//!
//! # fn main() -> cloudwise::Result<()> {
//! let day1 = DailyDate::parse("2025-06-01")?;
//! let day2 = DailyDate::parse("2025-06-02")?;
//! let records = vec![
//!     BillingRecord::new(day1, "EC2", "us-east-1", "Compute", 10.0),
//!     BillingRecord::new(day1, "S3", "us-east-1", "Storage", 10.0),
//!     BillingRecord::new(day2, "EC2", "us-east-1", "Compute", 10.0),
//!     BillingRecord::new(day2, "S3", "us-east-1", "Storage", 200.0),
//! ];
//!
//! let analysis = Analysis::run(&records, ZScoreThreshold::new(0.9)?)?;
//! // Both days sit exactly one standard deviation from the mean
//! assert_eq!(analysis.anomaly_count(), 2);
//! assert_eq!(analysis.report[1].top_service.as_str(), "S3");
//! # Ok(())
//! # }
//! ```

use crate::aggregation::{daily_total, fill_missing_daily, service_breakdown};
use crate::anomaly::detect_anomalies;
use crate::error::{CloudwiseError, Result};
use crate::explain::explain_anomalies;
use crate::report::anomaly_report;
use crate::types::{BillingRecord, ZScoreThreshold};
use cloudwise_core::aggregation_types::{
    AnomalyReportRow, BreakdownRow, DailyCost, ScoredDay, Totals,
};
use rand::Rng;
use tracing::info;

/// Outputs of one pipeline run
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Threshold the series was scored with
    pub threshold: ZScoreThreshold,
    /// Gap-filled daily cost series, for the trend line
    pub daily: Vec<DailyCost>,
    /// Daily series with z-scores, for anomaly markers
    pub scored: Vec<ScoredDay>,
    /// One row per flagged day
    pub report: Vec<AnomalyReportRow>,
    /// Total cost per service, for the bar chart
    pub services: Vec<BreakdownRow>,
    pub totals: Totals,
}

impl Analysis {
    /// Run the full pipeline over `records`.
    pub fn run(records: &[BillingRecord], threshold: ZScoreThreshold) -> Result<Self> {
        let daily = fill_missing_daily(&daily_total(records)?)?;
        let scored = detect_anomalies(&daily, threshold)?;
        let report = anomaly_report(&scored, records)?;
        let services = service_breakdown(records);
        let totals = Totals::from_daily(&daily);
        if !totals.total_cost.is_finite() {
            return Err(CloudwiseError::NonFiniteStatistics(format!(
                "total cost over {} days",
                totals.days
            )));
        }

        info!(
            "Analyzed {} records over {} days: {} anomalies at threshold {}",
            records.len(),
            daily.len(),
            report.len(),
            threshold
        );

        Ok(Self {
            threshold,
            daily,
            scored,
            report,
            services,
            totals,
        })
    }

    /// Attach a templated explanation to every report row.
    pub fn explain<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        explain_anomalies(&mut self.report, rng);
    }

    pub fn anomaly_count(&self) -> usize {
        self.report.len()
    }
}
