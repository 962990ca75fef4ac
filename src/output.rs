//! Output formatting module for cloudwise
//!
//! This module provides formatters for displaying analysis results in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use cloudwise::output::get_formatter;
//! use cloudwise::aggregation_types::{BreakdownRow};
//!
//! let services = vec![
//!     BreakdownRow { name: "EC2".to_string(), total_cost: 1840.0 },
//!     BreakdownRow { name: "S3".to_string(), total_cost: 920.5 },
//! ];
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_breakdown("Service", &services));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_breakdown("Service", &services));
//! ```

use cloudwise_core::aggregation_types::{
    AnomalyReportRow, BreakdownRow, MonthlyCost, ScoredDay, ServicePivot, ServiceShare, Totals,
};
use cloudwise_core::types::Severity;
use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use serde::Serialize;
use serde_json::json;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Message shown in place of an empty anomaly table
pub const NO_ANOMALIES: &str = "No anomalies detected.";

/// Trait for output formatters
///
/// This trait defines the interface for rendering every result the
/// analysis pipeline hands to the presentation layer.
pub trait OutputFormatter {
    /// Format the scored daily series with totals
    fn format_daily(&self, data: &[ScoredDay], totals: &Totals) -> String;

    /// Format the anomaly report
    fn format_report(&self, data: &[AnomalyReportRow]) -> String;

    /// Format a service or region breakdown; `dimension` names the key column
    fn format_breakdown(&self, dimension: &str, data: &[BreakdownRow]) -> String;

    /// Format monthly totals
    fn format_monthly(&self, data: &[MonthlyCost]) -> String;

    /// Format the date × service matrix
    fn format_pivot(&self, data: &ServicePivot) -> String;

    /// Format per-day service contributions
    fn format_contribution(&self, data: &[ServiceShare]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Costs are shown
/// with dollar signs and severities are coloured.
pub struct TableFormatter;

impl TableFormatter {
    /// Format currency with dollar sign
    fn format_currency(amount: f64) -> String {
        format!("${amount:.2}")
    }

    fn format_percent(fraction: f64) -> String {
        format!("{:.1}%", fraction * 100.0)
    }

    fn format_severity(severity: Severity) -> String {
        match severity {
            Severity::Severe => severity.to_string().red().bold().to_string(),
            Severity::Moderate => severity.to_string().yellow().to_string(),
            Severity::Normal => severity.to_string(),
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    /// Render values as a one-line unicode sparkline scaled to their range
    pub fn sparkline(values: &[f64]) -> String {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let min = finite.clone().fold(f64::INFINITY, f64::min);
        let max = finite.fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() {
            return String::new();
        }

        let range = max - min;
        values
            .iter()
            .map(|v| {
                if range <= 0.0 || !v.is_finite() {
                    SPARK_LEVELS[0]
                } else {
                    let level = ((v - min) / range * (SPARK_LEVELS.len() - 1) as f64).round();
                    SPARK_LEVELS[level as usize]
                }
            })
            .collect()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_daily(&self, data: &[ScoredDay], totals: &Totals) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Date",
            b -> "Cost",
            b -> "Z-Score",
            b -> "Anomaly",
            b -> "Severity"
        ]);

        for day in data {
            let marker = if day.is_anomaly { "●" } else { "" };
            table.add_row(row![
                day.date,
                r -> Self::format_currency(day.daily_cost),
                r -> format!("{:.2}", day.zscore),
                c -> marker,
                Self::format_severity(day.severity)
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            br -> Self::format_currency(totals.total_cost),
            "",
            "",
            ""
        ]);
        table.add_row(row![
            b -> "MEAN",
            br -> Self::format_currency(totals.mean_daily_cost),
            "",
            "",
            ""
        ]);

        let costs: Vec<f64> = data.iter().map(|d| d.daily_cost).collect();
        format!(
            "{}\nTrend ({} days): {}\n",
            table,
            totals.days,
            Self::sparkline(&costs)
        )
    }

    fn format_report(&self, data: &[AnomalyReportRow]) -> String {
        if data.is_empty() {
            return format!("{NO_ANOMALIES}\n");
        }

        let show_explanations = data.iter().any(|r| r.explanation.is_some());
        let mut table = Self::new_table();
        let mut titles = row![
            b -> "Date",
            b -> "Cost",
            b -> "Expected",
            b -> "Z-Score",
            b -> "Severity",
            b -> "Top Service",
            b -> "Service Cost"
        ];
        if show_explanations {
            titles.add_cell(Cell::new("Explanation").style_spec("b"));
        }
        table.set_titles(titles);

        for report in data {
            let mut line = row![
                report.date,
                r -> Self::format_currency(report.daily_cost),
                r -> Self::format_currency(report.expected),
                r -> format!("{:.2}", report.zscore),
                Self::format_severity(report.severity),
                report.top_service,
                r -> Self::format_currency(report.top_service_cost)
            ];
            if show_explanations {
                line.add_cell(Cell::new(report.explanation.as_deref().unwrap_or("")));
            }
            table.add_row(line);
        }

        table.to_string()
    }

    fn format_breakdown(&self, dimension: &str, data: &[BreakdownRow]) -> String {
        let total: f64 = data.iter().map(|r| r.total_cost).sum();

        let mut table = Self::new_table();
        table.set_titles(Row::new(vec![
            Cell::new(dimension).style_spec("b"),
            Cell::new("Cost").style_spec("b"),
            Cell::new("Share").style_spec("b"),
        ]));

        for item in data {
            let share = if total == 0.0 {
                0.0
            } else {
                item.total_cost / total
            };
            table.add_row(row![
                item.name,
                r -> Self::format_currency(item.total_cost),
                r -> Self::format_percent(share)
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            br -> Self::format_currency(total),
            ""
        ]);

        table.to_string()
    }

    fn format_monthly(&self, data: &[MonthlyCost]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Month", b -> "Cost"]);

        for month in data {
            table.add_row(row![
                month.month.format("%Y-%m"),
                r -> Self::format_currency(month.monthly_cost)
            ]);
        }

        let total: f64 = data.iter().map(|m| m.monthly_cost).sum();
        table.add_row(row![b -> "TOTAL", br -> Self::format_currency(total)]);

        table.to_string()
    }

    fn format_pivot(&self, data: &ServicePivot) -> String {
        let mut table = Self::new_table();

        let mut titles = vec![Cell::new("Date").style_spec("b")];
        titles.extend(
            data.services
                .iter()
                .map(|s| Cell::new(s.as_str()).style_spec("b")),
        );
        table.set_titles(Row::new(titles));

        for pivot_row in &data.rows {
            let mut cells = vec![Cell::new(&pivot_row.date.to_string())];
            cells.extend(
                pivot_row
                    .costs
                    .iter()
                    .map(|c| Cell::new(&Self::format_currency(*c)).style_spec("r")),
            );
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    fn format_contribution(&self, data: &[ServiceShare]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Date", b -> "Service", b -> "Cost", b -> "Share of Day"]);

        for share in data {
            table.add_row(row![
                share.date,
                share.service,
                r -> Self::format_currency(share.cost),
                r -> Self::format_percent(share.pct_of_day)
            ]);
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_daily(&self, data: &[ScoredDay], totals: &Totals) -> String {
        Self::render(&json!({
            "daily": data,
            "totals": totals,
        }))
    }

    fn format_report(&self, data: &[AnomalyReportRow]) -> String {
        Self::render(&json!({
            "anomalies": data,
            "count": data.len(),
        }))
    }

    fn format_breakdown(&self, dimension: &str, data: &[BreakdownRow]) -> String {
        let total: f64 = data.iter().map(|r| r.total_cost).sum();
        Self::render(&json!({
            "dimension": dimension.to_lowercase(),
            "breakdown": data,
            "total_cost": total,
        }))
    }

    fn format_monthly(&self, data: &[MonthlyCost]) -> String {
        Self::render(&json!({
            "monthly": data.iter().map(|m| json!({
                "month": m.month.format("%Y-%m"),
                "monthly_cost": m.monthly_cost,
            })).collect::<Vec<_>>(),
        }))
    }

    fn format_pivot(&self, data: &ServicePivot) -> String {
        Self::render(&json!({ "pivot": data }))
    }

    fn format_contribution(&self, data: &[ServiceShare]) -> String {
        Self::render(&json!({ "contribution": data }))
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
