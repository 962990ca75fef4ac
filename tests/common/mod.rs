//! Common test utilities and helpers for cloudwise tests
//!
//! This module provides a record builder and CSV fixtures shared by the
//! integration test binaries.

use chrono::NaiveDate;
use cloudwise::types::{BillingRecord, DailyDate};
use std::io::Write;
use tempfile::NamedTempFile;

/// Header row accepted by the CSV loader
pub const CSV_HEADER: &str = "Date,Service,Region,UsageType,Cost";

/// Day of June 2025
pub fn june(day: u32) -> DailyDate {
    DailyDate::new(NaiveDate::from_ymd_opt(2025, 6, day).unwrap())
}

/// Builder for creating test BillingRecord instances
pub struct BillingRecordBuilder {
    date: DailyDate,
    service: String,
    region: String,
    usage_type: String,
    cost: f64,
}

impl BillingRecordBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            date: june(1),
            service: "EC2".to_string(),
            region: "us-east-1".to_string(),
            usage_type: "Compute".to_string(),
            cost: 10.0,
        }
    }

    pub fn date(mut self, date: DailyDate) -> Self {
        self.date = date;
        self
    }

    pub fn service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn build(self) -> BillingRecord {
        BillingRecord::new(
            self.date,
            self.service,
            self.region,
            self.usage_type,
            self.cost,
        )
    }
}

impl Default for BillingRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical two-day example: flat EC2 spend and an S3 jump on day two
#[allow(dead_code)]
pub fn two_day_records() -> Vec<BillingRecord> {
    vec![
        BillingRecordBuilder::new().date(june(1)).service("EC2").cost(10.0).build(),
        BillingRecordBuilder::new().date(june(1)).service("S3").cost(10.0).build(),
        BillingRecordBuilder::new().date(june(2)).service("EC2").cost(10.0).build(),
        BillingRecordBuilder::new().date(june(2)).service("S3").cost(200.0).build(),
    ]
}

/// Write CSV rows (header included) to a temporary file
#[allow(dead_code)]
pub fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{CSV_HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
