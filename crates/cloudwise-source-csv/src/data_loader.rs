//! Billing CSV data loader
//!
//! Reads billing exports with at least the columns `Date`, `Service`,
//! `Region`, `UsageType` and `Cost`. Header names are matched after trimming
//! and lower-casing, so `" Cost"` and `"COST"` both resolve to `cost`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use cloudwise_core::error::{CloudwiseError, Result};
use cloudwise_core::provider::BillingSource;
use cloudwise_core::types::{BillingRecord, DailyDate};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

const REQUIRED_COLUMNS: [&str; 5] = ["date", "service", "region", "usagetype", "cost"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

enum CsvInput {
    File(PathBuf),
    Text(String),
}

/// Data loader for billing CSV exports.
pub struct CsvLoader {
    input: CsvInput,
}

impl CsvLoader {
    /// Load from a file on disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            input: CsvInput::File(path.into()),
        }
    }

    /// Load from CSV text already in memory (e.g. an uploaded file)
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: CsvInput::Text(text.into()),
        }
    }
}

impl BillingSource for CsvLoader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load_records(&self) -> Result<Vec<BillingRecord>> {
        let records = match &self.input {
            CsvInput::File(path) => {
                let file = std::fs::File::open(path).map_err(|e| {
                    CloudwiseError::Io(std::io::Error::new(
                        e.kind(),
                        format!("{}: {}", path.display(), e),
                    ))
                })?;
                parse_records(file)?
            }
            CsvInput::Text(text) => parse_records(text.as_bytes())?,
        };

        info!("Loaded {} billing records from CSV", records.len());
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

struct Columns {
    date: usize,
    service: usize,
    region: usize,
    usage_type: usize,
    cost: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| {
            normalized.iter().position(|h| h == name).ok_or_else(|| {
                CloudwiseError::InputFormat(format!("missing required column '{name}'"))
            })
        };

        let [date, service, region, usage_type, cost] = REQUIRED_COLUMNS;
        Ok(Self {
            date: find(date)?,
            service: find(service)?,
            region: find(region)?,
            usage_type: find(usage_type)?,
            cost: find(cost)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse billing records from any CSV reader.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<BillingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut records = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| row_error(e, index as u64 + 2))?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        let field = |i: usize| row.get(i).unwrap_or("");

        let raw_date = field(columns.date);
        let date = parse_date(raw_date).ok_or_else(|| {
            CloudwiseError::InputFormat(format!("line {line}: unparseable date '{raw_date}'"))
        })?;

        let raw_cost = field(columns.cost);
        let cost = parse_cost(raw_cost).unwrap_or_else(|| {
            debug!("line {}: coerced cost '{}' to 0", line, raw_cost);
            0.0
        });

        records.push(BillingRecord::new(
            DailyDate::new(date),
            field(columns.service),
            field(columns.region),
            field(columns.usage_type),
            cost,
        ));
    }

    Ok(records)
}

/// Report ragged rows the same way as other malformed input.
fn row_error(err: csv::Error, fallback_line: u64) -> CloudwiseError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        let line = pos.as_ref().map(|p| p.line()).unwrap_or(fallback_line);
        return CloudwiseError::InputFormat(format!(
            "line {line}: expected {expected_len} fields, found {len}"
        ));
    }
    err.into()
}

/// Parse a calendar date, accepting plain dates and timestamps.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a cost value, rejecting anything non-numeric or non-finite.
pub fn parse_cost(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|c| c.is_finite())
}
