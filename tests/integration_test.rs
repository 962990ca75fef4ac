//! Integration tests for cloudwise
//!
//! These tests load records through each billing source and run them through
//! the full analysis pipeline.

mod common;

use cloudwise::{
    aggregation::{monthly_total, percent_contribution_per_day, pivot_service_by_date},
    error::CloudwiseError,
    pipeline::Analysis,
    source::load_records,
    types::{DataSource, Severity, ZScoreThreshold},
};
use cloudwise_source_synthetic::SyntheticConfig;
use common::{june, write_csv};

#[test]
fn test_csv_file_through_pipeline() {
    let mut rows = Vec::new();
    for day in 1..=14 {
        rows.push(format!("2025-06-{day:02},EC2,us-east-1,Compute,20.00"));
        rows.push(format!("2025-06-{day:02},S3,us-west-2,Storage,10.00"));
    }
    rows.push("2025-06-10,DynamoDB,eu-central-1,Requests,300.00".to_string());
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let file = write_csv(&row_refs);

    let records = load_records(DataSource::Csv, Some(file.path()), SyntheticConfig::default())
        .unwrap();
    assert_eq!(records.len(), 29);

    let analysis = Analysis::run(&records, ZScoreThreshold::default()).unwrap();
    assert_eq!(analysis.daily.len(), 14);
    assert_eq!(analysis.anomaly_count(), 1);

    let row = &analysis.report[0];
    assert_eq!(row.date, june(10));
    assert_eq!(row.daily_cost, 330.0);
    assert_eq!(row.top_service.as_str(), "DynamoDB");
    assert_eq!(row.severity, Severity::Severe);
}

#[test]
fn test_csv_with_mixed_date_formats_and_bad_costs() {
    let file = write_csv(&[
        "2025-06-01,EC2,us-east-1,Compute,10",
        "2025/06/02,EC2,us-east-1,Compute,n/a",
        "06/03/2025,EC2,us-east-1,Compute,-2.5",
        "2025-06-04T08:00:00Z,EC2,us-east-1,Compute,4",
    ]);

    let records = load_records(DataSource::Csv, Some(file.path()), SyntheticConfig::default())
        .unwrap();
    let dates: Vec<_> = records.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![june(1), june(2), june(3), june(4)]);
    assert_eq!(records[1].cost, 0.0);
    assert_eq!(records[2].cost, -2.5);
}

#[test]
fn test_csv_source_errors_halt_before_analysis() {
    let missing_column = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(missing_column.path(), "Date,Service,Region,Cost\n2025-06-01,EC2,x,1\n")
        .unwrap();
    let result = load_records(
        DataSource::Csv,
        Some(missing_column.path()),
        SyntheticConfig::default(),
    );
    assert!(matches!(result, Err(CloudwiseError::InputFormat(msg)) if msg.contains("usagetype")));

    let bad_date = write_csv(&["yesterday,EC2,us-east-1,Compute,1"]);
    let result = load_records(DataSource::Csv, Some(bad_date.path()), SyntheticConfig::default());
    assert!(matches!(result, Err(CloudwiseError::InputFormat(_))));
}

#[test]
fn test_overflowing_csv_day_halts_analysis() {
    let file = write_csv(&[
        "2025-06-01,EC2,us-east-1,Compute,1e308",
        "2025-06-01,S3,us-east-1,Storage,1e308",
        "2025-06-02,EC2,us-east-1,Compute,1",
        "2025-06-03,EC2,us-east-1,Compute,1",
    ]);
    let records =
        load_records(DataSource::Csv, Some(file.path()), SyntheticConfig::default()).unwrap();
    assert!(records.iter().all(|r| r.cost.is_finite()));

    let result = Analysis::run(&records, ZScoreThreshold::default());
    assert!(matches!(
        result,
        Err(CloudwiseError::InputFormat(msg)) if msg.contains("2025-06-01") && msg.contains("not finite")
    ));
}

#[test]
fn test_header_only_csv_is_empty_input() {
    let file = write_csv(&[]);
    let records =
        load_records(DataSource::Csv, Some(file.path()), SyntheticConfig::default()).unwrap();
    assert!(records.is_empty());

    let result = Analysis::run(&records, ZScoreThreshold::default());
    assert!(matches!(result, Err(CloudwiseError::EmptyInput)));
}

#[test]
fn test_synthetic_pipeline_default_range() {
    let records =
        load_records(DataSource::Synthetic, None, SyntheticConfig::default()).unwrap();
    assert_eq!(records.len(), 92 * 6 * 2);

    let analysis = Analysis::run(&records, ZScoreThreshold::default()).unwrap();
    assert_eq!(analysis.daily.len(), 92);
    assert_eq!(analysis.services.len(), 6);
    // EC2 has the highest base cost
    assert_eq!(analysis.services[0].name, "EC2");

    for row in &analysis.report {
        assert!(row.zscore.abs() > 2.0);
        assert!(records.iter().any(|r| r.date == row.date && r.service == row.top_service));
    }

    let monthly = monthly_total(&records);
    assert_eq!(monthly.len(), 3);
    let monthly_sum: f64 = monthly.iter().map(|m| m.monthly_cost).sum();
    assert!((monthly_sum - analysis.totals.total_cost).abs() < 1e-6);
}

#[test]
fn test_synthetic_is_reproducible() {
    let config = SyntheticConfig::new(7, june(1), june(30)).unwrap();
    let first = load_records(DataSource::Synthetic, None, config).unwrap();
    let second = load_records(DataSource::Synthetic, None, config).unwrap();
    assert_eq!(first, second);

    let a = Analysis::run(&first, ZScoreThreshold::default()).unwrap();
    let b = Analysis::run(&second, ZScoreThreshold::default()).unwrap();
    assert_eq!(a.report, b.report);
}

#[test]
fn test_pivot_and_contribution_views() {
    let config = SyntheticConfig::new(1, june(1), june(3)).unwrap();
    let records = load_records(DataSource::Synthetic, None, config).unwrap();

    let pivot = pivot_service_by_date(&records);
    assert_eq!(pivot.rows.len(), 3);
    assert_eq!(pivot.services.len(), 6);
    assert!(pivot.rows.iter().all(|row| row.costs.len() == 6));

    let shares = percent_contribution_per_day(&records);
    for day in [june(1), june(2), june(3)] {
        let total: f64 = shares
            .iter()
            .filter(|s| s.date == day)
            .map(|s| s.pct_of_day)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
