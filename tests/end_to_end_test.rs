//! End-to-end tests for cloudwise
//!
//! These tests run the two-day reference scenario through every stage of the
//! pipeline and check the exact numbers that come out the other end.

mod common;

use cloudwise::{
    aggregation::{daily_total, fill_missing_daily},
    anomaly::detect_anomalies,
    error::CloudwiseError,
    output::{JsonFormatter, NO_ANOMALIES, OutputFormatter, TableFormatter},
    pipeline::Analysis,
    report::{anomaly_report, top_service_for_date},
    types::{Severity, ZScoreThreshold},
};
use common::{BillingRecordBuilder, june, two_day_records};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_two_day_scores_are_unit() {
    let records = two_day_records();
    let daily = fill_missing_daily(&daily_total(&records).unwrap()).unwrap();

    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].daily_cost, 20.0);
    assert_eq!(daily[1].daily_cost, 210.0);

    let scored = detect_anomalies(&daily, ZScoreThreshold::default()).unwrap();
    assert!((scored[0].zscore + 1.0).abs() < 1e-9);
    assert!((scored[1].zscore - 1.0).abs() < 1e-9);
    assert!(scored.iter().all(|d| !d.is_anomaly));
    assert!(scored.iter().all(|d| d.severity == Severity::Normal));
}

#[test]
fn test_default_threshold_gives_empty_report() {
    let records = two_day_records();
    let analysis = Analysis::run(&records, ZScoreThreshold::default()).unwrap();

    assert!(analysis.report.is_empty());
    assert_eq!(TableFormatter.format_report(&analysis.report).trim_end(), NO_ANOMALIES);
}

#[test]
fn test_lowered_threshold_flags_both_days() {
    let records = two_day_records();
    let threshold = ZScoreThreshold::new(0.9).unwrap();
    let daily = fill_missing_daily(&daily_total(&records).unwrap()).unwrap();
    let scored = detect_anomalies(&daily, threshold).unwrap();
    let report = anomaly_report(&scored, &records).unwrap();

    // Day one sits one standard deviation below the mean and is flagged too
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].date, june(1));
    assert_eq!(report[0].zscore, -1.0);
    // EC2 and S3 tie on day one; the first-seen service wins
    assert_eq!(report[0].top_service.as_str(), "EC2");

    let row = &report[1];
    assert_eq!(row.date, june(2));
    assert_eq!(row.daily_cost, 210.0);
    assert_eq!(row.expected, 115.0);
    assert_eq!(row.zscore, 1.0);
    assert_eq!(row.severity, Severity::Normal);
    assert_eq!(row.top_service.as_str(), "S3");
    assert_eq!(row.top_service_cost, 200.0);
}

#[test]
fn test_explained_report_renders() {
    let mut analysis =
        Analysis::run(&two_day_records(), ZScoreThreshold::new(0.9).unwrap()).unwrap();
    analysis.explain(&mut StdRng::seed_from_u64(1));

    let explanation = analysis.report[1].explanation.as_deref().unwrap();
    assert!(explanation.contains("S3"));

    let table = TableFormatter.format_report(&analysis.report);
    assert!(table.contains("2025-06-02"));
    assert!(table.contains("S3"));

    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_report(&analysis.report)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["anomalies"][1]["date"], "2025-06-02");
}

#[test]
fn test_gap_day_counts_toward_statistics() {
    // Same costs as the two-day scenario but with an empty day between them
    let records = vec![
        BillingRecordBuilder::new().date(june(1)).cost(20.0).build(),
        BillingRecordBuilder::new().date(june(3)).cost(210.0).build(),
    ];
    let analysis = Analysis::run(&records, ZScoreThreshold::new(0.9).unwrap()).unwrap();

    assert_eq!(analysis.daily.len(), 3);
    assert_eq!(analysis.daily[1].date, june(2));
    assert_eq!(analysis.daily[1].daily_cost, 0.0);
    assert_eq!(analysis.totals.days, 3);

    // The zero-filled day drags the mean down, so the spike is flagged
    assert_eq!(analysis.anomaly_count(), 1);
    assert_eq!(analysis.report[0].date, june(3));
    assert_eq!(analysis.report[0].expected, 76.67);
}

#[test]
fn test_flagged_gap_day_without_records_is_an_error() {
    // A long flat run with one empty day scores that day far below the mean
    let mut records: Vec<_> = (1..=20)
        .filter(|d| *d != 10)
        .map(|d| BillingRecordBuilder::new().date(june(d)).cost(100.0).build())
        .collect();
    records.push(BillingRecordBuilder::new().date(june(20)).cost(0.5).build());

    let result = Analysis::run(&records, ZScoreThreshold::default());
    assert!(matches!(result, Err(CloudwiseError::NoMatchingRecords(d)) if d == june(10)));

    let lookup = top_service_for_date(&records, june(10));
    assert!(matches!(lookup, Err(CloudwiseError::NoMatchingRecords(_))));
}

#[test]
fn test_flat_spend_is_never_anomalous() {
    let records: Vec<_> = (1..=10)
        .map(|d| BillingRecordBuilder::new().date(june(d)).cost(42.0).build())
        .collect();
    let analysis = Analysis::run(&records, ZScoreThreshold::new(0.01).unwrap()).unwrap();

    assert_eq!(analysis.anomaly_count(), 0);
    assert!(analysis.scored.iter().all(|d| d.zscore == 0.0));
}
