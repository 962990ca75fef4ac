//! Synthetic billing generator
//!
//! Produces two records per service per day, each in a distinct region,
//! with costs drawn around a service-specific base cost. The seed is part
//! of [`SyntheticConfig`], so identical configs yield identical records.

use chrono::NaiveDate;
use cloudwise_core::error::{CloudwiseError, Result};
use cloudwise_core::provider::BillingSource;
use cloudwise_core::types::{BillingRecord, DailyDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::info;

/// Services with their base daily cost in USD
pub const SERVICES: [(&str, f64); 6] = [
    ("EC2", 20.0),
    ("S3", 10.0),
    ("Lambda", 5.0),
    ("RDS", 15.0),
    ("CloudFront", 8.0),
    ("DynamoDB", 12.0),
];

pub const REGIONS: [&str; 4] = ["us-east-1", "us-west-2", "ap-south-1", "eu-central-1"];

pub const USAGE_TYPES: [&str; 4] = ["Compute", "Storage", "DataTransfer", "Requests"];

/// Regions sampled per service per day
const REGIONS_PER_SERVICE: usize = 2;

/// Noise standard deviation as a fraction of the base cost
const NOISE_RATIO: f64 = 0.3;

/// Generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticConfig {
    pub seed: u64,
    /// First generated day (inclusive)
    pub start: DailyDate,
    /// Last generated day (inclusive)
    pub end: DailyDate,
}

impl SyntheticConfig {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(seed: u64, start: DailyDate, end: DailyDate) -> Result<Self> {
        if start > end {
            return Err(CloudwiseError::InvalidArgument(format!(
                "synthetic start date {start} is after end date {end}"
            )));
        }
        Ok(Self { seed, start, end })
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            start: DailyDate::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default()),
            end: DailyDate::new(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap_or_default()),
        }
    }
}

/// Seeded billing record generator.
pub struct SyntheticGenerator {
    config: SyntheticConfig,
}

impl SyntheticGenerator {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    /// Generate the full record set for the configured range.
    pub fn generate(&self) -> Result<Vec<BillingRecord>> {
        let SyntheticConfig { seed, start, end } = self.config;
        if start > end {
            return Err(CloudwiseError::InvalidArgument(format!(
                "synthetic start date {start} is after end date {end}"
            )));
        }

        let noise = SERVICES
            .iter()
            .map(|&(service, base)| {
                Normal::new(0.0, base * NOISE_RATIO)
                    .map(|dist| (service, base, dist))
                    .map_err(|e| CloudwiseError::InvalidArgument(format!("{service}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let days = start.days_until(&end) as usize + 1;
        let mut records = Vec::with_capacity(days * SERVICES.len() * REGIONS_PER_SERVICE);

        let mut day = start;
        loop {
            for (service, base, dist) in &noise {
                let regions: Vec<&str> = REGIONS
                    .choose_multiple(&mut rng, REGIONS_PER_SERVICE)
                    .copied()
                    .collect();
                for region in regions {
                    let usage_type = USAGE_TYPES.choose(&mut rng).copied().unwrap_or("Compute");
                    let cost = round_cents(base + dist.sample(&mut rng)).abs();
                    records.push(BillingRecord::new(day, *service, region, usage_type, cost));
                }
            }

            if day >= end {
                break;
            }
            let Some(next) = day.next_day() else {
                break;
            };
            day = next;
        }

        info!(
            "Generated {} synthetic billing records ({} to {}, seed {})",
            records.len(),
            start,
            end,
            seed
        );
        Ok(records)
    }
}

impl BillingSource for SyntheticGenerator {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load_records(&self) -> Result<Vec<BillingRecord>> {
        self.generate()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn date(y: i32, m: u32, d: u32) -> DailyDate {
        DailyDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn small_config(seed: u64) -> SyntheticConfig {
        SyntheticConfig::new(seed, date(2025, 6, 1), date(2025, 6, 10)).unwrap()
    }

    #[test]
    fn test_default_range_record_count() {
        let records = SyntheticGenerator::new(SyntheticConfig::default())
            .generate()
            .unwrap();
        // June 1 .. August 31 is 92 days
        assert_eq!(records.len(), 92 * 6 * 2);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = SyntheticGenerator::new(small_config(7)).generate().unwrap();
        let b = SyntheticGenerator::new(small_config(7)).generate().unwrap();
        let c = SyntheticGenerator::new(small_config(8)).generate().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_two_distinct_regions_per_service_day() {
        let records = SyntheticGenerator::new(small_config(42)).generate().unwrap();

        let mut regions: HashMap<(DailyDate, String), HashSet<String>> = HashMap::new();
        for r in &records {
            assert!(REGIONS.contains(&r.region.as_str()));
            assert!(USAGE_TYPES.contains(&r.usage_type.as_str()));
            regions
                .entry((r.date, r.service.to_string()))
                .or_default()
                .insert(r.region.to_string());
        }
        assert_eq!(regions.len(), 10 * 6);
        assert!(regions.values().all(|set| set.len() == 2));
    }

    #[test]
    fn test_costs_non_negative_and_rounded() {
        let records = SyntheticGenerator::new(small_config(1)).generate().unwrap();
        for r in &records {
            assert!(r.cost >= 0.0);
            assert!((r.cost * 100.0 - (r.cost * 100.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_day_range() {
        let config = SyntheticConfig::new(3, date(2025, 1, 1), date(2025, 1, 1)).unwrap();
        let records = SyntheticGenerator::new(config).load_records().unwrap();
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = SyntheticConfig::new(42, date(2025, 2, 1), date(2025, 1, 1));
        assert!(matches!(result, Err(CloudwiseError::InvalidArgument(_))));
    }
}
