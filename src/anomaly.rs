//! Z-score anomaly detection over a daily cost series
//!
//! Statistics are computed over the whole series, anomalous days included,
//! using the population standard deviation. A series with no spread (every
//! day costs the same, or a single day) scores every day 0 and flags
//! nothing. Statistics that overflow are an error, so no NaN or infinite
//! score ever leaves this module.

use crate::error::{CloudwiseError, Result};
use crate::types::{Severity, ZScoreThreshold};
use cloudwise_core::aggregation_types::{DailyCost, ScoredDay};
use tracing::debug;

/// Standard deviations at or below this are treated as zero variance
const MIN_STD_DEV: f64 = 1e-9;

/// Mean and population standard deviation of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor N)
    pub std_dev: f64,
}

impl SeriesStats {
    /// Single-pass (Welford) mean and population standard deviation.
    ///
    /// Returns `None` for an empty input.
    ///
    /// # Examples
    /// ```
    /// use cloudwise::anomaly::SeriesStats;
    ///
    /// let stats = SeriesStats::population([20.0, 210.0]).unwrap();
    /// assert_eq!(stats.mean, 115.0);
    /// assert_eq!(stats.std_dev, 95.0);
    /// ```
    pub fn population(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;

        for value in values {
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            mean,
            std_dev: (m2 / count as f64).sqrt(),
        })
    }

    /// Whether both the mean and the standard deviation are finite
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite()
    }

    /// Whether the series has effectively no spread
    ///
    /// Only meaningful for finite statistics; see [`SeriesStats::is_finite`].
    pub fn is_flat(&self) -> bool {
        self.std_dev <= MIN_STD_DEV
    }

    /// Z-score of `value`, or 0 for a flat series
    pub fn zscore(&self, value: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }
}

/// Score each day against the series mean and flag those whose |z-score|
/// strictly exceeds `threshold`.
///
/// Output has the same length and order as `series`. Severity uses the
/// fixed cut-offs in [`Severity::from_zscore`], not `threshold`. Fails with
/// `NonFiniteStatistics` when the mean or standard deviation overflows.
pub fn detect_anomalies(
    series: &[DailyCost],
    threshold: ZScoreThreshold,
) -> Result<Vec<ScoredDay>> {
    let Some(stats) = SeriesStats::population(series.iter().map(|d| d.daily_cost)) else {
        return Ok(Vec::new());
    };

    if !stats.is_finite() {
        return Err(CloudwiseError::NonFiniteStatistics(format!(
            "mean {}, std dev {} over {} days",
            stats.mean, stats.std_dev, stats.count
        )));
    }

    if stats.is_flat() {
        debug!(
            "Daily cost has zero variance over {} days; no anomalies",
            stats.count
        );
    } else {
        debug!(
            "Daily cost mean {:.2}, std dev {:.2} over {} days",
            stats.mean, stats.std_dev, stats.count
        );
    }

    Ok(series
        .iter()
        .map(|day| {
            let zscore = stats.zscore(day.daily_cost);
            ScoredDay {
                date: day.date,
                daily_cost: day.daily_cost,
                zscore,
                is_anomaly: threshold.is_exceeded_by(zscore),
                severity: Severity::from_zscore(zscore),
            }
        })
        .collect())
}
