//! Descriptive statistics for timing sequences
//!
//! Mean, median, population standard deviation and range, matching what a
//! numpy-based report would print for the same samples.

use crate::error::{BenchError, Result};

/// Summary of one timing sequence, all values in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64, // population (divisor N)
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStatistics {
    /// Compute statistics from samples in any order
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(BenchError::EmptySamples);
        }
        let sorted = sorted_copy(samples);
        let count = sorted.len();

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>() / count as f64;

        Ok(Self {
            count,
            mean,
            median: quantile(&sorted, 0.5),
            stdev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

/// Ratio of in-process mean time to external mean time.
///
/// Values above 1 mean the external program is faster. A zero external mean
/// yields `inf` (or `NaN` when both are zero); callers decide what to do.
pub fn speedup(external_mean: f64, in_process_mean: f64) -> f64 {
    in_process_mean / external_mean
}

/// Sorted copy of the samples, NaN-tolerant
pub fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile `q` in `[0, 1]` of sorted data with linear interpolation between
/// the two closest ranks
pub fn quantile(sorted_data: &[f64], q: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted_data.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted_data[lower] + (sorted_data[upper] - sorted_data[lower]) * frac
}
