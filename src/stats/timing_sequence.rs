//! Ordered timing samples for one backend

use std::time::Duration;

use crate::error::Result;
use crate::stats::descriptive_statistics::DescriptiveStatistics;

/// Samples in run order, seconds each
#[derive(Debug, Clone, Default)]
pub struct TimingSequence {
    pub label: String,
    pub samples: Vec<f64>,
}

impl TimingSequence {
    pub fn with_capacity(label: impl Into<String>, runs: usize) -> Self {
        Self {
            label: label.into(),
            samples: Vec::with_capacity(runs),
        }
    }

    /// Append one sample, returning it in seconds
    pub fn record(&mut self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        self.samples.push(secs);
        secs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn statistics(&self) -> Result<DescriptiveStatistics> {
        DescriptiveStatistics::from_samples(&self.samples)
    }
}
