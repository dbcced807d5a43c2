//! Wall-clock statistics for repeated ranking calls.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::utils::validation::count_to_f64;

/// Summary of repeated timings, in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingStats {
    pub runs: usize,
    pub mean: f64,
    /// Sample standard deviation; 0.0 for a single run
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl TimingStats {
    /// Summarize a set of samples. Returns `None` when there are none.
    #[must_use]
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let n = count_to_f64(secs.len());
        let mean = secs.iter().sum::<f64>() / n;

        let stddev = if secs.len() > 1 {
            let variance = secs.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self {
            runs: secs.len(),
            mean,
            stddev,
            min: secs.iter().copied().fold(f64::INFINITY, f64::min),
            max: secs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }

    /// Items processed per second at the mean run time
    #[must_use]
    pub fn throughput(&self, items: usize) -> f64 {
        if self.mean > 0.0 {
            count_to_f64(items) / self.mean
        } else {
            f64::INFINITY
        }
    }
}

/// Run `f` `runs` times and collect the elapsed time of each run.
///
/// # Errors
///
/// Returns the first error produced by `f`; remaining runs are skipped.
pub fn time_runs<T, E, F>(runs: usize, mut f: F) -> Result<Vec<Duration>, E>
where
    F: FnMut() -> Result<T, E>,
{
    let mut samples = Vec::with_capacity(runs);
    for _ in 0..runs {
        let start = Instant::now();
        f()?;
        samples.push(start.elapsed());
    }
    Ok(samples)
}
