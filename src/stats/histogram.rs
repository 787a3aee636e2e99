//! Equal-width histogram bucketing
//!
//! Buckets samples into a fixed number of equal-width bins spanning
//! `[min, max]`, following the conventions of numpy's `histogram`:
//!
//! - every bin is half-open `[lo, hi)` except the last, which is closed
//! - a degenerate range (`min == max`) is widened to `[min - 0.5, max + 0.5]`
//!
//! The result is the `(counts, edges)` pair handed to a
//! [`HistogramRenderer`](crate::output::plot::HistogramRenderer).

use serde::{Deserialize, Serialize};

/// Bucket counts and the `counts.len() + 1` edges delimiting them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    counts: Vec<u64>,
    edges: Vec<f64>,
}

impl Histogram {
    /// Bucket `samples` into `bins` equal-width bins
    ///
    /// Returns `None` if there are no finite samples or `bins` is zero.
    /// Non-finite samples are skipped.
    pub fn from_samples(samples: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }

        let finite = samples.iter().copied().filter(|s| s.is_finite());
        let (mut lo, mut hi) = finite.clone().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });
        if lo > hi {
            return None;
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = linspace(lo, hi, bins + 1);
        let mut counts = vec![0u64; bins];
        let norm = bins as f64 / (hi - lo);

        for sample in finite {
            let mut idx = (((sample - lo) * norm) as usize).min(bins - 1);

            // Correct for rounding at the edges
            if sample < edges[idx] {
                idx = idx.saturating_sub(1);
            } else if sample >= edges[idx + 1] && idx + 1 < bins {
                idx += 1;
            }

            counts[idx] += 1;
        }

        Some(Self { counts, edges })
    }

    /// Samples per bin
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bin edges; bin `i` spans `edges[i]..edges[i + 1]`
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of bucketed samples
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// `num` evenly spaced points from `start` to `stop` inclusive
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let step = (stop - start) / (num - 1) as f64;
    let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    if let Some(last) = points.last_mut() {
        *last = stop;
    }
    points
}
