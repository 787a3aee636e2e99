//! Write-phase statistics
//!
//! [`RunningStats`] accumulates one sample per completed write with O(1)
//! amortized cost: count, byte total, sum and sum of squares of the write
//! time, min/max, and the per-file time array. Once the write loop exits it
//! is frozen and [`RunningStats::finalize`] derives the reported figures.
//!
//! # Example
//!
//! ```
//! use dirpulse::stats::RunningStats;
//!
//! let mut stats = RunningStats::new();
//! stats.record(0.002, 1024);
//! stats.record(0.004, 1024);
//!
//! let derived = stats.finalize().unwrap();
//! assert!((derived.mean_time - 0.003).abs() < 1e-12);
//! assert_eq!(derived.bytes_written, 2048);
//! ```

pub mod histogram;

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Streaming accumulator for one run
#[derive(Debug, Clone)]
pub struct RunningStats {
    files_written: u64,
    bytes_written: u64,
    time_sum: f64,
    time_sum_sq: f64,
    time_min: f64,
    time_max: f64,
    per_file_times: Vec<f64>,
    per_file_bytes: Vec<u64>,
    process_io_time: Option<f64>,
    phase: Option<PhaseTimes>,
}

/// Whole-phase timings captured when the write loop exits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimes {
    /// Wall-clock duration of the write phase
    pub wall: Duration,
    /// Process CPU time consumed by the write phase, if measurable
    pub process: Option<Duration>,
}

impl RunningStats {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty accumulator sized for `files` samples
    pub fn with_capacity(files: usize) -> Self {
        Self {
            files_written: 0,
            bytes_written: 0,
            time_sum: 0.0,
            time_sum_sq: 0.0,
            time_min: f64::INFINITY,
            time_max: 0.0,
            per_file_times: Vec::with_capacity(files),
            per_file_bytes: Vec::with_capacity(files),
            process_io_time: None,
            phase: None,
        }
    }

    /// Record one completed write
    ///
    /// This is the hot path, called exactly once per file in write order.
    #[inline]
    pub fn record(&mut self, duration_secs: f64, byte_len: u64) {
        debug_assert!(self.phase.is_none(), "record() after freeze()");

        self.files_written += 1;
        self.bytes_written += byte_len;
        self.time_sum += duration_secs;
        self.time_sum_sq += duration_secs * duration_secs;
        self.time_min = self.time_min.min(duration_secs);
        self.time_max = self.time_max.max(duration_secs);
        self.per_file_times.push(duration_secs);
        self.per_file_bytes.push(byte_len);
    }

    /// Add process CPU time spent inside one timed write region
    #[inline]
    pub fn add_process_io_time(&mut self, secs: f64) {
        *self.process_io_time.get_or_insert(0.0) += secs;
    }

    /// Close the run; no samples may be recorded afterwards
    pub fn freeze(&mut self, phase: PhaseTimes) {
        self.phase = Some(phase);
    }

    /// Whether the run has been closed
    pub fn is_frozen(&self) -> bool {
        self.phase.is_some()
    }

    pub fn files_written(&self) -> u64 {
        self.files_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Summed per-file write time in seconds
    pub fn time_sum(&self) -> f64 {
        self.time_sum
    }

    pub fn time_min(&self) -> f64 {
        self.time_min
    }

    pub fn time_max(&self) -> f64 {
        self.time_max
    }

    /// Per-file write times in write order
    pub fn per_file_times(&self) -> &[f64] {
        &self.per_file_times
    }

    /// Derive the reported statistics
    ///
    /// # Errors
    ///
    /// Returns `StatsError::DivisionByZero` if no file was written or if the
    /// summed write time is zero.
    ///
    /// A single write below clock resolution has no finite throughput; it
    /// still counts towards the totals and the time statistics, but is left
    /// out of the per-file throughput view and counted in `zero_time_files`.
    pub fn finalize(&self) -> Result<DerivedStats, StatsError> {
        if self.files_written == 0 {
            return Err(StatsError::DivisionByZero("no files were written"));
        }
        if self.time_sum <= 0.0 {
            return Err(StatsError::DivisionByZero("total I/O time is zero"));
        }

        let n = self.files_written as f64;
        let mean_time = self.time_sum / n;
        // Cancellation can push the radicand slightly negative
        let variance = (self.time_sum_sq / n - mean_time * mean_time).max(0.0);

        let per_file_throughput: Vec<f64> = self
            .per_file_bytes
            .iter()
            .zip(&self.per_file_times)
            .filter(|&(_, &secs)| secs > 0.0)
            .map(|(&bytes, &secs)| bytes as f64 / secs)
            .collect();
        let zero_time_files = self.files_written - per_file_throughput.len() as u64;

        let min_file_throughput = per_file_throughput.iter().copied().fold(f64::INFINITY, f64::min);
        let max_file_throughput = per_file_throughput.iter().copied().fold(0.0, f64::max);
        let mean_file_throughput = per_file_throughput.iter().sum::<f64>() / per_file_throughput.len() as f64;
        let median_file_throughput = median(&per_file_throughput);

        let wall = self.phase.map(|p| p.wall.as_secs_f64());

        Ok(DerivedStats {
            files_written: self.files_written,
            bytes_written: self.bytes_written,
            elapsed_io_time: self.time_sum,
            elapsed_time: wall.unwrap_or(self.time_sum),
            process_time: self.phase.and_then(|p| p.process).map(|d| d.as_secs_f64()),
            process_io_time: self.process_io_time,
            mean_time,
            stddev_time: variance.sqrt(),
            min_time: self.time_min,
            max_time: self.time_max,
            mean_throughput: self.bytes_written as f64 / self.time_sum,
            files_per_sec: n / self.time_sum,
            min_file_throughput,
            max_file_throughput,
            mean_file_throughput,
            median_file_throughput,
            per_file_throughput,
            zero_time_files,
        })
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics derived once from a frozen [`RunningStats`]
///
/// Times are in seconds, throughputs in bytes per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub files_written: u64,
    pub bytes_written: u64,
    /// Sum of per-file write times
    pub elapsed_io_time: f64,
    /// Wall-clock duration of the whole write phase
    pub elapsed_time: f64,
    pub process_time: Option<f64>,
    pub process_io_time: Option<f64>,
    pub mean_time: f64,
    /// Population standard deviation of per-file write time
    pub stddev_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    /// Total bytes over summed write time
    pub mean_throughput: f64,
    pub files_per_sec: f64,
    pub min_file_throughput: f64,
    pub max_file_throughput: f64,
    pub mean_file_throughput: f64,
    pub median_file_throughput: f64,
    /// Effective throughput of each file with a non-zero write time, in write order
    pub per_file_throughput: Vec<f64>,
    /// Writes that completed below clock resolution
    #[serde(default)]
    pub zero_time_files: u64,
}

/// Median with the two middle values averaged for even counts
fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rel_eq(actual: f64, expected: f64) {
        let tol = 1e-9 * expected.abs().max(1e-300);
        assert!(
            (actual - expected).abs() <= tol,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_record_updates_aggregates() {
        let mut stats = RunningStats::new();
        stats.record(0.5, 100);
        stats.record(0.25, 100);
        stats.record(1.0, 100);

        assert_eq!(stats.files_written(), 3);
        assert_eq!(stats.bytes_written(), 300);
        assert_eq!(stats.time_sum(), 1.75);
        assert_eq!(stats.time_min(), 0.25);
        assert_eq!(stats.time_max(), 1.0);
        assert_eq!(stats.per_file_times(), &[0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_initial_min_max() {
        let stats = RunningStats::new();
        assert_eq!(stats.time_min(), f64::INFINITY);
        assert_eq!(stats.time_max(), 0.0);
    }

    #[test]
    fn test_mean_and_population_stddev() {
        let samples = [0.002, 0.004, 0.004, 0.004, 0.005, 0.005, 0.007, 0.009];
        let mut stats = RunningStats::new();
        for &s in &samples {
            stats.record(s, 1024);
        }

        let derived = stats.finalize().unwrap();

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        assert_rel_eq(derived.mean_time, mean);
        assert_rel_eq(derived.stddev_time, var.sqrt());
        // Population, not Bessel-corrected: this set has sigma exactly 0.002
        assert!((derived.stddev_time - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_constant_samples_stddev_is_zero_not_nan() {
        let mut stats = RunningStats::new();
        for _ in 0..1000 {
            stats.record(0.1, 8);
        }

        let derived = stats.finalize().unwrap();
        assert!(derived.stddev_time >= 0.0);
        assert!(derived.stddev_time < 1e-6);
        assert!(!derived.stddev_time.is_nan());
    }

    #[test]
    fn test_throughput() {
        let mut stats = RunningStats::new();
        stats.record(1.0, 1000);
        stats.record(0.5, 1000);
        stats.record(0.25, 1000);
        stats.record(2.0, 1000);

        let derived = stats.finalize().unwrap();

        assert_rel_eq(derived.mean_throughput, 4000.0 / 3.75);
        assert_rel_eq(derived.files_per_sec, 4.0 / 3.75);
        assert_eq!(derived.per_file_throughput, vec![1000.0, 2000.0, 4000.0, 500.0]);
        assert_eq!(derived.min_file_throughput, 500.0);
        assert_eq!(derived.max_file_throughput, 4000.0);
        assert_eq!(derived.mean_file_throughput, 1875.0);
        // Even count: mean of 1000 and 2000
        assert_eq!(derived.median_file_throughput, 1500.0);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[5.0]), 5.0);
    }

    #[test]
    fn test_finalize_without_records() {
        let stats = RunningStats::new();
        assert!(matches!(stats.finalize(), Err(StatsError::DivisionByZero(_))));
    }

    #[test]
    fn test_finalize_with_zero_time() {
        let mut stats = RunningStats::new();
        stats.record(0.0, 8);
        stats.record(0.0, 8);
        assert!(matches!(stats.finalize(), Err(StatsError::DivisionByZero(_))));
    }

    #[test]
    fn test_zero_time_sample_left_out_of_throughput_view() {
        let mut stats = RunningStats::new();
        stats.record(0.5, 8);
        stats.record(0.0, 8);
        stats.record(0.25, 8);

        let derived = stats.finalize().unwrap();
        assert_eq!(derived.files_written, 3);
        assert_eq!(derived.bytes_written, 24);
        assert_eq!(derived.zero_time_files, 1);
        assert_eq!(derived.min_time, 0.0);
        assert_rel_eq(derived.mean_time, 0.25);
        assert_eq!(derived.per_file_throughput, vec![16.0, 32.0]);
        assert_eq!(derived.min_file_throughput, 16.0);
        assert_eq!(derived.max_file_throughput, 32.0);
        assert_eq!(derived.mean_file_throughput, 24.0);
        assert_eq!(derived.median_file_throughput, 24.0);
        assert!(derived.per_file_throughput.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_phase_times() {
        let mut stats = RunningStats::new();
        stats.record(0.5, 8);
        stats.add_process_io_time(0.01);
        stats.add_process_io_time(0.02);
        assert!(!stats.is_frozen());

        stats.freeze(PhaseTimes {
            wall: Duration::from_secs(2),
            process: Some(Duration::from_millis(500)),
        });
        assert!(stats.is_frozen());

        let derived = stats.finalize().unwrap();
        assert_eq!(derived.elapsed_time, 2.0);
        assert_eq!(derived.elapsed_io_time, 0.5);
        assert_eq!(derived.process_time, Some(0.5));
        assert_rel_eq(derived.process_io_time.unwrap(), 0.03);
    }

    #[test]
    fn test_elapsed_time_defaults_to_io_time() {
        let mut stats = RunningStats::new();
        stats.record(0.25, 8);

        let derived = stats.finalize().unwrap();
        assert_eq!(derived.elapsed_time, 0.25);
        assert_eq!(derived.process_time, None);
        assert_eq!(derived.process_io_time, None);
    }
}
