//! dirpulse - small-file write workload generator
//!
//! dirpulse writes a configurable number of equally sized files across a
//! configurable number of directories and reports latency/throughput
//! statistics for the write phase. File content is generated from a seeded
//! PRNG so that runs are reproducible and deduplication behavior of the
//! storage backend can be exercised deliberately.
//!
//! # Architecture
//!
//! - **content**: deterministic payload generation and duplication modes
//! - **worker**: the timed write loop and the filesystem writer seam
//! - **stats**: streaming accumulation, derived statistics, histogram bucketing
//! - **output**: `#R_<rank>` text report, bar chart rendering, JSON export
//! - **target**: bit-exact output tree layout

pub mod config;
pub mod content;
pub mod error;
pub mod output;
pub mod stats;
pub mod target;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::{DuplicationMode, WorkloadConfig};
pub use error::{ConfigError, FilesystemError, StatsError};
pub use worker::WriteLoop;

/// Result type used throughout dirpulse
pub type Result<T> = anyhow::Result<T>;
