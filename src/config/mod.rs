//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! The resulting [`Config`] is built once before the run and never mutated.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Seed used by every content generator unless overridden
pub const DEFAULT_SEED: u64 = 12345;

/// Largest file written with one `write(2)`; Linux caps a single call at
/// `MAX_RW_COUNT` and anything above it comes back short
pub const MAX_FILE_BYTES: u32 = 0x7fff_f000;

/// Default number of histogram buckets for the throughput distribution
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub workload: WorkloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// What to write and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Top-level directory holding all generated files
    pub test_id: String,
    /// Namespace for this instance's output subtree
    pub rank: String,
    /// Number of directories to write into
    pub dir_count: u32,
    /// Number of files written to each directory
    pub files_per_dir: u32,
    /// Size of every file in bytes (multiple of 8)
    pub file_bytes: u32,
    /// Content duplication pattern
    pub dedup_mode: DuplicationMode,
    /// PRNG seed for payload content
    pub seed: u64,
}

impl WorkloadConfig {
    /// Output root relative to the working directory: `<test_id>/rank_<rank>`
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.test_id).join(format!("rank_{}", self.rank))
    }

    /// Total number of files the run will write
    pub fn total_files(&self) -> u64 {
        self.dir_count as u64 * self.files_per_dir as u64
    }

    /// Total number of bytes the run will write
    pub fn total_bytes(&self) -> u64 {
        self.total_files() * self.file_bytes as u64
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            test_id: "io_test".to_string(),
            rank: "0".to_string(),
            dir_count: 10,
            files_per_dir: 10,
            file_bytes: 1024,
            dedup_mode: DuplicationMode::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Content duplication pattern across directories and files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicationMode {
    /// One payload generated once and reused for every file
    #[default]
    GlobalFixed,
    /// Generator reseeded per directory; one payload per directory
    PerDirectoryFixed,
    /// Generator reseeded per directory; fresh payload per file
    PerDirectoryVarying,
    /// Continuous generator stream; fresh payload per file
    PerFileUnique,
}

/// The two generator switches a [`DuplicationMode`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentFlags {
    pub reseed_per_directory: bool,
    pub vary_file_content: bool,
}

impl DuplicationMode {
    pub fn flags(self) -> ContentFlags {
        ContentFlags {
            reseed_per_directory: matches!(self, Self::PerDirectoryFixed | Self::PerDirectoryVarying),
            vary_file_content: matches!(self, Self::PerDirectoryVarying | Self::PerFileUnique),
        }
    }

    /// Whether the generator is reseeded at the start of each directory
    pub fn reseeds_per_directory(self) -> bool {
        self.flags().reseed_per_directory
    }

    /// Whether every file draws a fresh payload
    pub fn varies_file_content(self) -> bool {
        self.flags().vary_file_content
    }

    /// Resolve a mode from the legacy `dedup_testing` / `vary_file_content` switches
    ///
    /// Varying content without per-directory reseeding is rejected: under the
    /// legacy switches varying content always implied reseeding, so the
    /// combination has no meaning. A continuous stream is `PerFileUnique`
    /// and must be requested by name.
    pub fn from_legacy_flags(dedup_testing: bool, vary_file_content: bool) -> Result<Self, ConfigError> {
        Self::try_from(ContentFlags {
            reseed_per_directory: dedup_testing,
            vary_file_content,
        })
    }
}

impl TryFrom<ContentFlags> for DuplicationMode {
    type Error = ConfigError;

    fn try_from(flags: ContentFlags) -> Result<Self, Self::Error> {
        match (flags.reseed_per_directory, flags.vary_file_content) {
            (false, false) => Ok(Self::GlobalFixed),
            (true, false) => Ok(Self::PerDirectoryFixed),
            (true, true) => Ok(Self::PerDirectoryVarying),
            (false, true) => Err(ConfigError::ContradictoryContentFlags),
        }
    }
}

impl fmt::Display for DuplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::GlobalFixed => write!(f, "global-fixed (identical content in every file)"),
            Self::PerDirectoryFixed => write!(f, "per-directory-fixed (reseed per directory, one payload per directory)"),
            Self::PerDirectoryVarying => write!(f, "per-directory-varying (reseed per directory, fresh payload per file)"),
            Self::PerFileUnique => write!(f, "per-file-unique (continuous stream, fresh payload per file)"),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of equal-width buckets in the throughput histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Optional JSON results file
    #[serde(default)]
    pub json_output: Option<PathBuf>,
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            json_output: None,
        }
    }
}

/// Runtime behavior switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate and print the setup, but write nothing
    #[serde(default)]
    pub dry_run: bool,
    /// Emit DEBUG diagnostics on stderr
    #[serde(default)]
    pub debug: bool,
}
