//! Error taxonomy
//!
//! Three fatal error families: configuration problems detected before any
//! IO, filesystem failures during the write phase, and statistics that
//! cannot be derived from the recorded samples.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid configuration, rejected before the run starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected 0 or 5 positional arguments [TESTID RANK ND NF NB], got {0}")]
    ArgumentCount(usize),

    #[error("file size must be a multiple of 8 bytes, got {0}")]
    FileSizeNotMultipleOf8(u64),

    #[error("file size must be greater than 0")]
    ZeroFileSize,

    #[error("varying file content requires per-directory reseeding; select per-file-unique for a continuous stream")]
    ContradictoryContentFlags,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("histogram bin count must be greater than 0")]
    ZeroHistogramBins,
}

/// Filesystem failure during tree creation or the write loop
#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("short write to {path}: wrote {written} of {expected} bytes")]
    ShortWrite {
        path: PathBuf,
        expected: usize,
        written: usize,
    },
}

/// Statistics that cannot be derived from the recorded samples
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
}
