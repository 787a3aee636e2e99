//! CLI argument parsing using clap

use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Number of positional workload arguments: TESTID RANK ND NF NB
pub const POSITIONAL_COUNT: usize = 5;

/// Content duplication pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupMode {
    /// Identical content in every file of every directory
    GlobalFixed,
    /// Reseed per directory, one payload reused for the whole directory
    PerDirectoryFixed,
    /// Reseed per directory, fresh payload for every file
    PerDirectoryVarying,
    /// Continuous generator stream, fresh payload for every file
    PerFileUnique,
}

/// dirpulse - small-file write workload generator
#[derive(Parser, Debug)]
#[command(name = "dirpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Workload arguments: TESTID RANK ND NF NB (all five, or none for defaults)
    ///
    /// ND is the number of directories, NF the files per directory and NB
    /// the bytes per file (must be a multiple of 8; suffixes like 4k accepted).
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub positional: Vec<String>,

    /// Content duplication pattern
    #[arg(long, value_enum)]
    pub dedup_mode: Option<DedupMode>,

    /// PRNG seed for file content
    #[arg(long, env = "DIRPULSE_SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file (CLI values take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Number of buckets in the throughput histogram
    #[arg(long)]
    pub histogram_bins: Option<usize>,

    /// Write results as JSON to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Validate configuration and print the setup without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print DEBUG diagnostics to stderr
    #[arg(long)]
    pub debug: bool,
}

/// Positional workload arguments as raw strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalArgs<'a> {
    pub test_id: &'a str,
    pub rank: &'a str,
    pub dir_count: &'a str,
    pub files_per_dir: &'a str,
    pub file_bytes: &'a str,
}

impl Cli {
    /// Parse CLI arguments from the process environment
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument shape
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.positional.len() {
            0 | POSITIONAL_COUNT => {}
            n => return Err(ConfigError::ArgumentCount(n)),
        }

        if self.histogram_bins == Some(0) {
            return Err(ConfigError::ZeroHistogramBins);
        }

        Ok(())
    }

    /// Positional workload arguments, if given
    pub fn positional_args(&self) -> Result<Option<PositionalArgs<'_>>, ConfigError> {
        match self.positional.as_slice() {
            [] => Ok(None),
            [test_id, rank, dir_count, files_per_dir, file_bytes] => Ok(Some(PositionalArgs {
                test_id,
                rank,
                dir_count,
                files_per_dir,
                file_bytes,
            })),
            other => Err(ConfigError::ArgumentCount(other.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dirpulse").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_positionals() {
        let cli = parse(&[]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.positional_args().unwrap(), None);
    }

    #[test]
    fn test_five_positionals() {
        let cli = parse(&["test001", "0", "10", "10", "1024"]);
        assert!(cli.validate().is_ok());

        let args = cli.positional_args().unwrap().unwrap();
        assert_eq!(args.test_id, "test001");
        assert_eq!(args.rank, "0");
        assert_eq!(args.dir_count, "10");
        assert_eq!(args.files_per_dir, "10");
        assert_eq!(args.file_bytes, "1024");
    }

    #[test]
    fn test_wrong_positional_count() {
        let cli = parse(&["test001", "0", "10"]);
        assert_eq!(cli.validate(), Err(ConfigError::ArgumentCount(3)));
        assert_eq!(cli.positional_args(), Err(ConfigError::ArgumentCount(3)));
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--dedup-mode", "per-file-unique", "--seed", "7", "--debug", "--dry-run"]);
        assert_eq!(cli.dedup_mode, Some(DedupMode::PerFileUnique));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.debug);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_zero_histogram_bins() {
        let cli = parse(&["--histogram-bins", "0"]);
        assert_eq!(cli.validate(), Err(ConfigError::ZeroHistogramBins));
    }
}
