//! TOML configuration file parsing
//!
//! Every key is optional; missing keys fall back to the defaults in
//! [`WorkloadConfig::default`]. The duplication mode may be given by name
//! (`dedup_mode = "per-file-unique"`) or through the legacy switches
//! `dedup_testing` / `vary_file_content`, but not both.
//!
//! ```toml
//! [workload]
//! test_id = "test001"
//! rank = "0"
//! dir_count = 10
//! files_per_dir = 10
//! file_bytes = 1024
//! dedup_mode = "per-directory-fixed"
//!
//! [output]
//! histogram_bins = 20
//! ```

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Configuration file contents before defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub workload: FileWorkload,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// `[workload]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileWorkload {
    pub test_id: Option<String>,
    pub rank: Option<String>,
    pub dir_count: Option<u32>,
    pub files_per_dir: Option<u32>,
    pub file_bytes: Option<u32>,
    pub dedup_mode: Option<DuplicationMode>,
    pub dedup_testing: Option<bool>,
    pub vary_file_content: Option<bool>,
    pub seed: Option<u64>,
}

impl FileWorkload {
    /// Apply file values on top of the defaults
    pub fn resolve(&self) -> Result<WorkloadConfig, ConfigError> {
        let defaults = WorkloadConfig::default();

        let legacy = self.dedup_testing.is_some() || self.vary_file_content.is_some();
        let dedup_mode = match (self.dedup_mode, legacy) {
            (Some(_), true) => {
                return Err(ConfigError::InvalidValue {
                    field: "dedup_mode",
                    reason: "cannot be combined with dedup_testing/vary_file_content".to_string(),
                })
            }
            (Some(mode), false) => mode,
            // An absent dedup_testing means reseeding, as the legacy tool
            // always reseeded unless told otherwise
            (None, true) => DuplicationMode::from_legacy_flags(
                self.dedup_testing.unwrap_or(true),
                self.vary_file_content.unwrap_or(false),
            )?,
            (None, false) => defaults.dedup_mode,
        };

        Ok(WorkloadConfig {
            test_id: self.test_id.clone().unwrap_or(defaults.test_id),
            rank: self.rank.clone().unwrap_or(defaults.rank),
            dir_count: self.dir_count.unwrap_or(defaults.dir_count),
            files_per_dir: self.files_per_dir.unwrap_or(defaults.files_per_dir),
            file_bytes: self.file_bytes.unwrap_or(defaults.file_bytes),
            dedup_mode,
            seed: self.seed.unwrap_or(defaults.seed),
        })
    }
}

impl FileConfig {
    /// Resolve into a complete configuration
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        Ok(Config {
            workload: self.workload.resolve()?,
            output: self.output.clone(),
            runtime: self.runtime.clone(),
        })
    }
}

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let file: FileConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(file.resolve()?)
}

/// Merge CLI arguments with configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(args) = cli.positional_args()? {
        config.workload.test_id = args.test_id.to_string();
        config.workload.rank = args.rank.to_string();
        config.workload.dir_count = cli_convert::parse_count("ND", args.dir_count)?;
        config.workload.files_per_dir = cli_convert::parse_count("NF", args.files_per_dir)?;
        config.workload.file_bytes = cli_convert::parse_file_bytes(args.file_bytes)?;
    }

    if let Some(mode) = cli.dedup_mode {
        config.workload.dedup_mode = cli_convert::convert_dedup_mode(mode);
    }
    if let Some(seed) = cli.seed {
        config.workload.seed = seed;
    }

    if let Some(bins) = cli.histogram_bins {
        config.output.histogram_bins = bins;
    }
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }

    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}
