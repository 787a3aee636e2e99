//! CLI to Config conversion utilities

use crate::config::cli::{self, Cli};
use crate::config::{toml, Config, DuplicationMode, MAX_FILE_BYTES};
use crate::error::ConfigError;
use anyhow::{Context, Result};

/// Parse a size string (e.g., "1024", "4k", "1M") to bytes
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with("k") || s.ends_with("kb") {
        (s.trim_end_matches("kb").trim_end_matches("k"), 1024u64)
    } else if s.ends_with("m") || s.ends_with("mb") {
        (s.trim_end_matches("mb").trim_end_matches("m"), 1024 * 1024)
    } else if s.ends_with("g") || s.ends_with("gb") {
        (s.trim_end_matches("gb").trim_end_matches("g"), 1024 * 1024 * 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str.parse()
        .with_context(|| format!("Invalid size format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Size overflows: {}", s))
}

/// Parse the bytes-per-file argument
///
/// Accepts size suffixes but the result must be a multiple of 8 no larger
/// than [`MAX_FILE_BYTES`]; nothing is rounded.
pub fn parse_file_bytes(s: &str) -> Result<u32> {
    let bytes = parse_size(s).context("Invalid NB (bytes per file)")?;

    if bytes % 8 != 0 {
        return Err(ConfigError::FileSizeNotMultipleOf8(bytes).into());
    }

    if bytes > MAX_FILE_BYTES as u64 {
        return Err(ConfigError::InvalidValue {
            field: "NB",
            reason: format!("{} bytes exceeds the single-write limit of {}", bytes, MAX_FILE_BYTES),
        }
        .into());
    }

    Ok(bytes as u32)
}

/// Parse a directory or file count argument
pub fn parse_count(field: &'static str, s: &str) -> Result<u32> {
    s.trim().parse::<u32>().map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: format!("'{}': {}", s, e),
        }
        .into()
    })
}

/// Convert CLI DedupMode to config DuplicationMode
pub fn convert_dedup_mode(mode: cli::DedupMode) -> DuplicationMode {
    match mode {
        cli::DedupMode::GlobalFixed => DuplicationMode::GlobalFixed,
        cli::DedupMode::PerDirectoryFixed => DuplicationMode::PerDirectoryFixed,
        cli::DedupMode::PerDirectoryVarying => DuplicationMode::PerDirectoryVarying,
        cli::DedupMode::PerFileUnique => DuplicationMode::PerFileUnique,
    }
}

/// Build the run configuration: defaults, then the TOML file, then CLI values
pub fn build_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => toml::parse_toml_file(path)?,
        None => Config::default(),
    };

    toml::merge_cli_with_config(cli, base)
}
