//! Configuration validation
//!
//! Runs before any directory is created. Every error here is fatal.

use super::*;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_workload(&config.workload)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate workload configuration
pub fn validate_workload(workload: &WorkloadConfig) -> Result<(), ConfigError> {
    validate_path_component("test_id", &workload.test_id)?;
    validate_path_component("rank", &workload.rank)?;

    if workload.file_bytes == 0 {
        return Err(ConfigError::ZeroFileSize);
    }
    if workload.file_bytes % 8 != 0 {
        return Err(ConfigError::FileSizeNotMultipleOf8(workload.file_bytes as u64));
    }
    if workload.file_bytes > MAX_FILE_BYTES {
        return Err(ConfigError::InvalidValue {
            field: "file_bytes",
            reason: format!(
                "{} exceeds the single-write limit of {} bytes",
                workload.file_bytes, MAX_FILE_BYTES
            ),
        });
    }

    // Zero files is allowed through; the run then fails at finalize with a
    // stats error instead of reporting rates.
    if workload.total_files() == 0 {
        eprintln!(
            "Warning: {} directories x {} files per directory writes no files",
            workload.dir_count, workload.files_per_dir
        );
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<(), ConfigError> {
    if output.histogram_bins == 0 {
        return Err(ConfigError::ZeroHistogramBins);
    }

    Ok(())
}

/// `rank` namespaces the output subtree of concurrent instances, so it must
/// stay a single path component; `test_id` may be nested but not empty.
fn validate_path_component(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must not be empty".to_string(),
        });
    }

    if field == "rank" && (value.contains('/') || value.contains('\\') || value == "." || value == "..") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("'{}' must be a single path component", value),
        });
    }

    Ok(())
}
