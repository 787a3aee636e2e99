//! JSON output formatting
//!
//! Serializes one run (configuration, host, derived statistics and the
//! throughput histogram) for baseline comparison tooling.

use crate::config::WorkloadConfig;
use crate::stats::histogram::Histogram;
use crate::stats::DerivedStats;
use crate::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Bumped when fields are renamed or removed
pub const JSON_FORMAT_VERSION: u32 = 1;

/// Complete JSON document for one rank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunOutput {
    pub format_version: u32,
    pub hostname: String,
    pub start_time: String,
    pub end_time: String,
    pub workload: WorkloadConfig,
    pub results: DerivedStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<JsonHistogram>,
}

/// Per-file throughput buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonHistogram {
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
}

impl From<&Histogram> for JsonHistogram {
    fn from(hist: &Histogram) -> Self {
        Self {
            counts: hist.counts().to_vec(),
            edges: hist.edges().to_vec(),
        }
    }
}

impl JsonRunOutput {
    pub fn new(
        hostname: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
        workload: &WorkloadConfig,
        results: &DerivedStats,
        histogram: Option<&Histogram>,
    ) -> Self {
        Self {
            format_version: JSON_FORMAT_VERSION,
            hostname: hostname.to_string(),
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            workload: workload.clone(),
            results: results.clone(),
            histogram: histogram.map(JsonHistogram::from),
        }
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, output: &JsonRunOutput, pretty: bool) -> Result<()> {
    let file = File::create(output_path)?;

    if pretty {
        serde_json::to_writer_pretty(file, output)?;
    } else {
        serde_json::to_writer(file, output)?;
    }

    Ok(())
}
