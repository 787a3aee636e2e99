//! Text report formatting
//!
//! Every line is prefixed `#R_<rank> ` so that output from concurrent ranks
//! can be interleaved in one log and separated again with grep. The
//! `Elapsed I/O time:` line is the monitoring anchor; its wording must not
//! change. The other metric lines keep the wording existing log scrapers
//! grep for, misspelled `Mimimum` included.

use crate::config::WorkloadConfig;
use crate::output::plot::HistogramRenderer;
use crate::stats::histogram::Histogram;
use crate::stats::DerivedStats;
use crate::util::host::{format_cpu_list, HostInfo};
use crate::util::units::{bytes_to_human, RateBreakdown};
use chrono::{DateTime, Local};

/// Prefix for every report line of `rank`
pub fn rank_prefix(rank: &str) -> String {
    format!("#R_{} ", rank)
}

/// Formatted results plus the histogram to render between them
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Summary lines, printed before the histogram
    pub summary: Vec<String>,
    /// Bucketed per-file throughput for the renderer
    pub histogram: Option<Histogram>,
    /// Lines printed after the histogram
    pub trailer: Vec<String>,
}

impl Report {
    /// All report lines in print order, with the histogram rendered by `renderer`
    pub fn render_with(&self, renderer: &dyn HistogramRenderer) -> Vec<String> {
        let mut lines = self.summary.clone();
        if let Some(ref hist) = self.histogram {
            lines.extend(renderer.render(hist.counts(), hist.edges()));
        }
        lines.extend(self.trailer.iter().cloned());
        lines
    }
}

/// Format results of a finished run
pub fn render_report(config: &WorkloadConfig, stats: &DerivedStats, histogram_bins: usize) -> Report {
    let p = rank_prefix(&config.rank);
    let mut summary = Vec::new();

    if let Some(process) = stats.process_time {
        summary.push(format!("{}Process time: {:.6} secs", p, process));
    }
    if let Some(process_io) = stats.process_io_time {
        summary.push(format!("{}Process I/O time: {:.6} secs", p, process_io));
    }
    summary.push(format!("{}Elapsed time: {:.6} secs", p, stats.elapsed_time));
    summary.push(format!("{}Elapsed I/O time: {:.6} secs", p, stats.elapsed_io_time));

    summary.push(format!(
        "{}Mean overall bytes per sec: {}",
        p,
        RateBreakdown::new(stats.mean_throughput)
    ));
    summary.push(format!(
        "{}Mean overall files processed per sec: {:.6}/sec",
        p, stats.files_per_sec
    ));
    summary.push(format!("{}Mean overall I/O time per file: {:.6}", p, stats.mean_time));
    summary.push(format!("{}Overall I/O time per file sigma: {:.6}", p, stats.stddev_time));

    summary.push(format!(
        "{}Minimum bytes per sec for a file: {}",
        p,
        RateBreakdown::new(stats.min_file_throughput)
    ));
    summary.push(format!(
        "{}Mimimum effective file processed per sec: {:.6}/sec",
        p,
        1.0 / stats.max_time
    ));
    summary.push(format!(
        "{}Maximum bytes per sec for a file: {}",
        p,
        RateBreakdown::new(stats.max_file_throughput)
    ));
    summary.push(format!(
        "{}Maximum effective file processed per sec: {:.6}/sec",
        p,
        1.0 / stats.min_time
    ));

    summary.push(format!("{}Bytes/sec distribution plot.", p));

    let trailer = vec![
        format!(
            "{}Mean of per file bytes per sec: {}/sec",
            p,
            bytes_to_human(stats.mean_file_throughput)
        ),
        format!(
            "{}Median of per file bytes per sec: {}/sec",
            p,
            bytes_to_human(stats.median_file_throughput)
        ),
    ];

    Report {
        summary,
        histogram: Histogram::from_samples(&stats.per_file_throughput, histogram_bins),
        trailer,
    }
}

/// Format the setup banner printed before the run
pub fn render_setup(config: &WorkloadConfig, host: &HostInfo, start: DateTime<Local>) -> Vec<String> {
    let p = rank_prefix(&config.rank);
    let file_bytes = config.file_bytes as u64;
    let total_bytes = config.total_bytes();

    let affinity = match host.cpu_affinity {
        Some(ref cpus) => format_cpu_list(cpus),
        None => "unavailable".to_string(),
    };

    vec![
        format!("{}Start time: {}", p, start.format("%Y-%m-%d %H:%M:%S%.6f")),
        format!("{}******* SETUP *********", p),
        format!("{}Running on: {}", p, host.hostname),
        format!("{}Running with OS: {}", p, host.os),
        format!("{}Available CPU cores: {}", p, host.cpu_count),
        format!("{}CPU affinity: {}", p, affinity),
        format!("{}Running in directory: {}", p, host.working_dir.display()),
        format!(
            "{}Writing to directory: {}",
            p,
            host.working_dir.join(config.root_path()).display()
        ),
        format!("{}Number of directories requested: {}", p, config.dir_count),
        format!("{}Number of files requested: {}", p, config.total_files()),
        format!(
            "{}Number of bytes per file: {}, {}",
            p,
            file_bytes,
            bytes_to_human(file_bytes as f64)
        ),
        format!(
            "{}Total number of bytes requested: {}, {}",
            p,
            total_bytes,
            bytes_to_human(total_bytes as f64)
        ),
        format!("{}Duplicate content mode: {}", p, config.dedup_mode),
        format!("{}Content seed: {}", p, config.seed),
    ]
}

/// Format the closing line
pub fn render_end(rank: &str, end: DateTime<Local>) -> String {
    format!("{}End time: {}", rank_prefix(rank), end.format("%Y-%m-%d %H:%M:%S%.6f"))
}
