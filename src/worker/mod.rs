//! Write loop
//!
//! The [`WriteLoop`] is the core execution unit. It creates the output
//! tree, then walks directories × files in order, writing one payload per
//! file and recording the duration of each write in a [`RunningStats`].
//!
//! # What is timed
//!
//! Only the [`FileWriter::write_file`] call (create, one write, close) sits
//! between the two timestamps. Directory creation and payload generation
//! happen outside the timed region.
//!
//! # Example
//!
//! ```no_run
//! use dirpulse::config::WorkloadConfig;
//! use dirpulse::worker::WriteLoop;
//!
//! let config = WorkloadConfig::default();
//! let stats = WriteLoop::new(&config).run()?;
//! let derived = stats.finalize()?;
//!
//! println!("Elapsed I/O time: {:.6} secs", derived.elapsed_io_time);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod writer;

pub use writer::{FileWriter, SyncFileWriter};

use crate::config::WorkloadConfig;
use crate::content::PayloadSource;
use crate::stats::{PhaseTimes, RunningStats};
use crate::target::OutputLayout;
use crate::util::resource::CpuStamp;
use crate::util::time::{format_duration, Timestamp};
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Timed write loop over one rank's output tree
pub struct WriteLoop<'a, W: FileWriter = SyncFileWriter> {
    config: &'a WorkloadConfig,
    layout: OutputLayout,
    writer: W,
    debug: bool,
}

impl<'a> WriteLoop<'a, SyncFileWriter> {
    /// Write loop using plain synchronous file writes, rooted at the working directory
    pub fn new(config: &'a WorkloadConfig) -> Self {
        Self::with_writer(config, SyncFileWriter::new())
    }
}

impl<'a, W: FileWriter> WriteLoop<'a, W> {
    /// Write loop using a custom writer
    pub fn with_writer(config: &'a WorkloadConfig, writer: W) -> Self {
        Self {
            config,
            layout: OutputLayout::new(config),
            writer,
            debug: false,
        }
    }

    /// Root the output tree under `base` instead of the working directory
    pub fn base_dir(mut self, base: &Path) -> Self {
        self.layout = OutputLayout::under(base, self.config);
        self
    }

    /// Emit DEBUG diagnostics on stderr
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Output tree this loop writes
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Run the write phase to completion
    ///
    /// Returns the frozen statistics. The first error aborts the run; no
    /// partial statistics are returned.
    pub fn run(&mut self) -> Result<RunningStats> {
        let config = self.config;

        let mut source = PayloadSource::new(config.dedup_mode, config.seed, config.file_bytes as u64)
            .context("Invalid payload configuration")?;

        let mkdir_start = Timestamp::now();
        self.layout.create_tree()
            .with_context(|| format!("Failed to create output tree under {}", self.layout.root().display()))?;
        if self.debug {
            eprintln!(
                "DEBUG: Created {} directories under {} in {}",
                config.dir_count,
                self.layout.root().display(),
                format_duration(mkdir_start.elapsed())
            );
        }

        let mut stats = RunningStats::with_capacity(config.total_files() as usize);

        let wall_start = Timestamp::now();
        let cpu_start = CpuStamp::now();

        for dir in 0..config.dir_count {
            source.begin_directory();
            let dir_start = Timestamp::now();

            for file in 0..config.files_per_dir {
                let path = self.layout.file_path(dir, file);
                let payload = source.payload_for_file();

                // Timed region
                let t0 = Timestamp::now();
                let cpu0 = CpuStamp::now();
                self.writer.write_file(&path, payload)?;
                let cpu1 = CpuStamp::now();
                let t1 = Timestamp::now();

                stats.record(t1.secs_since(t0), payload.len() as u64);
                if let Some(cpu) = cpu1.since(cpu0) {
                    stats.add_process_io_time(cpu.as_secs_f64());
                }
            }

            if self.debug {
                eprintln!(
                    "DEBUG: Directory {} done: {} files in {}",
                    dir,
                    config.files_per_dir,
                    format_duration(dir_start.elapsed())
                );
            }
        }

        stats.freeze(PhaseTimes {
            wall: wall_start.elapsed(),
            process: CpuStamp::now().since(cpu_start),
        });

        if self.debug {
            eprintln!(
                "DEBUG: Wrote {} files ({} bytes)",
                stats.files_written(),
                stats.bytes_written()
            );
        }

        Ok(stats)
    }
}
