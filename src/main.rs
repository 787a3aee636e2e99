//! dirpulse CLI entry point

use anyhow::{Context, Result};
use chrono::Local;
use dirpulse::config::{cli::Cli, cli_convert, validator, Config};
use dirpulse::output::json::{write_json_output, JsonRunOutput};
use dirpulse::output::plot::AsciiBarChart;
use dirpulse::output::text;
use dirpulse::util::host::HostInfo;
use dirpulse::util::time::{format_duration, Timestamp};
use dirpulse::WriteLoop;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let config = cli_convert::build_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;

    run(&config)
}

fn run(config: &Config) -> Result<()> {
    let debug = config.runtime.debug;
    let workload = &config.workload;

    let start = Local::now();
    let host = HostInfo::collect();
    for line in text::render_setup(workload, &host, start) {
        println!("{}", line);
    }

    if config.runtime.dry_run {
        println!("{}Dry run mode - configuration validated successfully", text::rank_prefix(&workload.rank));
        return Ok(());
    }

    let run_start = Timestamp::now();
    let stats = WriteLoop::new(workload).debug(debug).run()?;
    if debug {
        eprintln!("DEBUG: Write phase returned after {}", format_duration(run_start.elapsed()));
    }

    let derived = stats
        .finalize()
        .context("Cannot derive statistics from this run")?;
    if derived.zero_time_files > 0 {
        eprintln!(
            "Warning: {} of {} writes completed below clock resolution and are left out of per-file throughput",
            derived.zero_time_files, derived.files_written
        );
    }

    let report = text::render_report(workload, &derived, config.output.histogram_bins);
    for line in report.render_with(&AsciiBarChart::default()) {
        println!("{}", line);
    }

    let end = Local::now();

    if let Some(ref path) = config.output.json_output {
        let output = JsonRunOutput::new(
            &host.hostname,
            start,
            end,
            workload,
            &derived,
            report.histogram.as_ref(),
        );
        write_json_output(path, &output, true)
            .with_context(|| format!("Failed to write JSON output to {}", path.display()))?;
        if debug {
            eprintln!("DEBUG: JSON output written to {}", path.display());
        }
    }

    println!("{}", text::render_end(&workload.rank, end));
    Ok(())
}
