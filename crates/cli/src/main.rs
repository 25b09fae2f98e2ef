//! Binary entry point for the subtitle shifter.

use anyhow::Result;
use clap::Parser;
use srtshift_core::shift::{self, ShiftOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Shift every timestamp in an SRT file by a fixed number of seconds.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Enable verbose debug and trace logs.
    #[arg(long)]
    debug: bool,

    /// Print a JSON summary of the run on stdout.
    #[arg(long)]
    json: bool,

    /// Write here instead of `<input>_modified.srt`.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Path to the SRT file we want to shift.
    input: PathBuf,

    /// Seconds to add to every timestamp; negative values make cues earlier.
    #[arg(allow_negative_numbers = true)]
    offset: f64,
}

/// Application entry point which parses CLI args and performs the shift.
/// Failures are already logged by the library, so they only change the exit code.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::default()
            .add_directive("srtshift=trace".parse()?)
            .add_directive("srtshift_core=trace".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::default()
            .add_directive("srtshift=info".parse()?)
            .add_directive("srtshift_core=info".parse()?)
            .add_directive("warn".parse()?)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut options = ShiftOptions::new(cli.offset);
    if let Some(output) = cli.output {
        options = options.with_output(output);
    }
    let Some(report) = shift::run(&cli.input, &options) else {
        return Ok(ExitCode::FAILURE);
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(ExitCode::SUCCESS)
}
