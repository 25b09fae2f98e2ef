//! File driver: read an SRT file, shift its cues and write the result.
//! This module wires the line rewriter to the filesystem.

mod output;

pub use output::output_path;

use crate::error::ShiftError;
use crate::srt::{self, Offset};
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

/// Parameters for one shift run, supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftOptions {
    /// Seconds added to every timecode. Negative moves cues earlier.
    pub offset_seconds: f64,
    /// Explicit destination; when absent it is derived from the input path.
    pub output: Option<PathBuf>,
}

impl ShiftOptions {
    pub fn new(offset_seconds: f64) -> Self {
        Self {
            offset_seconds,
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Summary of a finished shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub offset_ms: i64,
    /// Lines written, including the one created by the trailing newline.
    pub lines: usize,
    /// Timing lines that were rewritten.
    pub shifted: usize,
    /// Timecodes that fell below zero and were pinned to zero.
    pub clamped: usize,
}

/// Shift every cue in `input` and write the result to a new file.
/// The destination is resolved before anything is read so that a run which
/// would overwrite its own input stops without touching the disk.
pub fn shift_file(input: &Path, options: &ShiftOptions) -> Result<ShiftReport> {
    trace!(
        "shift_file(input={}, offset_seconds={})",
        input.display(),
        options.offset_seconds
    );
    let offset = Offset::from_seconds(options.offset_seconds)?;
    let out_path = match &options.output {
        Some(path) if output::same_file(path, input) => {
            return Err(ShiftError::OutputIsInput(input.to_path_buf()).into());
        }
        Some(path) => path.clone(),
        None => output_path(input)?,
    };

    let content = fs::read(input).map_err(|source| ShiftError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let shifted = srt::shift_text(&content, offset);
    debug!(
        "{}: {} lines, {} timing lines shifted by {} ms, {} timecodes clamped",
        input.display(),
        shifted.lines,
        shifted.shifted,
        offset.as_millis(),
        shifted.clamped
    );
    if shifted.shifted == 0 {
        info!("no cue timing lines found in {}", input.display());
    }

    output::write_whole(&out_path, &shifted.text).map_err(|source| ShiftError::Write {
        path: out_path.clone(),
        source,
    })?;
    Ok(ShiftReport {
        input: input.to_path_buf(),
        output: out_path,
        offset_ms: offset.as_millis(),
        lines: shifted.lines,
        shifted: shifted.shifted,
        clamped: shifted.clamped,
    })
}

/// Run [`shift_file`] and report the outcome through the log instead of
/// returning an error. Success names the output path; failure names the cause.
pub fn run(input: &Path, options: &ShiftOptions) -> Option<ShiftReport> {
    match shift_file(input, options) {
        Ok(report) => {
            info!(
                "shifted SRT file has been saved to {}",
                report.output.display()
            );
            Some(report)
        }
        Err(err) => {
            error!("{err:#}");
            None
        }
    }
}
