//! Where the shifted file goes.

use crate::error::ShiftError;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const SRT_MARKER: &str = ".srt";
const MODIFIED_MARKER: &str = "_modified.srt";

/// Derive the output path by replacing the first `.srt` in `input` with
/// `_modified.srt`, so `movie.srt` becomes `movie_modified.srt`.
/// A path without `.srt` would map onto itself and is refused.
pub fn output_path(input: &Path) -> Result<PathBuf> {
    let text = input
        .to_str()
        .ok_or_else(|| ShiftError::NonUnicodePath(input.to_path_buf()))?;
    if !text.contains(SRT_MARKER) {
        return Err(ShiftError::OutputIsInput(input.to_path_buf()).into());
    }
    Ok(PathBuf::from(text.replacen(SRT_MARKER, MODIFIED_MARKER, 1)))
}

/// True when both paths name the same file, either literally or after
/// resolving links and relative components.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write `contents` to `path` in one go.
/// The data lands in a temporary file beside `path` first and is renamed over
/// it afterwards, so a failed write never leaves a truncated output behind.
pub(crate) fn write_whole(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
