//! Failure kinds of a shift run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Classifies why a file could not be shifted.
/// These travel inside `anyhow::Error` and can be recovered with `downcast_ref`.
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resolved output would replace the input file.
    #[error("output path for {} would overwrite the input", .0.display())]
    OutputIsInput(PathBuf),

    /// The input name is not valid Unicode, so `.srt` cannot be located in it.
    #[error("cannot derive an output name from {}; pass an explicit output path", .0.display())]
    NonUnicodePath(PathBuf),

    #[error("offset {0} is not a usable number of seconds")]
    InvalidOffset(f64),
}
