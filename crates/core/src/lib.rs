//! Shift every cue timing in an SRT file by a fixed offset.

pub mod error;
pub mod shift;
pub mod srt;

pub use error::ShiftError;
