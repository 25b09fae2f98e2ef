//! This module is responsible for rewriting SRT cue timing lines.
//! Only the `start --> end` pair is touched; every other byte passes through,
//! whatever encoding the surrounding text is in.

pub mod timecode;

pub use timecode::{Offset, Timecode};

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use tracing::warn;

/// Two timecodes joined by ` --> `, anywhere in a line.
static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})")
        .expect("cue timing pattern compiles")
});

/// Result of running a single line through the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftedLine {
    pub text: Vec<u8>,
    /// True when the line carried a cue timing pair.
    pub timing: bool,
    /// Timecodes on this line that fell below zero and were clamped.
    pub clamped: usize,
}

/// Shifted document bytes plus what happened along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shifted {
    pub text: Vec<u8>,
    pub lines: usize,
    pub shifted: usize,
    pub clamped: usize,
}

/// Shift the first cue timing pair found in `line` by `offset`.
/// Lines without a pair come back unchanged.
pub fn shift_line(line: &[u8], offset: Offset) -> ShiftedLine {
    match rewrite(line, offset) {
        Some((text, clamped)) => ShiftedLine {
            text,
            timing: true,
            clamped,
        },
        None => ShiftedLine {
            text: line.to_vec(),
            timing: false,
            clamped: 0,
        },
    }
}

fn rewrite(line: &[u8], offset: Offset) -> Option<(Vec<u8>, usize)> {
    let caps = CUE_TIMING.captures(line)?;
    let whole = caps.get(0)?;
    let mut clamped = 0;
    let mut move_one = |raw: &[u8]| -> Option<Timecode> {
        let original = Timecode::parse_bytes(raw)?;
        let moved = original.shift(offset);
        if moved.is_negative() {
            warn!("{original} shifted to {moved}, clamping to {}", Timecode::ZERO);
            clamped += 1;
        }
        Some(moved.clamped())
    };
    let start = move_one(caps.get(1)?.as_bytes())?;
    let end = move_one(caps.get(2)?.as_bytes())?;
    let timing = format!("{start} --> {end}");
    let mut text = Vec::with_capacity(line.len() + timing.len());
    text.extend_from_slice(&line[..whole.start()]);
    text.extend_from_slice(timing.as_bytes());
    text.extend_from_slice(&line[whole.end()..]);
    Some((text, clamped))
}

/// Shift every cue timing line of a document.
/// The way this works is by splitting on `\n` and writing each line back with
/// a `\n` after it, the last one included, so a trailing newline in the input
/// turns into an extra empty line.
pub fn shift_text(input: &[u8], offset: Offset) -> Shifted {
    let mut out = Shifted {
        text: Vec::with_capacity(input.len() + 1),
        ..Shifted::default()
    };
    for line in input.split(|&b| b == b'\n') {
        let shifted = shift_line(line, offset);
        out.lines += 1;
        if shifted.timing {
            out.shifted += 1;
        }
        out.clamped += shifted.clamped;
        out.text.extend_from_slice(&shifted.text);
        out.text.push(b'\n');
    }
    out
}
