//! `HH:MM:SS,mmm` timecodes and the offsets applied to them.

use crate::error::ShiftError;
use anyhow::Result;
use std::fmt;
use std::ops::Neg;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1000;

/// Largest offset accepted, roughly 31 000 years.
const MAX_OFFSET_MS: f64 = 1e15;

/// A point on the subtitle timeline with millisecond resolution.
/// The count is signed because an offset may push it below zero before it is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode(i64);

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);

    pub fn from_millis(ms: i64) -> Self {
        Timecode(ms)
    }

    pub fn from_parts(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Timecode(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parse exactly `DD:DD:DD,DDD` where every `D` is an ASCII digit.
    /// Anything else, including surrounding whitespace, yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::parse_bytes(s.as_bytes())
    }

    /// Byte form of [`Timecode::parse`], for text in an unknown encoding.
    pub fn parse_bytes(b: &[u8]) -> Option<Self> {
        if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b',' {
            return None;
        }
        let field = |from: usize, to: usize| -> Option<i64> {
            b[from..to].iter().try_fold(0i64, |acc, &c| {
                c.is_ascii_digit().then(|| acc * 10 + i64::from(c - b'0'))
            })
        };
        Some(Self::from_parts(
            field(0, 2)?,
            field(3, 5)?,
            field(6, 8)?,
            field(9, 12)?,
        ))
    }

    pub fn shift(self, offset: Offset) -> Self {
        Timecode(self.0.saturating_add(offset.as_millis()))
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Pin negative values to `00:00:00,000`.
    pub fn clamped(self) -> Self {
        Timecode(self.0.max(0))
    }
}

impl fmt::Display for Timecode {
    /// Hours widen past two digits rather than wrap. Negative values keep
    /// their magnitude and get a leading `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let h = total / MS_PER_HOUR as u64;
        let m = (total % MS_PER_HOUR as u64) / MS_PER_MINUTE as u64;
        let s = (total % MS_PER_MINUTE as u64) / MS_PER_SECOND as u64;
        let ms = total % MS_PER_SECOND as u64;
        write!(f, "{sign}{h:02}:{m:02}:{s:02},{ms:03}")
    }
}

/// A signed shift in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset(i64);

impl Offset {
    /// Convert fractional seconds, rounding half away from zero to the
    /// nearest millisecond.
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        let ms = (seconds * 1000.0).round();
        if !ms.is_finite() || ms.abs() > MAX_OFFSET_MS {
            return Err(ShiftError::InvalidOffset(seconds).into());
        }
        Ok(Offset(ms as i64))
    }

    pub fn from_millis(ms: i64) -> Self {
        Offset(ms)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset(self.0.saturating_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_into_milliseconds() {
        let tc = Timecode::parse("01:02:03,456").unwrap();
        assert_eq!(tc.as_millis(), 3_600_000 + 2 * 60_000 + 3 * 1000 + 456);
    }

    #[test]
    fn rejects_anything_but_the_exact_shape() {
        for bad in [
            "1:02:03,456",
            "01:02:03.456",
            "01:02:03,45",
            " 01:02:03,456",
            "01:02:03,456 ",
            "aa:02:03,456",
            "01:02:03,4567",
            "",
        ] {
            assert_eq!(Timecode::parse(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(Timecode::from_millis(4_500).to_string(), "00:00:04,500");
        assert_eq!(Timecode::from_parts(10, 5, 9, 7).to_string(), "10:05:09,007");
    }

    #[test]
    fn format_reproduces_parsed_input() {
        for s in ["00:00:00,000", "00:59:59,999", "12:34:56,789", "99:00:00,001"] {
            assert_eq!(Timecode::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn hours_widen_instead_of_wrapping() {
        let tc = Timecode::parse("99:59:59,999").unwrap().shift(Offset::from_millis(1));
        assert_eq!(tc.to_string(), "100:00:00,000");
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let tc = Timecode::parse("00:00:02,000")
            .unwrap()
            .shift(Offset::from_seconds(-5.5).unwrap());
        assert!(tc.is_negative());
        assert_eq!(tc.as_millis(), -3_500);
        assert_eq!(tc.clamped(), Timecode::ZERO);
        assert_eq!(tc.clamped().to_string(), "00:00:00,000");
    }

    #[test]
    fn unclamped_negative_display_keeps_magnitude() {
        assert_eq!(Timecode::from_millis(-3_500).to_string(), "-00:00:03,500");
    }

    #[test]
    fn offset_rounds_to_nearest_millisecond() {
        assert_eq!(Offset::from_seconds(-5.5).unwrap().as_millis(), -5_500);
        assert_eq!(Offset::from_seconds(1.2344).unwrap().as_millis(), 1_234);
        assert_eq!(Offset::from_seconds(0.0006).unwrap().as_millis(), 1);
        assert_eq!(Offset::from_seconds(-0.0006).unwrap().as_millis(), -1);
        assert!(Offset::from_seconds(0.0).unwrap().is_zero());
    }

    #[test]
    fn offset_rejects_non_finite_values() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            let err = Offset::from_seconds(bad).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ShiftError>(),
                Some(ShiftError::InvalidOffset(_))
            ));
        }
    }

    #[test]
    fn negated_offset_undoes_the_shift() {
        for raw in ["00:10:00,250", "00:59:59,999", "23:00:00,000"] {
            let tc = Timecode::parse(raw).unwrap();
            for seconds in [42.125, 0.0005, -0.0005, 0.0004, -0.0015, -599.9995] {
                let offset = Offset::from_seconds(seconds).unwrap();
                assert_eq!(tc.shift(offset).shift(-offset), tc, "{raw} by {seconds}");
                assert_eq!(
                    Offset::from_seconds(-seconds).unwrap(),
                    -offset,
                    "rounding of {seconds} is symmetric"
                );
            }
        }
    }

    #[test]
    fn parses_bytes_and_rejects_non_ascii() {
        assert_eq!(
            Timecode::parse_bytes(b"00:00:01,500"),
            Some(Timecode::from_millis(1_500))
        );
        assert_eq!(Timecode::parse_bytes(b"00:00:01,5\xe90"), None);
    }
}
