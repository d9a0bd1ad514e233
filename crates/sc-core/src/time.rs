//! Time-of-day helpers.
//!
//! Plan times are `f64` seconds since local midnight.  Values above 86 400 are
//! legal: a workday that starts at 21:00 and lasts 8 h ends at `29:00:00`, and
//! both the parser and the formatter keep hours unbounded rather than wrapping
//! into a second day.

use crate::{ScError, ScResult};

pub const SECONDS_IN_HOUR: f64 = 3_600.0;

/// Convert fractional hours to seconds.
#[inline]
pub fn hours_to_secs(hours: f64) -> f64 {
    hours * SECONDS_IN_HOUR
}

/// Parse `"HH:MM:SS"` or `"HH:MM"` into seconds since midnight.
///
/// Surrounding whitespace is ignored.  Any other shape, or a component that is
/// not a non-negative integer, is a [`ScError::Parse`].
pub fn parse_time_of_day(s: &str) -> ScResult<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    let (hh, mm, ss) = match parts.as_slice() {
        [h, m, sec] => (field(h, s)?, field(m, s)?, field(sec, s)?),
        [h, m]      => (field(h, s)?, field(m, s)?, 0),
        _ => {
            return Err(ScError::Parse(format!(
                "invalid time {s:?}: expected HH:MM:SS or HH:MM"
            )));
        }
    };
    Ok(f64::from(hh) * SECONDS_IN_HOUR + f64::from(mm) * 60.0 + f64::from(ss))
}

/// Format seconds since midnight as `"HH:MM:SS"`, truncating fractions.
///
/// Hours are not wrapped at 24.  Negative input formats as `00:00:00`.
pub fn format_time_of_day(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let ss = total % 60;
    let mm = (total / 60) % 60;
    let hh = total / 3_600;
    format!("{hh:02}:{mm:02}:{ss:02}")
}

fn field(part: &str, whole: &str) -> ScResult<u32> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| ScError::Parse(format!("invalid time {whole:?}: bad component {part:?}")))
}
