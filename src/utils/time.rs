//! Clock-time utilities: parsing HH:MM timestamps and leg durations.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Minutes from `start` to `end`, wrapping past midnight
/// (a 23:40 takeoff landing at 00:25 is a 45 minute leg).
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let m = (end - start).num_minutes();
    if m < 0 { m + 24 * 60 } else { m }
}

pub fn format_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    match input {
        Some(s) if !s.trim().is_empty() => {
            let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
            Ok(Some(t))
        }
        _ => Ok(None),
    }
}
