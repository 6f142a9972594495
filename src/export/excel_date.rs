// src/export/excel_date.rs

use crate::core::calculator::hours::parse_hhmm_to_decimal;
use chrono::{NaiveDate, NaiveTime, Timelike};

pub(crate) const DATE_FORMAT: &str = "dd/mm/yyyy";
pub(crate) const CLOCK_FORMAT: &str = "hh:mm";
/// Elapsed hours; `[h]` keeps counting past 24.
pub(crate) const DURATION_FORMAT: &str = "[h]:mm";

/// `YYYY-MM-DD` as an Excel day serial (1900 date system).
pub(crate) fn date_serial(s: &str) -> Option<f64> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - excel_epoch).num_days() as f64)
}

/// `HH:MM` wall-clock time as a fraction of a day.
pub(crate) fn clock_fraction(s: &str) -> Option<f64> {
    let t = NaiveTime::parse_from_str(s, "%H:%M").ok()?;
    Some(t.num_seconds_from_midnight() as f64 / 86400.0)
}

/// `H:MM` flight duration (may exceed 24 h) as a fraction of a day.
pub(crate) fn duration_fraction(s: &str) -> f64 {
    parse_hhmm_to_decimal(s) / 24.0
}
