//! Conversions between "HH:MM" flight times and decimal hours.

use crate::errors::{AppError, AppResult};

/// Split `H:MM` into whole hours and minutes (minutes < 60).
fn split_hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    let hours: u32 = h.trim().parse().ok()?;
    let minutes: u32 = m.trim().parse().ok()?;
    if m.trim().len() != 2 || minutes >= 60 {
        return None;
    }
    Some((hours, minutes))
}

/// Lenient conversion used for stored and displayed values:
/// `"01:30"` → `1.5`; empty or malformed input → `0.0`.
pub fn parse_hhmm_to_decimal(s: &str) -> f64 {
    match split_hhmm(s) {
        Some((h, m)) => f64::from(h) + f64::from(m) / 60.0,
        None => 0.0,
    }
}

/// Inverse of [`parse_hhmm_to_decimal`]; minutes are rounded to the nearest integer.
/// Negative and non-finite values render as `00:00`.
pub fn format_decimal_hours_to_hhmm(d: f64) -> String {
    if !d.is_finite() || d <= 0.0 {
        return "00:00".to_string();
    }
    let total = (d * 60.0).round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Strict variant for user input: accepts `H:MM`, or a decimal such as
/// `1.5` / `1,5`. Anything else is rejected instead of silently becoming 0.
pub fn parse_hours_strict(s: &str) -> AppResult<f64> {
    let raw = s.trim();

    if raw.contains(':') {
        return split_hhmm(raw)
            .map(|(h, m)| f64::from(h) + f64::from(m) / 60.0)
            .ok_or_else(|| AppError::InvalidTime(s.to_string()));
    }

    let v: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::InvalidTime(s.to_string()))?;

    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(AppError::InvalidTime(s.to_string()))
    }
}

/// Optional CLI argument through [`parse_hours_strict`]. Empty means "not given".
pub fn parse_optional_hours(input: Option<&String>) -> AppResult<Option<f64>> {
    match input {
        Some(s) if !s.trim().is_empty() => parse_hours_strict(s).map(Some),
        _ => Ok(None),
    }
}

/// Round to 2 decimals; cell and fuel figures are kept at this precision.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
