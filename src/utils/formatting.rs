//! Formatting utilities used for CLI and export outputs.

use crate::errors::{AppError, AppResult};
use unicode_width::UnicodeWidthStr;

/// Group thousands with `.` ("1234567" → "1.234.567").
fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Brazilian currency: 123456 cents → "R$ 1.234,56".
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{sign}R$ {},{:02}", group_thousands(abs / 100), abs % 100)
}

/// Parse an amount typed as "1234,56", "1.234,56", "1234.56" or "1234" into cents.
pub fn parse_amount_cents(s: &str) -> AppResult<i64> {
    let raw = s.trim().trim_start_matches("R$").trim();
    let err = || AppError::InvalidAmount(s.to_string());

    // A comma is always the decimal separator; dots are then thousands separators.
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };

    let (int_part, frac_part) = match normalized.split_once('.') {
        Some((i, f)) => (i, f),
        None => (normalized.as_str(), ""),
    };

    // digits only: `parse` alone would take "-0" or "+5"
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || frac_part.len() > 2 || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err(err());
    }

    let units: i64 = int_part.parse().map_err(|_| err())?;
    let cents: i64 = if frac_part.is_empty() {
        0
    } else {
        let f: i64 = frac_part.parse().map_err(|_| err())?;
        if frac_part.len() == 1 { f * 10 } else { f }
    };

    units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(err)
}

/// Left-align by display width (accented names stay aligned).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

/// Two decimals, used for cell-hour and fuel figures.
pub fn fixed2(v: f64) -> String {
    format!("{:.2}", v)
}
