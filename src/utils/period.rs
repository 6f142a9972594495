//! `--period` / `--range` grammar shared by listings and exports.
//!
//! Accepts:
//! - `YYYY`
//! - `YYYY-MM`
//! - `YYYY-MM-DD`
//! - `A:B` where A and B use the same one of the formats above

use crate::errors::{AppError, AppResult};
use crate::utils::date::YearMonth;
use chrono::NaiveDate;

fn invalid(what: &str, raw: &str) -> AppError {
    AppError::InvalidDate(format!("{raw} ({what})"))
}

/// Bounds (inclusive) of a single period token.
fn bounds_of(token: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match token.len() {
        4 => {
            let y: i32 = token.parse().map_err(|_| invalid("invalid year", token))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", token))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", token))?;
            Ok((d1, d2))
        }
        7 => {
            let ym = YearMonth::parse(token)?;
            Ok((ym.first_day(), ym.last_day()))
        }
        10 => {
            let d = NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .map_err(|_| invalid("invalid date", token))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported period format", token)),
    }
}

/// Parse a period expression into inclusive date bounds.
pub fn parse_period(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid("start and end must have same format", r));
        }

        let (d1, _) = bounds_of(start)?;
        let (_, d2) = bounds_of(end)?;

        if d1 > d2 {
            return Err(invalid("start is after end", r));
        }
        return Ok((d1, d2));
    }

    bounds_of(r)
}

/// `None` and `"all"` mean no bounds.
pub fn parse_optional_period(r: Option<&String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match r {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => parse_period(v).map(Some),
    }
}
