//! Helpers shared by the per-table query modules.

use crate::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{ErrorCode, Row};

pub(crate) fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn get_date(row: &Row, name: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

pub(crate) fn get_opt_time(row: &Row, name: &str) -> rusqlite::Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(name)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidTime(s.clone()))),
    }
}

pub(crate) fn get_bool(row: &Row, name: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(name)? != 0)
}

pub(crate) fn date_str(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub(crate) fn time_str(t: &Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Turn a UNIQUE violation into `Duplicate(what)`; other errors pass through.
pub(crate) fn map_unique(err: rusqlite::Error, what: &str) -> AppError {
    if is_constraint(&err) && err.to_string().contains("UNIQUE") {
        AppError::Duplicate(what.to_string())
    } else {
        AppError::Db(err)
    }
}

/// Turn a FOREIGN KEY violation into a readable error.
pub(crate) fn map_foreign_key(err: rusqlite::Error, what: &str) -> AppError {
    if is_constraint(&err) && err.to_string().contains("FOREIGN KEY") {
        AppError::InvalidInput(format!("{what} is referenced by other records"))
    } else {
        AppError::Db(err)
    }
}

fn is_constraint(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

/// Collect `query_map` rows, stopping at the first error.
pub(crate) fn collect_rows<T, I>(rows: I) -> rusqlite::Result<Vec<T>>
where
    I: Iterator<Item = rusqlite::Result<T>>,
{
    rows.collect()
}
