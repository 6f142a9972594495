//! Calendar helpers: today, ISO parsing, year-month periods, Portuguese month names.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Optional `--date`/`--today` argument, falling back to the local date.
pub fn date_or_today(s: Option<&String>) -> AppResult<NaiveDate> {
    match s {
        Some(v) => parse_date_arg(v),
        None => Ok(today()),
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}

/// "15 de setembro de 2025"
pub fn long_date(d: NaiveDate) -> String {
    format!("{} de {} de {}", d.day(), month_name(d.month()), d.year())
}

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn of(d: NaiveDate) -> Self {
        Self(d.with_day(1).unwrap_or(d))
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| AppError::InvalidDate(format!("{s} (expected YYYY-MM)")))?;

        let year: i32 = y
            .parse()
            .map_err(|_| AppError::InvalidDate(format!("{s} (invalid year)")))?;
        let month: u32 = m
            .parse()
            .map_err(|_| AppError::InvalidDate(format!("{s} (invalid month)")))?;

        if y.len() != 4 || m.len() != 2 {
            return Err(AppError::InvalidDate(format!("{s} (expected YYYY-MM)")));
        }

        Self::new(year, month).ok_or_else(|| AppError::InvalidDate(s.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn previous(&self) -> Self {
        Self(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        d.year() == self.year() && d.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
