//! Birthday next-occurrence scheduling for crew members and clients.

use crate::db::pool::DbPool;
use crate::db::{clients, crew};
use crate::errors::AppResult;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

/// A stored birth date: day and month always, year when the record has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub day: u32,
    pub month: u32,
    pub year: Option<i32>,
}

/// Accepts `yyyy-MM-dd` (optionally followed by a time part),
/// `dd/MM/yyyy` and `dd/MM`.
pub fn parse_birth_date(s: &str) -> Option<BirthDate> {
    let s = s.trim();

    if let Some(head) = s.get(..10)
        && let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d")
    {
        return Some(BirthDate {
            day: d.day(),
            month: d.month(),
            year: Some(d.year()),
        });
    }

    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
        [d, m, y] => {
            let date = NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)?;
            Some(BirthDate {
                day: date.day(),
                month: date.month(),
                year: Some(date.year()),
            })
        }
        [d, m] => {
            let (day, month): (u32, u32) = (d.parse().ok()?, m.parse().ok()?);
            // 2000 is a leap year, so 29/02 is accepted
            NaiveDate::from_ymd_opt(2000, month, day)?;
            Some(BirthDate {
                day,
                month,
                year: None,
            })
        }
        _ => None,
    }
}

/// The birthday as it falls in `year`; 29/02 becomes 28/02 in common years.
pub fn occurrence_in(b: &BirthDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, b.month, b.day).or_else(|| {
        if b.month == 2 && b.day == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// This year's occurrence, or next year's when it has already passed.
/// A birthday falling on `today` is today.
pub fn next_occurrence(b: &BirthDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = occurrence_in(b, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        occurrence_in(b, today.year() + 1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Birthday {
    pub name: String,
    pub kind: &'static str,
    pub raw: String,
    pub month: Option<u32>,
    pub next: Option<NaiveDate>,
    /// Age reached on `next`, when the birth year is known.
    pub turning: Option<i32>,
}

impl Birthday {
    pub fn build(name: &str, kind: &'static str, raw: &str, today: NaiveDate) -> Self {
        let parsed = parse_birth_date(raw);
        let next = parsed.as_ref().and_then(|b| next_occurrence(b, today));
        let turning = match (parsed.and_then(|b| b.year), next) {
            (Some(y), Some(n)) => Some(n.year() - y),
            _ => None,
        };

        Self {
            name: name.to_string(),
            kind,
            raw: raw.to_string(),
            month: parsed.map(|b| b.month),
            next,
            turning,
        }
    }

    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.next.map(|n| (n - today).num_days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayFilter {
    All,
    /// Birthday month equals the current month.
    ThisMonth,
    /// Next occurrence within `[today, today + n]`.
    NextDays(i64),
}

impl BirthdayFilter {
    pub fn matches(&self, b: &Birthday, today: NaiveDate) -> bool {
        match self {
            BirthdayFilter::All => true,
            BirthdayFilter::ThisMonth => b.month == Some(today.month()),
            BirthdayFilter::NextDays(n) => b
                .days_until(today)
                .map(|d| (0..=*n).contains(&d))
                .unwrap_or(false),
        }
    }
}

/// Chronological by next occurrence (stable, so equal dates keep their
/// input order). Entries without a usable date go last, sorted by name.
pub fn sort_birthdays(items: &mut [Birthday]) {
    items.sort_by(|a, b| match (a.next, b.next) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

pub struct BirthdaysLogic;

impl BirthdaysLogic {
    /// Crew members and clients with a stored birth date, filtered and sorted.
    pub fn list(
        pool: &mut DbPool,
        filter: BirthdayFilter,
        today: NaiveDate,
    ) -> AppResult<Vec<Birthday>> {
        let mut out = Vec::new();

        for c in crew::list_crew(&pool.conn)? {
            if let Some(raw) = &c.birth_date {
                out.push(Birthday::build(&c.name, "crew", raw, today));
            }
        }

        for c in clients::list_clients(&pool.conn)? {
            if let Some(raw) = &c.birth_date {
                out.push(Birthday::build(&c.name, "client", raw, today));
            }
        }

        out.retain(|b| filter.matches(b, today));
        sort_birthdays(&mut out);
        Ok(out)
    }
}
