//! Flight-hours aggregation over logbook legs.

use super::hours::round2;
use crate::models::logbook_entry::LogbookEntry;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightTotals {
    pub legs: usize,
    pub flight_hours: f64,
    pub day_hours: f64,
    pub night_hours: f64,
    pub ifr_hours: f64,
    pub landings: i64,
    pub fuel_added: f64,
    pub cell_hours: f64,
    pub daily_rate_legs: usize,
}

impl FlightTotals {
    pub fn add(&mut self, e: &LogbookEntry) {
        self.legs += 1;
        self.flight_hours = round2(self.flight_hours + e.flight_hours);
        self.day_hours = round2(self.day_hours + e.day_hours);
        self.night_hours = round2(self.night_hours + e.night_hours);
        self.ifr_hours = round2(self.ifr_hours + e.ifr_hours);
        self.landings += i64::from(e.landings);
        self.fuel_added = round2(self.fuel_added + e.fuel_added);
        self.cell_hours = round2(self.cell_hours + e.cell_delta);
        if e.daily_rate {
            self.daily_rate_legs += 1;
        }
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LogbookEntry>,
    {
        let mut t = Self::default();
        for e in entries {
            t.add(e);
        }
        t
    }
}

/// Group legs by a key (client, pilot, ...). Legs without a key are skipped.
pub fn totals_by<K, F>(entries: &[LogbookEntry], key: F) -> BTreeMap<K, FlightTotals>
where
    K: Ord,
    F: Fn(&LogbookEntry) -> Option<K>,
{
    let mut out: BTreeMap<K, FlightTotals> = BTreeMap::new();
    for e in entries {
        if let Some(k) = key(e) {
            out.entry(k).or_default().add(e);
        }
    }
    out
}

/// Fuel burned on each leg: previous leg's remaining fuel plus fuel added,
/// minus what is left after landing. The first leg has no reference point.
pub fn fuel_used(entries: &[LogbookEntry]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(entries.len());
    let mut previous_remaining: Option<f64> = None;

    for e in entries {
        let used = previous_remaining
            .map(|prev| round2((prev + e.fuel_added - e.fuel_remaining).max(0.0)));
        out.push(used);
        previous_remaining = Some(e.fuel_remaining);
    }

    out
}
