// src/export/model.rs

use crate::core::calculator::hours::format_decimal_hours_to_hhmm;
use crate::core::calculator::totals::fuel_used;
use crate::models::logbook_entry::LogbookEntry;
use crate::utils::time::format_time;
use serde::Serialize;
use std::collections::HashMap;

/// Flat row for logbook exports. Durations are `HH:MM`, quantities decimal.
#[derive(Serialize, Clone, Debug)]
pub struct LegExport {
    pub id: i64,
    pub registration: String,
    pub date: String,
    pub departure: String,
    pub arrival: String,
    pub dep: String,
    pub pou: String,
    pub flight: String,
    pub day: String,
    pub night: String,
    pub ifr: String,
    pub landings: i32,
    pub fuel_added: f64,
    pub fuel_remaining: f64,
    pub fuel_used: Option<f64>,
    pub cell_delta: f64,
    pub pic: String,
    pub sic: String,
    pub client: String,
    pub daily_rate: bool,
    pub confirmed: bool,
}

/// Build export rows. `entries` must be ordered by aircraft, then date,
/// so fuel burn is computed within each aircraft's sequence.
pub(crate) fn legs_to_export(
    entries: &[LogbookEntry],
    registrations: &HashMap<i64, String>,
    client_names: &HashMap<i64, String>,
) -> Vec<LegExport> {
    let mut out = Vec::with_capacity(entries.len());

    for chunk in entries.chunk_by(|a, b| a.aircraft_id == b.aircraft_id) {
        for (e, used) in chunk.iter().zip(fuel_used(chunk)) {
            out.push(LegExport {
                id: e.id,
                registration: registrations.get(&e.aircraft_id).cloned().unwrap_or_default(),
                date: e.date.format("%Y-%m-%d").to_string(),
                departure: e.departure.clone(),
                arrival: e.arrival.clone(),
                dep: format_time(e.time_dep),
                pou: format_time(e.time_pou),
                flight: format_decimal_hours_to_hhmm(e.flight_hours),
                day: format_decimal_hours_to_hhmm(e.day_hours),
                night: format_decimal_hours_to_hhmm(e.night_hours),
                ifr: format_decimal_hours_to_hhmm(e.ifr_hours),
                landings: e.landings,
                fuel_added: e.fuel_added,
                fuel_remaining: e.fuel_remaining,
                fuel_used: used,
                cell_delta: e.cell_delta,
                pic: e.pic_canac.clone().unwrap_or_default(),
                sic: e.sic_canac.clone().unwrap_or_default(),
                client: e
                    .client_id
                    .and_then(|id| client_names.get(&id).cloned())
                    .unwrap_or_default(),
                daily_rate: e.daily_rate,
                confirmed: e.confirmed,
            });
        }
    }

    out
}
