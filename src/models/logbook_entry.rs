use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One flight leg as stored in `logbook_entries`.
///
/// Durations are decimal hours; the four clock times follow the Brazilian
/// logbook columns: AC (engine start), DEP (takeoff), POU (landing) and
/// COR (engine cut).
#[derive(Debug, Clone, Serialize)]
pub struct LogbookEntry {
    pub id: i64,
    pub aircraft_id: i64,
    pub date: NaiveDate,
    pub departure: String,
    pub arrival: String,
    pub time_ac: Option<NaiveTime>,
    pub time_dep: Option<NaiveTime>,
    pub time_pou: Option<NaiveTime>,
    pub time_cor: Option<NaiveTime>,
    pub flight_hours: f64,
    pub day_hours: f64,
    pub night_hours: f64,
    pub ifr_hours: f64,
    pub landings: i32,
    pub fuel_added: f64,
    pub fuel_remaining: f64,
    pub cell_delta: f64,
    pub pic_canac: Option<String>,
    pub sic_canac: Option<String>,
    pub daily_rate: bool,
    pub client_id: Option<i64>,
    pub confirmed: bool,
    pub created_at: String,
}

impl LogbookEntry {
    /// Blank leg for an aircraft/date, filled in by the logbook logic before saving.
    pub fn blank(aircraft_id: i64, date: NaiveDate) -> Self {
        Self {
            id: 0,
            aircraft_id,
            date,
            departure: String::new(),
            arrival: String::new(),
            time_ac: None,
            time_dep: None,
            time_pou: None,
            time_cor: None,
            flight_hours: 0.0,
            day_hours: 0.0,
            night_hours: 0.0,
            ifr_hours: 0.0,
            landings: 1,
            fuel_added: 0.0,
            fuel_remaining: 0.0,
            cell_delta: 0.0,
            pic_canac: None,
            sic_canac: None,
            daily_rate: false,
            client_id: None,
            confirmed: false,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
