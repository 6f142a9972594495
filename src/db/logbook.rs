//! `logbook_entries` and `logbook_months` queries.

use crate::db::queries::{
    collect_rows, date_str, get_bool, get_date, get_opt_time, map_foreign_key, time_str,
};
use crate::errors::{AppError, AppResult};
use crate::models::logbook_entry::LogbookEntry;
use crate::models::logbook_month::LogbookMonth;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const ENTRY_COLUMNS: &str = "id, aircraft_id, date, departure, arrival, time_ac, time_dep, time_pou, \
     time_cor, flight_hours, day_hours, night_hours, ifr_hours, landings, fuel_added, \
     fuel_remaining, cell_delta, pic_canac, sic_canac, daily_rate, client_id, confirmed, created_at";

/// Legs of one day are ordered by takeoff time, then by insertion order.
const ENTRY_ORDER: &str = "ORDER BY date ASC, COALESCE(time_dep, time_ac, '') ASC, id ASC";

const MONTH_COLUMNS: &str =
    "id, aircraft_id, year, month, cell_start, cell_end, closed, closed_at, closed_by";

pub fn map_entry(row: &Row) -> rusqlite::Result<LogbookEntry> {
    Ok(LogbookEntry {
        id: row.get("id")?,
        aircraft_id: row.get("aircraft_id")?,
        date: get_date(row, "date")?,
        departure: row.get("departure")?,
        arrival: row.get("arrival")?,
        time_ac: get_opt_time(row, "time_ac")?,
        time_dep: get_opt_time(row, "time_dep")?,
        time_pou: get_opt_time(row, "time_pou")?,
        time_cor: get_opt_time(row, "time_cor")?,
        flight_hours: row.get("flight_hours")?,
        day_hours: row.get("day_hours")?,
        night_hours: row.get("night_hours")?,
        ifr_hours: row.get("ifr_hours")?,
        landings: row.get("landings")?,
        fuel_added: row.get("fuel_added")?,
        fuel_remaining: row.get("fuel_remaining")?,
        cell_delta: row.get("cell_delta")?,
        pic_canac: row.get("pic_canac")?,
        sic_canac: row.get("sic_canac")?,
        daily_rate: get_bool(row, "daily_rate")?,
        client_id: row.get("client_id")?,
        confirmed: get_bool(row, "confirmed")?,
        created_at: row.get("created_at")?,
    })
}

fn map_month(row: &Row) -> rusqlite::Result<LogbookMonth> {
    Ok(LogbookMonth {
        id: row.get("id")?,
        aircraft_id: row.get("aircraft_id")?,
        year: row.get("year")?,
        month: row.get("month")?,
        cell_start: row.get("cell_start")?,
        cell_end: row.get("cell_end")?,
        closed: get_bool(row, "closed")?,
        closed_at: row.get("closed_at")?,
        closed_by: row.get("closed_by")?,
    })
}

fn entry_fk_error(e: rusqlite::Error) -> AppError {
    if e.to_string().contains("FOREIGN KEY") {
        AppError::InvalidInput(
            "leg references an unknown aircraft, aerodrome, crew member or client".to_string(),
        )
    } else {
        AppError::Db(e)
    }
}

// ---------------------------
// Entries
// ---------------------------

pub fn insert_entry(conn: &Connection, e: &LogbookEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO logbook_entries (aircraft_id, date, departure, arrival, time_ac, time_dep,
             time_pou, time_cor, flight_hours, day_hours, night_hours, ifr_hours, landings,
             fuel_added, fuel_remaining, cell_delta, pic_canac, sic_canac, daily_rate, client_id,
             confirmed, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
                 ?19, ?20, ?21, ?22)",
        params![
            e.aircraft_id,
            date_str(&e.date),
            e.departure,
            e.arrival,
            time_str(&e.time_ac),
            time_str(&e.time_dep),
            time_str(&e.time_pou),
            time_str(&e.time_cor),
            e.flight_hours,
            e.day_hours,
            e.night_hours,
            e.ifr_hours,
            e.landings,
            e.fuel_added,
            e.fuel_remaining,
            e.cell_delta,
            e.pic_canac,
            e.sic_canac,
            e.daily_rate,
            e.client_id,
            e.confirmed,
            e.created_at,
        ],
    )
    .map_err(entry_fk_error)?;

    Ok(conn.last_insert_rowid())
}

pub fn update_entry(conn: &Connection, e: &LogbookEntry) -> AppResult<usize> {
    conn.execute(
        "UPDATE logbook_entries SET
             date = ?1, departure = ?2, arrival = ?3, time_ac = ?4, time_dep = ?5, time_pou = ?6,
             time_cor = ?7, flight_hours = ?8, day_hours = ?9, night_hours = ?10, ifr_hours = ?11,
             landings = ?12, fuel_added = ?13, fuel_remaining = ?14, cell_delta = ?15,
             pic_canac = ?16, sic_canac = ?17, daily_rate = ?18, client_id = ?19, confirmed = ?20
         WHERE id = ?21",
        params![
            date_str(&e.date),
            e.departure,
            e.arrival,
            time_str(&e.time_ac),
            time_str(&e.time_dep),
            time_str(&e.time_pou),
            time_str(&e.time_cor),
            e.flight_hours,
            e.day_hours,
            e.night_hours,
            e.ifr_hours,
            e.landings,
            e.fuel_added,
            e.fuel_remaining,
            e.cell_delta,
            e.pic_canac,
            e.sic_canac,
            e.daily_rate,
            e.client_id,
            e.confirmed,
            e.id,
        ],
    )
    .map_err(entry_fk_error)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM logbook_entries WHERE id = ?1", [id])
        .map_err(|e| map_foreign_key(e, "Logbook entry"))
}

pub fn get_entry(conn: &Connection, id: i64) -> AppResult<Option<LogbookEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM logbook_entries WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_entry).optional()?)
}

/// Legs of one aircraft between two dates (inclusive).
pub fn load_entries(
    conn: &Connection,
    aircraft_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<LogbookEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM logbook_entries
         WHERE aircraft_id = ?1 AND date BETWEEN ?2 AND ?3
         {ENTRY_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![aircraft_id, date_str(&from), date_str(&to)], map_entry)?;
    Ok(collect_rows(rows)?)
}

/// Legs of every aircraft, optionally bounded, for exports.
pub fn load_all_entries(
    conn: &Connection,
    aircraft_id: Option<i64>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<LogbookEntry>> {
    let (from, to) = bounds
        .map(|(a, b)| (date_str(&a), date_str(&b)))
        .unwrap_or_else(|| ("0000-01-01".to_string(), "9999-12-31".to_string()));

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM logbook_entries
         WHERE (?1 IS NULL OR aircraft_id = ?1) AND date BETWEEN ?2 AND ?3
         ORDER BY aircraft_id ASC, date ASC, COALESCE(time_dep, time_ac, '') ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![aircraft_id, from, to], map_entry)?;
    Ok(collect_rows(rows)?)
}

/// Legs flown by a crew member (as PIC or SIC).
pub fn load_entries_by_canac(
    conn: &Connection,
    canac: &str,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<LogbookEntry>> {
    let (from, to) = bounds
        .map(|(a, b)| (date_str(&a), date_str(&b)))
        .unwrap_or_else(|| ("0000-01-01".to_string(), "9999-12-31".to_string()));

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM logbook_entries
         WHERE (pic_canac = ?1 OR sic_canac = ?1) AND date BETWEEN ?2 AND ?3
         {ENTRY_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![canac, from, to], map_entry)?;
    Ok(collect_rows(rows)?)
}

/// Sum of cell deltas of an aircraft strictly before `date`.
pub fn cell_hours_before(conn: &Connection, aircraft_id: i64, date: NaiveDate) -> AppResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(cell_delta), 0) FROM logbook_entries
         WHERE aircraft_id = ?1 AND date < ?2",
        params![aircraft_id, date_str(&date)],
        |row| row.get(0),
    )?;
    Ok(total)
}

// ---------------------------
// Months
// ---------------------------

pub fn find_month(
    conn: &Connection,
    aircraft_id: i64,
    year: i32,
    month: u32,
) -> AppResult<Option<LogbookMonth>> {
    let sql = format!(
        "SELECT {MONTH_COLUMNS} FROM logbook_months
         WHERE aircraft_id = ?1 AND year = ?2 AND month = ?3"
    );
    Ok(conn
        .query_row(&sql, params![aircraft_id, year, month], map_month)
        .optional()?)
}

pub fn insert_month(
    conn: &Connection,
    aircraft_id: i64,
    year: i32,
    month: u32,
    cell_start: f64,
    cell_end: f64,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO logbook_months (aircraft_id, year, month, cell_start, cell_end)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![aircraft_id, year, month, cell_start, cell_end],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Totals are only rewritten on open months.
pub fn update_month_totals(
    conn: &Connection,
    id: i64,
    cell_start: f64,
    cell_end: f64,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE logbook_months SET cell_start = ?1, cell_end = ?2 WHERE id = ?3 AND closed = 0",
        params![cell_start, cell_end, id],
    )?)
}

/// Totals of a closed month whose legs were changed afterwards.
pub fn restate_closed_month_totals(
    conn: &Connection,
    id: i64,
    cell_start: f64,
    cell_end: f64,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE logbook_months SET cell_start = ?1, cell_end = ?2 WHERE id = ?3 AND closed = 1",
        params![cell_start, cell_end, id],
    )?)
}

/// One-way close. Returns 0 when the month was already closed.
pub fn close_month(conn: &Connection, id: i64, closed_by: &str, closed_at: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE logbook_months SET closed = 1, closed_at = ?1, closed_by = ?2
         WHERE id = ?3 AND closed = 0",
        params![closed_at, closed_by, id],
    )?)
}

pub fn list_months(conn: &Connection, aircraft_id: i64) -> AppResult<Vec<LogbookMonth>> {
    let sql = format!(
        "SELECT {MONTH_COLUMNS} FROM logbook_months WHERE aircraft_id = ?1 ORDER BY year ASC, month ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([aircraft_id], map_month)?;
    Ok(collect_rows(rows)?)
}
