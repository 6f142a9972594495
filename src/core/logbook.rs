//! Logbook bookkeeping: one row per leg, month headers with cell totals,
//! one-way month close.

use crate::core::calculator::cell::{CellProjection, running_cell};
use crate::core::calculator::hours::round2;
use crate::core::calculator::totals::{FlightTotals, fuel_used, totals_by};
use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::{aerodromes, aircraft, clients, crew, logbook};
use crate::errors::{AppError, AppResult};
use crate::models::aircraft::Aircraft;
use crate::models::crew::CrewMember;
use crate::models::logbook_entry::LogbookEntry;
use crate::models::logbook_month::LogbookMonth;
use crate::utils::date::YearMonth;
use crate::utils::time::minutes_between;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::Connection;

/// Leg fields coming from the command line. `None` leaves the field as it
/// is (blank for a new leg).
#[derive(Debug, Default, Clone)]
pub struct LegInput {
    pub date: Option<NaiveDate>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub time_ac: Option<NaiveTime>,
    pub time_dep: Option<NaiveTime>,
    pub time_pou: Option<NaiveTime>,
    pub time_cor: Option<NaiveTime>,
    pub flight: Option<f64>,
    pub night: Option<f64>,
    pub ifr: Option<f64>,
    pub landings: Option<i32>,
    pub fuel_added: Option<f64>,
    pub fuel_remaining: Option<f64>,
    pub cell: Option<f64>,
    pub pic: Option<String>,
    pub sic: Option<String>,
    pub daily_rate: Option<bool>,
    pub client_id: Option<i64>,
    pub confirmed: Option<bool>,
}

/// Copy the given fields onto `e` and derive the dependent ones:
/// - flight time from DEP→POU when times changed and no explicit flight time was given;
/// - day time = flight − night;
/// - cell delta = flight time unless given explicitly.
pub fn apply_input(e: &mut LogbookEntry, input: &LegInput) -> AppResult<()> {
    if let Some(d) = input.date {
        e.date = d;
    }
    if let Some(v) = &input.departure {
        e.departure = v.trim().to_uppercase();
    }
    if let Some(v) = &input.arrival {
        e.arrival = v.trim().to_uppercase();
    }

    let times_changed = input.time_dep.is_some() || input.time_pou.is_some();
    if input.time_ac.is_some() {
        e.time_ac = input.time_ac;
    }
    if input.time_dep.is_some() {
        e.time_dep = input.time_dep;
    }
    if input.time_pou.is_some() {
        e.time_pou = input.time_pou;
    }
    if input.time_cor.is_some() {
        e.time_cor = input.time_cor;
    }

    let mut flight_changed = false;
    if let Some(f) = input.flight {
        e.flight_hours = f;
        flight_changed = true;
    } else if times_changed
        && let (Some(dep), Some(pou)) = (e.time_dep, e.time_pou)
    {
        e.flight_hours = minutes_between(dep, pou) as f64 / 60.0;
        flight_changed = true;
    }

    if let Some(n) = input.night {
        e.night_hours = n;
    }
    if let Some(i) = input.ifr {
        e.ifr_hours = i;
    }
    e.day_hours = (e.flight_hours - e.night_hours).max(0.0);

    if let Some(c) = input.cell {
        e.cell_delta = c;
    } else if flight_changed {
        e.cell_delta = e.flight_hours;
    }

    if let Some(l) = input.landings {
        e.landings = l;
    }
    if let Some(f) = input.fuel_added {
        e.fuel_added = f;
    }
    if let Some(f) = input.fuel_remaining {
        e.fuel_remaining = f;
    }
    if let Some(p) = &input.pic {
        e.pic_canac = Some(p.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(s) = &input.sic {
        e.sic_canac = Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(d) = input.daily_rate {
        e.daily_rate = d;
    }
    if input.client_id.is_some() {
        e.client_id = input.client_id;
    }
    if let Some(c) = input.confirmed {
        e.confirmed = c;
    }

    validate_leg(e)
}

fn validate_leg(e: &LogbookEntry) -> AppResult<()> {
    if e.departure.is_empty() || e.arrival.is_empty() {
        return Err(AppError::InvalidInput(
            "departure and arrival aerodromes are required".into(),
        ));
    }
    if e.night_hours > e.flight_hours + 1e-9 {
        return Err(AppError::InvalidInput(
            "night time exceeds flight time".into(),
        ));
    }
    if e.ifr_hours > e.flight_hours + 1e-9 {
        return Err(AppError::InvalidInput("IFR time exceeds flight time".into()));
    }
    if e.landings < 0 {
        return Err(AppError::InvalidInput("landings cannot be negative".into()));
    }
    if e.fuel_added < 0.0 || e.fuel_remaining < 0.0 {
        return Err(AppError::InvalidInput("fuel cannot be negative".into()));
    }
    if e.pic_canac.is_some() && e.pic_canac == e.sic_canac {
        return Err(AppError::InvalidInput("PIC and SIC must differ".into()));
    }
    Ok(())
}

/// Friendly "not found" errors before the foreign keys would reject the row.
fn check_references(conn: &Connection, e: &LogbookEntry) -> AppResult<()> {
    for icao in [&e.departure, &e.arrival] {
        if aerodromes::find_by_icao(conn, icao)?.is_none() {
            return Err(AppError::NotFound(format!("Aerodrome {icao}")));
        }
    }
    for canac in [&e.pic_canac, &e.sic_canac].into_iter().flatten() {
        if crew::find_by_canac(conn, canac)?.is_none() {
            return Err(AppError::NotFound(format!("Crew member with CANAC {canac}")));
        }
    }
    if let Some(id) = e.client_id
        && clients::get_client(conn, id)?.is_none()
    {
        return Err(AppError::NotFound(format!("Client #{id}")));
    }
    Ok(())
}

/// Recompute cell totals of every open month of an aircraft, oldest first.
/// Closed months keep their totals and feed the next month's opening value.
pub fn recompute_months(conn: &Connection, a: &Aircraft) -> AppResult<()> {
    recompute_months_after_edit(conn, a, &[])
}

/// Like [`recompute_months`], but a closed month listed in `edited` had its
/// legs changed (only possible with `EditClosedLogbook`). From that month on,
/// closed months are recomputed too, so later opening values follow. The
/// closed flag is left alone.
pub fn recompute_months_after_edit(
    conn: &Connection,
    a: &Aircraft,
    edited: &[YearMonth],
) -> AppResult<()> {
    let mut prev_end: Option<f64> = None;
    let mut thawed = false;

    for m in logbook::list_months(conn, a.id)? {
        let Some(period) = m.period() else {
            continue;
        };

        if m.closed && edited.contains(&period) {
            thawed = true;
        }
        if m.closed && !thawed {
            prev_end = Some(m.cell_end);
            continue;
        }

        let start = match prev_end {
            Some(end) => end,
            None => round2(
                a.initial_cell_hours
                    + logbook::cell_hours_before(conn, a.id, period.first_day())?,
            ),
        };

        let legs = logbook::load_entries(conn, a.id, period.first_day(), period.last_day())?;
        let end = round2(start + legs.iter().map(|l| l.cell_delta).sum::<f64>());

        if m.closed && (start, end) != (m.cell_start, m.cell_end) {
            audit_or_warn(
                conn,
                "recompute",
                &format!("{} {}", a.registration, m.label()),
                &format!(
                    "Closed month cell {:.2} → {:.2} became {start:.2} → {end:.2}",
                    m.cell_start, m.cell_end
                ),
            );
        }

        if m.closed {
            logbook::restate_closed_month_totals(conn, m.id, start, end)?;
        } else {
            logbook::update_month_totals(conn, m.id, start, end)?;
        }
        prev_end = Some(end);
    }

    Ok(())
}

/// Load the month header, creating it (with fresh totals) on first access.
pub fn ensure_month(conn: &Connection, a: &Aircraft, period: YearMonth) -> AppResult<LogbookMonth> {
    if logbook::find_month(conn, a.id, period.year(), period.month())?.is_none() {
        logbook::insert_month(conn, a.id, period.year(), period.month(), 0.0, 0.0)?;
    }

    recompute_months(conn, a)?;

    logbook::find_month(conn, a.id, period.year(), period.month())?
        .ok_or_else(|| AppError::NotFound(format!("Logbook month {period}")))
}

/// Editing rule: `EditLogbook` always; a closed month additionally needs
/// `EditClosedLogbook`.
fn check_editable(conn: &Connection, op: &Operator, a: &Aircraft, date: NaiveDate) -> AppResult<()> {
    op.require(Action::EditLogbook)?;

    let month = ensure_month(conn, a, YearMonth::of(date))?;
    if month.closed && !op.can(Action::EditClosedLogbook) {
        return Err(AppError::MonthClosed(format!(
            "{} {}",
            a.registration,
            month.label()
        )));
    }
    Ok(())
}

fn load_leg(conn: &Connection, id: i64) -> AppResult<(LogbookEntry, Aircraft)> {
    let e = logbook::get_entry(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Logbook entry #{id}")))?;
    let a = aircraft::get_aircraft(conn, e.aircraft_id)?
        .ok_or_else(|| AppError::NotFound(format!("Aircraft #{}", e.aircraft_id)))?;
    Ok((e, a))
}

/// One leg of a month listing, with running cell hours and fuel burned.
#[derive(Debug, Clone)]
pub struct LegView {
    pub entry: LogbookEntry,
    pub cell_before: f64,
    pub cell_after: f64,
    pub fuel_used: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MonthView {
    pub aircraft: Aircraft,
    pub month: LogbookMonth,
    pub legs: Vec<LegView>,
    pub totals: FlightTotals,
    pub projection: CellProjection,
}

#[derive(Debug, Clone)]
pub struct HoursSummary {
    pub totals: FlightTotals,
    pub by_client: Vec<(String, FlightTotals)>,
    pub by_pic: Vec<(String, FlightTotals)>,
}

pub struct LogbookLogic;

impl LogbookLogic {
    pub fn add_leg(
        pool: &mut DbPool,
        op: &Operator,
        registration: &str,
        input: &LegInput,
    ) -> AppResult<LogbookEntry> {
        let conn = &pool.conn;
        let a = aircraft::require_by_registration(conn, registration)?;
        let date = input
            .date
            .ok_or_else(|| AppError::InvalidDate("missing leg date".into()))?;

        check_editable(conn, op, &a, date)?;

        let mut e = LogbookEntry::blank(a.id, date);
        apply_input(&mut e, input)?;
        check_references(conn, &e)?;

        e.id = logbook::insert_entry(conn, &e)?;
        recompute_months_after_edit(conn, &a, &[YearMonth::of(e.date)])?;

        audit_or_warn(
            conn,
            "add",
            &format!("{} leg #{}", a.registration, e.id),
            &format!("{} {}→{}", e.date, e.departure, e.arrival),
        );
        Ok(e)
    }

    pub fn edit_leg(
        pool: &mut DbPool,
        op: &Operator,
        id: i64,
        input: &LegInput,
    ) -> AppResult<LogbookEntry> {
        let conn = &pool.conn;
        let (mut e, a) = load_leg(conn, id)?;
        let old_date = e.date;

        check_editable(conn, op, &a, e.date)?;
        if let Some(new_date) = input.date {
            check_editable(conn, op, &a, new_date)?;
        }

        apply_input(&mut e, input)?;
        check_references(conn, &e)?;

        logbook::update_entry(conn, &e)?;
        recompute_months_after_edit(conn, &a, &[YearMonth::of(old_date), YearMonth::of(e.date)])?;

        audit_or_warn(
            conn,
            "edit",
            &format!("{} leg #{}", a.registration, e.id),
            &format!("{} {}→{}", e.date, e.departure, e.arrival),
        );
        Ok(e)
    }

    pub fn confirm_leg(pool: &mut DbPool, op: &Operator, id: i64) -> AppResult<LogbookEntry> {
        let input = LegInput {
            confirmed: Some(true),
            ..Default::default()
        };
        Self::edit_leg(pool, op, id, &input)
    }

    pub fn delete_leg(pool: &mut DbPool, op: &Operator, id: i64) -> AppResult<()> {
        let conn = &pool.conn;
        let (e, a) = load_leg(conn, id)?;

        check_editable(conn, op, &a, e.date)?;

        logbook::delete_entry(conn, id)?;
        recompute_months_after_edit(conn, &a, &[YearMonth::of(e.date)])?;

        audit_or_warn(
            conn,
            "del",
            &format!("{} leg #{}", a.registration, id),
            &format!("{} {}→{}", e.date, e.departure, e.arrival),
        );
        Ok(())
    }

    /// Close a month. There is no reopen.
    pub fn close_month(
        pool: &mut DbPool,
        op: &Operator,
        registration: &str,
        period: YearMonth,
    ) -> AppResult<LogbookMonth> {
        op.require(Action::CloseLogbookMonth)?;

        let conn = &pool.conn;
        let a = aircraft::require_by_registration(conn, registration)?;
        let month = ensure_month(conn, &a, period)?;

        let label = format!("{} {}", a.registration, month.label());
        if month.closed {
            return Err(AppError::MonthAlreadyClosed(label));
        }

        let now = Local::now().to_rfc3339();
        if logbook::close_month(conn, month.id, &op.name, &now)? == 0 {
            return Err(AppError::MonthAlreadyClosed(label));
        }

        audit_or_warn(
            conn,
            "close",
            &label,
            &format!("Month closed at cell {:.2}", month.cell_end),
        );

        logbook::find_month(conn, a.id, period.year(), period.month())?
            .ok_or_else(|| AppError::NotFound(format!("Logbook month {label}")))
    }

    pub fn month_view(
        pool: &mut DbPool,
        registration: &str,
        period: YearMonth,
        inspection_interval: f64,
    ) -> AppResult<MonthView> {
        let conn = &pool.conn;
        let a = aircraft::require_by_registration(conn, registration)?;
        let month = ensure_month(conn, &a, period)?;

        let entries = logbook::load_entries(conn, a.id, period.first_day(), period.last_day())?;
        let deltas: Vec<f64> = entries.iter().map(|e| e.cell_delta).collect();
        let cells = running_cell(month.cell_start, &deltas);
        let fuel = fuel_used(&entries);
        let totals = FlightTotals::from_entries(&entries);

        let legs = entries
            .into_iter()
            .zip(cells)
            .zip(fuel)
            .map(|((entry, (cell_before, cell_after)), fuel_used)| LegView {
                entry,
                cell_before,
                cell_after,
                fuel_used,
            })
            .collect();

        Ok(MonthView {
            projection: month.projection(inspection_interval),
            aircraft: a,
            month,
            legs,
            totals,
        })
    }

    /// Flight-hours aggregation for one aircraft over a period.
    pub fn summary(
        pool: &mut DbPool,
        registration: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<(Aircraft, HoursSummary)> {
        let conn = &pool.conn;
        let a = aircraft::require_by_registration(conn, registration)?;
        let entries = logbook::load_all_entries(conn, Some(a.id), bounds)?;

        let mut by_client = Vec::new();
        for (id, t) in totals_by(&entries, |e| e.client_id) {
            let name = clients::get_client(conn, id)?
                .map(|c| c.name)
                .unwrap_or_else(|| format!("client #{id}"));
            by_client.push((name, t));
        }

        let mut by_pic = Vec::new();
        for (canac, t) in totals_by(&entries, |e| e.pic_canac.clone()) {
            let name = crew::find_by_canac(conn, &canac)?
                .map(|c| format!("{} ({})", c.name, canac))
                .unwrap_or(canac);
            by_pic.push((name, t));
        }

        Ok((
            a,
            HoursSummary {
                totals: FlightTotals::from_entries(&entries),
                by_client,
                by_pic,
            },
        ))
    }

    /// Hours flown by a crew member, split by seat.
    pub fn crew_hours(
        pool: &mut DbPool,
        canac: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<(CrewMember, FlightTotals, FlightTotals)> {
        let conn = &pool.conn;
        let member = crew::find_by_canac(conn, canac)?
            .ok_or_else(|| AppError::NotFound(format!("Crew member with CANAC {canac}")))?;

        let entries = logbook::load_entries_by_canac(conn, &member.canac, bounds)?;
        let as_pic = FlightTotals::from_entries(
            entries
                .iter()
                .filter(|e| e.pic_canac.as_deref() == Some(member.canac.as_str())),
        );
        let as_sic = FlightTotals::from_entries(
            entries
                .iter()
                .filter(|e| e.sic_canac.as_deref() == Some(member.canac.as_str())),
        );

        Ok((member, as_pic, as_sic))
    }
}
