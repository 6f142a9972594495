use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, LegArgs, LogbookAction};
use crate::config::Config;
use crate::core::calculator::hours::{format_decimal_hours_to_hhmm as hhmm, parse_optional_hours};
use crate::core::calculator::totals::FlightTotals;
use crate::core::logbook::{LegInput, LogbookLogic, MonthView};
use crate::core::permissions::Operator;
use crate::errors::AppResult;
use crate::models::logbook_entry::LogbookEntry;
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{GREY, RESET, color_for_cell_disp, colorize_optional};
use crate::utils::date::{YearMonth, parse_date_arg, today};
use crate::utils::documents::{normalize_canac, normalize_icao};
use crate::utils::formatting::fixed2;
use crate::utils::period::parse_optional_period;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, parse_optional_time};

/// Strict conversion of the command-line leg fields.
fn to_input(leg: &LegArgs) -> AppResult<LegInput> {
    Ok(LegInput {
        date: leg.date.as_deref().map(parse_date_arg).transpose()?,
        departure: leg.departure.as_deref().map(normalize_icao).transpose()?,
        arrival: leg.arrival.as_deref().map(normalize_icao).transpose()?,
        time_ac: parse_optional_time(leg.ac.as_ref())?,
        time_dep: parse_optional_time(leg.dep.as_ref())?,
        time_pou: parse_optional_time(leg.pou.as_ref())?,
        time_cor: parse_optional_time(leg.cor.as_ref())?,
        flight: parse_optional_hours(leg.flight.as_ref())?,
        night: parse_optional_hours(leg.night.as_ref())?,
        ifr: parse_optional_hours(leg.ifr.as_ref())?,
        landings: leg.landings,
        fuel_added: leg.fuel_added,
        fuel_remaining: leg.fuel_remaining,
        cell: parse_optional_hours(leg.cell.as_ref())?,
        pic: leg.pic.as_deref().map(normalize_canac).transpose()?,
        sic: leg.sic.as_deref().map(normalize_canac).transpose()?,
        daily_rate: leg.daily_rate.then_some(true),
        client_id: leg.client,
        confirmed: leg.confirmed.then_some(true),
    })
}

fn describe(e: &LogbookEntry) -> String {
    format!(
        "#{} {} {}→{} flight {} cell {}",
        e.id,
        e.date,
        e.departure,
        e.arrival,
        hhmm(e.flight_hours),
        hhmm(e.cell_delta)
    )
}

fn print_month(view: &MonthView) {
    let status = if view.month.closed {
        format!(" (closed by {})", view.month.closed_by.as_deref().unwrap_or("?"))
    } else {
        String::new()
    };
    header(format!(
        "{} {} – {}{}",
        view.aircraft.registration,
        view.aircraft.model,
        view.month.label(),
        status
    ));

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Route"),
        Column::left("AC"),
        Column::left("DEP"),
        Column::left("POU"),
        Column::left("COR"),
        Column::right("Flight"),
        Column::right("Night"),
        Column::right("IFR"),
        Column::right("Ldg"),
        Column::right("Fuel+"),
        Column::right("Fuel left"),
        Column::right("Fuel used"),
        Column::right("Cell before"),
        Column::right("Cell after"),
        Column::left("PIC"),
        Column::left("Flags"),
    ]);

    for leg in &view.legs {
        let e = &leg.entry;
        let mut flags = Vec::new();
        if e.confirmed {
            flags.push("confirmed");
        }
        if e.daily_rate {
            flags.push("daily");
        }

        table.add_row(vec![
            e.id.to_string(),
            e.date.format("%d/%m").to_string(),
            format!("{}-{}", e.departure, e.arrival),
            colorize_optional(&format_time(e.time_ac)),
            colorize_optional(&format_time(e.time_dep)),
            colorize_optional(&format_time(e.time_pou)),
            colorize_optional(&format_time(e.time_cor)),
            hhmm(e.flight_hours),
            hhmm(e.night_hours),
            hhmm(e.ifr_hours),
            e.landings.to_string(),
            fixed2(e.fuel_added),
            fixed2(e.fuel_remaining),
            leg.fuel_used
                .map(fixed2)
                .unwrap_or_else(|| format!("{GREY}-{RESET}")),
            fixed2(leg.cell_before),
            fixed2(leg.cell_after),
            colorize_optional(e.pic_canac.as_deref().unwrap_or("")),
            flags.join(","),
        ]);
    }

    if table.is_empty() {
        info("No legs recorded in this month.");
    } else {
        print!("{}", table.render());
    }

    println!();
    print_totals(&view.totals);
    field("Cell start", fixed2(view.month.cell_start));
    field("Cell end", fixed2(view.projection.cell_end));
    field("Next inspection", fixed2(view.projection.cell_prev));
    field(
        "Available",
        format!(
            "{}{}{}",
            color_for_cell_disp(view.projection.cell_disp),
            fixed2(view.projection.cell_disp),
            RESET
        ),
    );
}

fn print_totals(t: &FlightTotals) {
    field("Legs", t.legs);
    field("Flight", hhmm(t.flight_hours));
    field("Day / Night", format!("{} / {}", hhmm(t.day_hours), hhmm(t.night_hours)));
    field("IFR", hhmm(t.ifr_hours));
    field("Landings", t.landings);
    field("Fuel added", fixed2(t.fuel_added));
    field("Cell hours", fixed2(t.cell_hours));
    field("Daily-rate legs", t.daily_rate_legs);
}

fn breakdown(title: &str, rows: &[(String, FlightTotals)]) {
    if rows.is_empty() {
        return;
    }

    println!();
    header(title);
    let mut table = Table::new(vec![
        Column::left("Name"),
        Column::right("Legs"),
        Column::right("Flight"),
        Column::right("Night"),
        Column::right("IFR"),
        Column::right("Ldg"),
        Column::right("Daily"),
    ]);
    for (name, t) in rows {
        table.add_row(vec![
            name.clone(),
            t.legs.to_string(),
            hhmm(t.flight_hours),
            hhmm(t.night_hours),
            hhmm(t.ifr_hours),
            t.landings.to_string(),
            t.daily_rate_legs.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Logbook { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        LogbookAction::Add { aircraft, leg } => {
            // 1. Parse input (date defaults to today)
            let mut input = to_input(leg)?;
            if input.date.is_none() {
                input.date = Some(today());
            }

            // 2. Save and recompute the month
            let e = LogbookLogic::add_leg(&mut pool, op, aircraft, &input)?;
            success(format!("Leg added: {}", describe(&e)));
        }

        LogbookAction::Edit { id, leg } => {
            let input = to_input(leg)?;
            let e = LogbookLogic::edit_leg(&mut pool, op, *id, &input)?;
            success(format!("Leg updated: {}", describe(&e)));
        }

        LogbookAction::Del { id } => {
            LogbookLogic::delete_leg(&mut pool, op, *id)?;
            success(format!("Leg #{} deleted", id));
        }

        LogbookAction::Confirm { id } => {
            let e = LogbookLogic::confirm_leg(&mut pool, op, *id)?;
            success(format!("Leg confirmed: {}", describe(&e)));
        }

        LogbookAction::List { aircraft, period } => {
            let ym = match period {
                Some(p) => YearMonth::parse(p)?,
                None => YearMonth::of(today()),
            };
            let view =
                LogbookLogic::month_view(&mut pool, aircraft, ym, cfg.cell_inspection_interval)?;
            print_month(&view);
        }

        LogbookAction::Close { aircraft, period } => {
            let ym = YearMonth::parse(period)?;
            let m = LogbookLogic::close_month(&mut pool, op, aircraft, ym)?;
            success(format!(
                "Month {} of {} closed (cell {} → {})",
                m.label(),
                aircraft.to_uppercase(),
                fixed2(m.cell_start),
                fixed2(m.cell_end)
            ));
        }

        LogbookAction::Summary { aircraft, period } => {
            let bounds = parse_optional_period(period.as_ref())?;
            let (a, summary) = LogbookLogic::summary(&mut pool, aircraft, bounds)?;

            header(format!("Flight hours – {} {}", a.registration, a.model));
            print_totals(&summary.totals);
            breakdown("By client", &summary.by_client);
            breakdown("By pilot in command", &summary.by_pic);
        }

        LogbookAction::Hours { canac, period } => {
            let bounds = parse_optional_period(period.as_ref())?;
            let (member, as_pic, as_sic) =
                LogbookLogic::crew_hours(&mut pool, &normalize_canac(canac)?, bounds)?;

            header(format!("{} ({}, {})", member.name, member.canac, member.function));
            field("As PIC", format!("{} in {} legs", hhmm(as_pic.flight_hours), as_pic.legs));
            field("As SIC", format!("{} in {} legs", hhmm(as_sic.flight_hours), as_sic.legs));
            field("Night", hhmm(as_pic.night_hours + as_sic.night_hours));
            field("IFR", hhmm(as_pic.ifr_hours + as_sic.ifr_hours));
            field("Landings", as_pic.landings + as_sic.landings);
        }
    }

    Ok(())
}
