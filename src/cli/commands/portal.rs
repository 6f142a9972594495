use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, PortalAction};
use crate::config::Config;
use crate::core::calculator::hours::format_decimal_hours_to_hhmm as hhmm;
use crate::core::portal::PortalLogic;
use crate::errors::AppResult;
use crate::models::portal_session::PortalSession;
use crate::ui::messages::{field, header, info, success, warning};
use crate::utils::formatting::{fixed2, format_brl};
use crate::utils::period::parse_optional_period;
use crate::utils::table::{Column, Table};
use chrono::{Local, Utc};

fn print_session(s: &PortalSession) {
    field("Client", &s.client_name);
    field("Aircraft", &s.registration);
    field(
        "Expires",
        s.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Portal { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;
    let now = Utc::now();

    match action {
        PortalAction::Login { cnpj, registration } => {
            let login =
                PortalLogic::login(&mut pool, cnpj, registration, cfg.portal_session_hours, now)?;

            success(format!("Welcome, {}", login.session.client_name));
            print_session(&login.session);
            println!();
            warning("Keep this token; it is shown only once:");
            println!("{}", login.token);
        }

        PortalAction::Whoami { token } => {
            let session = PortalLogic::validate(&pool.conn, token, now)?;
            header("Portal session");
            print_session(&session);
        }

        PortalAction::Summary { token, period } => {
            let bounds = parse_optional_period(period.as_ref())?;
            let summary = PortalLogic::summary(&mut pool, token, bounds, now)?;

            header(format!(
                "{} – {}",
                summary.session.client_name, summary.session.registration
            ));

            let mut table = Table::new(vec![
                Column::left("Date"),
                Column::left("Route"),
                Column::right("Flight"),
                Column::right("Ldg"),
                Column::left("Yours"),
            ]);
            for e in &summary.legs {
                table.add_row(vec![
                    e.date.to_string(),
                    format!("{}-{}", e.departure, e.arrival),
                    hhmm(e.flight_hours),
                    e.landings.to_string(),
                    if e.client_id == Some(summary.session.client_id) {
                        "yes".to_string()
                    } else {
                        String::new()
                    },
                ]);
            }
            if table.is_empty() {
                info("No flights in the selected period.");
            } else {
                print!("{}", table.render());
            }

            println!();
            field(
                "Aircraft hours",
                format!(
                    "{} in {} legs",
                    hhmm(summary.aircraft_totals.flight_hours),
                    summary.aircraft_totals.legs
                ),
            );
            field(
                "Your hours",
                format!(
                    "{} in {} legs",
                    hhmm(summary.client_totals.flight_hours),
                    summary.client_totals.legs
                ),
            );
            if let Some(cell) = summary.cell_hours {
                field("Cell hours", fixed2(cell));
            }

            if !summary.receipts.is_empty() {
                println!();
                header("Receipts");
                for r in &summary.receipts {
                    field(r.number(), format!("{} – {}", format_brl(r.amount_cents), r.description));
                }
            }
        }

        PortalAction::Logout { token } => {
            let session = PortalLogic::logout(&mut pool, token, now)?;
            success(format!("Session of {} closed", session.client_name));
        }
    }

    Ok(())
}
