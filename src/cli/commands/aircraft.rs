use crate::cli::commands::open_pool;
use crate::cli::parser::{AircraftAction, Commands};
use crate::config::Config;
use crate::core::calculator::hours::format_decimal_hours_to_hhmm;
use crate::core::permissions::Operator;
use crate::core::records::RecordsLogic;
use crate::db::aircraft;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Aircraft { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        AircraftAction::Add {
            registration,
            model,
            serial,
            initial_cell,
        } => {
            let a = RecordsLogic::add_aircraft(
                &mut pool,
                op,
                registration,
                Some(model),
                Some(serial),
                initial_cell.as_ref(),
            )?;
            success(format!(
                "Aircraft {} ({}) registered, initial cell {}",
                a.registration,
                a.model,
                format_decimal_hours_to_hhmm(a.initial_cell_hours)
            ));
        }

        AircraftAction::List => {
            let mut table = Table::new(vec![
                Column::left("Registration"),
                Column::left("Model"),
                Column::left("Serial"),
                Column::right("Initial cell"),
                Column::left("Status"),
            ]);

            for a in aircraft::list_aircraft(&pool.conn)? {
                table.add_row(vec![
                    a.registration,
                    a.model,
                    colorize_optional(&a.serial_number),
                    format!("{:.2}", a.initial_cell_hours),
                    if a.active { "active" } else { "inactive" }.to_string(),
                ]);
            }

            if table.is_empty() {
                info("No aircraft registered.");
            } else {
                print!("{}", table.render());
            }
        }

        AircraftAction::Active { registration, on } => {
            let a = RecordsLogic::set_aircraft_active(&mut pool, op, registration, *on)?;
            success(format!(
                "Aircraft {} is now {}",
                a.registration,
                if a.active { "active" } else { "inactive" }
            ));
        }

        AircraftAction::Del { registration } => {
            RecordsLogic::delete_aircraft(&mut pool, op, registration)?;
            success(format!("Aircraft {} deleted", registration.to_uppercase()));
        }
    }

    Ok(())
}
