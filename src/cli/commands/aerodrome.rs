use crate::cli::commands::open_pool;
use crate::cli::parser::{AerodromeAction, Commands};
use crate::config::Config;
use crate::core::permissions::Operator;
use crate::core::records::RecordsLogic;
use crate::db::aerodromes;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Aerodrome { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        AerodromeAction::Add {
            icao,
            name,
            city,
            state,
        } => {
            let a = RecordsLogic::add_aerodrome(
                &mut pool,
                op,
                icao,
                Some(name),
                Some(city),
                Some(state),
            )?;
            success(format!("Aerodrome {} ({}) registered", a.icao, a.name));
        }

        AerodromeAction::List => {
            let mut table = Table::new(vec![
                Column::left("ICAO"),
                Column::left("Name"),
                Column::left("City"),
                Column::left("State"),
            ]);

            for a in aerodromes::list_aerodromes(&pool.conn)? {
                table.add_row(vec![a.icao, a.name, a.city, a.state]);
            }

            if table.is_empty() {
                info("No aerodromes registered.");
            } else {
                print!("{}", table.render());
            }
        }

        AerodromeAction::Del { icao } => {
            RecordsLogic::delete_aerodrome(&mut pool, op, icao)?;
            success(format!("Aerodrome {} deleted", icao.to_uppercase()));
        }
    }

    Ok(())
}
