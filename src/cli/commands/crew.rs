use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, CrewAction};
use crate::config::Config;
use crate::core::permissions::Operator;
use crate::core::records::RecordsLogic;
use crate::db::crew;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RED, RESET, colorize_optional};
use crate::utils::date::{parse_date, today};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Crew { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        CrewAction::Add {
            name,
            canac,
            function,
            birth,
            medical,
        } => {
            let c = RecordsLogic::add_crew(
                &mut pool,
                op,
                name,
                canac,
                function,
                birth.as_ref(),
                medical.as_ref(),
            )?;
            success(format!("Crew member {} ({}, {}) registered", c.name, c.canac, c.function));
        }

        CrewAction::List => {
            let now = today();
            let mut table = Table::new(vec![
                Column::left("CANAC"),
                Column::left("Name"),
                Column::left("Function"),
                Column::left("Birth"),
                Column::left("Medical until"),
            ]);

            for c in crew::list_crew(&pool.conn)? {
                let medical = match c.medical_expiry.as_deref() {
                    Some(m) if parse_date(m).is_some_and(|d| d < now) => {
                        format!("{RED}{m} (expired){RESET}")
                    }
                    Some(m) => m.to_string(),
                    None => colorize_optional(""),
                };
                table.add_row(vec![
                    c.canac,
                    c.name,
                    c.function.to_string(),
                    colorize_optional(&c.birth_date.unwrap_or_default()),
                    medical,
                ]);
            }

            if table.is_empty() {
                info("No crew members registered.");
            } else {
                print!("{}", table.render());
            }
        }

        CrewAction::Del { canac } => {
            RecordsLogic::delete_crew(&mut pool, op, canac)?;
            success(format!("Crew member {} deleted", canac));
        }
    }

    Ok(())
}
