use crate::cli::commands::open_pool;
use crate::cli::parser::{ClientAction, Commands};
use crate::config::Config;
use crate::core::permissions::Operator;
use crate::core::records::{ClientInput, RecordsLogic};
use crate::db::{aircraft, clients};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::documents::format_document;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        ClientAction::Add {
            name,
            cnpj,
            aircraft,
            share,
            email,
            phone,
            birth,
        } => {
            let input = ClientInput {
                name: name.clone(),
                cnpj: cnpj.clone(),
                aircraft: aircraft.clone(),
                share_percent: *share,
                email: email.clone(),
                phone: phone.clone(),
                birth_date: birth.clone(),
            };
            let c = RecordsLogic::add_client(&mut pool, op, &input)?;
            success(format!("Client #{} {} registered", c.id, c.name));
        }

        ClientAction::List { aircraft: reg } => {
            let list = match reg {
                Some(r) => {
                    let a = aircraft::require_by_registration(&pool.conn, r)?;
                    clients::list_clients_by_aircraft(&pool.conn, a.id)?
                }
                None => clients::list_clients(&pool.conn)?,
            };

            let registrations: HashMap<i64, String> = aircraft::list_aircraft(&pool.conn)?
                .into_iter()
                .map(|a| (a.id, a.registration))
                .collect();

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("CNPJ/CPF"),
                Column::left("Aircraft"),
                Column::right("Share %"),
                Column::left("E-mail"),
                Column::left("Birth"),
            ]);

            for c in list {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name,
                    format_document(&c.cnpj),
                    colorize_optional(
                        &c.aircraft_id
                            .and_then(|id| registrations.get(&id).cloned())
                            .unwrap_or_default(),
                    ),
                    c.share_percent.map(|p| format!("{p:.1}")).unwrap_or_default(),
                    colorize_optional(&c.email),
                    colorize_optional(&c.birth_date.unwrap_or_default()),
                ]);
            }

            if table.is_empty() {
                info("No clients registered.");
            } else {
                print!("{}", table.render());
            }
        }

        ClientAction::Del { id } => {
            RecordsLogic::delete_client(&mut pool, op, *id)?;
            success(format!("Client #{} deleted", id));
        }
    }

    Ok(())
}
