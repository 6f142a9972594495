use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::birthdays::{BirthdayFilter, BirthdaysLogic};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RESET, colorize_optional};
use crate::utils::date::date_or_today;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Birthdays { month, week, today } = cmd {
        let today = date_or_today(today.as_ref())?;
        let filter = if *month {
            BirthdayFilter::ThisMonth
        } else if *week {
            BirthdayFilter::NextDays(7)
        } else {
            BirthdayFilter::All
        };

        let mut pool = open_pool(cfg)?;
        let list = BirthdaysLogic::list(&mut pool, filter, today)?;

        if list.is_empty() {
            info("No birthdays to show.");
            return Ok(());
        }

        header(format!("Birthdays from {}", today.format("%d/%m/%Y")));

        let mut table = Table::new(vec![
            Column::left("Next"),
            Column::right("In days"),
            Column::left("Name"),
            Column::left("Kind"),
            Column::right("Turns"),
        ]);

        for b in &list {
            let days = b.days_until(today);
            let when = match b.next {
                Some(d) if days == Some(0) => format!("{GREEN}{} (today){RESET}", d.format("%d/%m/%Y")),
                Some(d) => d.format("%d/%m/%Y").to_string(),
                None => colorize_optional(&b.raw),
            };
            table.add_row(vec![
                when,
                days.map(|d| d.to_string()).unwrap_or_default(),
                b.name.clone(),
                b.kind.to_string(),
                b.turning.map(|t| t.to_string()).unwrap_or_default(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
