use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ReceiptAction};
use crate::config::Config;
use crate::core::permissions::Operator;
use crate::core::receipt::{Payer, ReceiptInput, ReceiptLogic};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::date_or_today;
use crate::utils::documents::format_document;
use crate::utils::formatting::format_brl;
use crate::utils::period::parse_optional_period;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Receipt { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        ReceiptAction::Issue {
            client,
            payer,
            document,
            amount,
            description,
            date,
            file,
            force,
        } => {
            // 1. Resolve the payer
            let payer = match (client, payer, document) {
                (Some(id), _, _) => Payer::Client(*id),
                (None, Some(name), Some(doc)) => Payer::Other {
                    name: name.clone(),
                    document: doc.clone(),
                },
                _ => {
                    return Err(AppError::InvalidInput(
                        "use --client ID, or --payer NAME with --document".into(),
                    ));
                }
            };

            // 2. Allocate the number and store
            let input = ReceiptInput {
                payer,
                amount: amount.clone(),
                description: description.clone(),
                issue_date: date_or_today(date.as_ref())?,
            };
            let receipt = ReceiptLogic::issue(&mut pool, op, cfg, &input)?;
            success(format!(
                "Receipt {} issued: {} to {}",
                receipt.number(),
                format_brl(receipt.amount_cents),
                receipt.payer_name
            ));

            // 3. Optional PDF
            if let Some(file) = file {
                let pages = ReceiptLogic::render_pdf(&receipt, cfg, file, *force)?;
                success(format!("PDF written: {file} ({pages} page(s))"));
            }
        }

        ReceiptAction::List { period } => {
            let bounds = parse_optional_period(period.as_ref())?;
            let list = ReceiptLogic::list(&mut pool, op, bounds)?;

            if list.is_empty() {
                info("No receipts found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("Number"),
                Column::left("Date"),
                Column::left("Payer"),
                Column::left("Document"),
                Column::right("Amount"),
                Column::left("Description"),
            ]);
            let mut total = 0i64;
            for r in &list {
                total += r.amount_cents;
                table.add_row(vec![
                    r.number(),
                    r.issue_date.format("%d/%m/%Y").to_string(),
                    r.payer_name.clone(),
                    format_document(&r.payer_document),
                    format_brl(r.amount_cents),
                    r.description.clone(),
                ]);
            }
            print!("{}", table.render());
            println!();
            info(format!("{} receipt(s), total {}", list.len(), format_brl(total)));
        }

        ReceiptAction::Pdf {
            number,
            file,
            force,
        } => {
            let receipt = ReceiptLogic::find(&mut pool, op, number)?;
            let pages = ReceiptLogic::render_pdf(&receipt, cfg, file, *force)?;
            success(format!(
                "Receipt {} written to {file} ({pages} page(s))",
                receipt.number()
            ));
        }
    }

    Ok(())
}
