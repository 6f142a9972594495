use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, MessageAction};
use crate::config::Config;
use crate::core::messaging::MessagingLogic;
use crate::core::permissions::Operator;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info, success};
use crate::utils::table::{Column, Table};

const BODY_WIDTH: usize = 78;

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    let Commands::Message { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        MessageAction::Send { to, subject, body } => {
            let id = MessagingLogic::send(&mut pool, op, to, subject, body)?;
            success(format!("Message #{id} sent to {}", to.trim()));
        }

        MessageAction::Inbox { unread } => {
            let list = MessagingLogic::inbox(&mut pool, op, *unread)?;
            if list.is_empty() {
                info(format!("No messages for {}.", op.name));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left(""),
                Column::left("From"),
                Column::left("Sent"),
                Column::left("Subject"),
            ]);
            for m in &list {
                table.add_row(vec![
                    m.id.to_string(),
                    if m.is_read() { "" } else { "*" }.to_string(),
                    m.sender.clone(),
                    m.sent_at.clone(),
                    m.subject.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        MessageAction::Read { id } => {
            let m = MessagingLogic::read(&mut pool, op, *id)?;
            header(if m.subject.is_empty() {
                format!("Message #{}", m.id)
            } else {
                m.subject.clone()
            });
            field("From", &m.sender);
            field("Sent", &m.sent_at);
            println!();
            println!("{}", textwrap::fill(&m.body, BODY_WIDTH));
        }
    }

    Ok(())
}
