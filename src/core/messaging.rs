use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::messages;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::message::Message;

pub struct MessagingLogic;

impl MessagingLogic {
    pub fn send(
        pool: &mut DbPool,
        op: &Operator,
        to: &str,
        subject: &str,
        body: &str,
    ) -> AppResult<i64> {
        op.require(Action::SendMessage)?;

        let to = to.trim();
        if to.is_empty() {
            return Err(AppError::InvalidInput("recipient is required".into()));
        }
        if body.trim().is_empty() {
            return Err(AppError::InvalidInput("message body is empty".into()));
        }

        let id = messages::insert_message(&pool.conn, &op.name, to, subject.trim(), body)?;
        audit_or_warn(&pool.conn, "message", to, &format!("Message #{id} from {}", op.name));
        Ok(id)
    }

    pub fn inbox(pool: &mut DbPool, op: &Operator, unread_only: bool) -> AppResult<Vec<Message>> {
        messages::inbox(&pool.conn, &op.name, unread_only)
    }

    /// Fetch a message addressed to the operator and mark it read.
    pub fn read(pool: &mut DbPool, op: &Operator, id: i64) -> AppResult<Message> {
        let msg = messages::get_message(&pool.conn, id)?
            .filter(|m| m.recipient == op.name)
            .ok_or_else(|| AppError::NotFound(format!("Message #{id}")))?;

        messages::mark_read(&pool.conn, id)?;
        Ok(msg)
    }
}
