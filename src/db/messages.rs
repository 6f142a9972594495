use crate::db::queries::{collect_rows, now_rfc3339};
use crate::errors::AppResult;
use crate::models::message::Message;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get("id")?,
        sender: row.get("sender")?,
        recipient: row.get("recipient")?,
        subject: row.get("subject")?,
        body: row.get("body")?,
        sent_at: row.get("sent_at")?,
        read_at: row.get("read_at")?,
    })
}

pub fn insert_message(
    conn: &Connection,
    sender: &str,
    recipient: &str,
    subject: &str,
    body: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO messages (sender, recipient, subject, body, sent_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![sender, recipient, subject, body, now_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn inbox(conn: &Connection, recipient: &str, unread_only: bool) -> AppResult<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender, recipient, subject, body, sent_at, read_at FROM messages
         WHERE recipient = ?1 AND (?2 = 0 OR read_at IS NULL)
         ORDER BY id DESC",
    )?;
    let rows = stmt.query_map(params![recipient, unread_only], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn get_message(conn: &Connection, id: i64) -> AppResult<Option<Message>> {
    Ok(conn
        .query_row(
            "SELECT id, sender, recipient, subject, body, sent_at, read_at FROM messages WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?)
}

pub fn mark_read(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE messages SET read_at = ?1 WHERE id = ?2 AND read_at IS NULL",
        params![now_rfc3339(), id],
    )?)
}
