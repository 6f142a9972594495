//! Receipt storage and per-year number allocation.

use crate::db::queries::{collect_rows, date_str, get_date, now_rfc3339};
use crate::errors::{AppError, AppResult};
use crate::models::receipt::Receipt;
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};

const COLUMNS: &str = "id, year, seq, client_id, payer_name, payer_document, description, \
     amount_cents, issue_date, city, created_at";

fn map_row(row: &Row) -> rusqlite::Result<Receipt> {
    Ok(Receipt {
        id: row.get("id")?,
        year: row.get("year")?,
        seq: row.get("seq")?,
        client_id: row.get("client_id")?,
        payer_name: row.get("payer_name")?,
        payer_document: row.get("payer_document")?,
        description: row.get("description")?,
        amount_cents: row.get("amount_cents")?,
        issue_date: get_date(row, "issue_date")?,
        city: row.get("city")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a receipt with the next number of its issue year.
///
/// The read of `MAX(seq)` and the insert run inside one IMMEDIATE
/// transaction, so concurrent writers serialize on the database lock;
/// `UNIQUE(year, seq)` rejects anything that slips through.
pub fn insert_with_next_number(conn: &mut Connection, draft: &Receipt) -> AppResult<Receipt> {
    let year = draft.issue_date.year();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let seq: i64 = tx.query_row(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM receipts WHERE year = ?1",
        [year],
        |row| row.get(0),
    )?;

    let created_at = now_rfc3339();
    tx.execute(
        "INSERT INTO receipts (year, seq, client_id, payer_name, payer_document, description,
             amount_cents, issue_date, city, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            year,
            seq,
            draft.client_id,
            draft.payer_name,
            draft.payer_document,
            draft.description,
            draft.amount_cents,
            date_str(&draft.issue_date),
            draft.city,
            created_at,
        ],
    )
    .map_err(|e| AppError::ReceiptNumbering(format!("{seq:03}/{year}: {e}")))?;

    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Receipt {
        id,
        year,
        seq,
        created_at,
        ..draft.clone()
    })
}

pub fn find_by_number(conn: &Connection, seq: i64, year: i32) -> AppResult<Option<Receipt>> {
    let sql = format!("SELECT {COLUMNS} FROM receipts WHERE seq = ?1 AND year = ?2");
    Ok(conn.query_row(&sql, params![seq, year], map_row).optional()?)
}

pub fn list_receipts(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Receipt>> {
    let (from, to) = bounds
        .map(|(a, b)| (date_str(&a), date_str(&b)))
        .unwrap_or_else(|| ("0000-01-01".to_string(), "9999-12-31".to_string()));

    let sql = format!(
        "SELECT {COLUMNS} FROM receipts
         WHERE issue_date BETWEEN ?1 AND ?2
         ORDER BY year ASC, seq ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![from, to], map_row)?;
    Ok(collect_rows(rows)?)
}
