use crate::db::queries::{collect_rows, map_foreign_key, now_rfc3339};
use crate::errors::AppResult;
use crate::models::client::Client;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, name, cnpj, aircraft_id, share_percent, email, phone, birth_date";

fn map_row(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        cnpj: row.get("cnpj")?,
        aircraft_id: row.get("aircraft_id")?,
        share_percent: row.get("share_percent")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        birth_date: row.get("birth_date")?,
    })
}

pub fn insert_client(conn: &Connection, c: &Client) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clients (name, cnpj, aircraft_id, share_percent, email, phone, birth_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.name,
            c.cnpj,
            c.aircraft_id,
            c.share_percent,
            c.email,
            c.phone,
            c.birth_date,
            now_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_client(conn: &Connection, id: i64) -> AppResult<Option<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn list_clients(conn: &Connection) -> AppResult<Vec<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients ORDER BY name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn list_clients_by_aircraft(conn: &Connection, aircraft_id: i64) -> AppResult<Vec<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients WHERE aircraft_id = ?1 ORDER BY name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([aircraft_id], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn delete_client(conn: &Connection, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM clients WHERE id = ?1", [id])
        .map_err(|e| map_foreign_key(e, "Client"))
}
