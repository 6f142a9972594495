use crate::db::queries::{collect_rows, get_bool, map_foreign_key, map_unique, now_rfc3339};
use crate::errors::{AppError, AppResult};
use crate::models::aircraft::Aircraft;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, registration, model, serial_number, initial_cell_hours, active";

fn map_row(row: &Row) -> rusqlite::Result<Aircraft> {
    Ok(Aircraft {
        id: row.get("id")?,
        registration: row.get("registration")?,
        model: row.get("model")?,
        serial_number: row.get("serial_number")?,
        initial_cell_hours: row.get("initial_cell_hours")?,
        active: get_bool(row, "active")?,
    })
}

pub fn insert_aircraft(conn: &Connection, a: &Aircraft) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO aircraft (registration, model, serial_number, initial_cell_hours, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            a.registration,
            a.model,
            a.serial_number,
            a.initial_cell_hours,
            a.active,
            now_rfc3339()
        ],
    )
    .map_err(|e| map_unique(e, &format!("Aircraft {}", a.registration)))?;

    Ok(conn.last_insert_rowid())
}

/// Exact, case-insensitive registration match.
pub fn find_by_registration(conn: &Connection, registration: &str) -> AppResult<Option<Aircraft>> {
    let sql = format!("SELECT {COLUMNS} FROM aircraft WHERE UPPER(registration) = UPPER(?1)");
    let a = conn
        .query_row(&sql, [registration.trim()], map_row)
        .optional()?;
    Ok(a)
}

pub fn require_by_registration(conn: &Connection, registration: &str) -> AppResult<Aircraft> {
    find_by_registration(conn, registration)?
        .ok_or_else(|| AppError::NotFound(format!("Aircraft {}", registration.trim().to_uppercase())))
}

pub fn get_aircraft(conn: &Connection, id: i64) -> AppResult<Option<Aircraft>> {
    let sql = format!("SELECT {COLUMNS} FROM aircraft WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn list_aircraft(conn: &Connection) -> AppResult<Vec<Aircraft>> {
    let sql = format!("SELECT {COLUMNS} FROM aircraft ORDER BY registration ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn set_active(conn: &Connection, id: i64, active: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE aircraft SET active = ?1 WHERE id = ?2",
        params![active, id],
    )?)
}

/// Open month headers with no legs are created just by viewing a month;
/// they go with the aircraft. Legs and closed months still block the delete.
pub fn delete_aircraft(conn: &Connection, id: i64) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM logbook_months
         WHERE aircraft_id = ?1 AND closed = 0
           AND NOT EXISTS (SELECT 1 FROM logbook_entries e WHERE e.aircraft_id = ?1)",
        [id],
    )?;
    let n = tx
        .execute("DELETE FROM aircraft WHERE id = ?1", [id])
        .map_err(|e| map_foreign_key(e, "Aircraft"))?;
    tx.commit()?;
    Ok(n)
}
