use crate::db::queries::{collect_rows, map_foreign_key, map_unique};
use crate::errors::AppResult;
use crate::models::aerodrome::Aerodrome;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Aerodrome> {
    Ok(Aerodrome {
        id: row.get("id")?,
        icao: row.get("icao")?,
        name: row.get("name")?,
        city: row.get("city")?,
        state: row.get("state")?,
    })
}

pub fn insert_aerodrome(conn: &Connection, a: &Aerodrome) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO aerodromes (icao, name, city, state) VALUES (?1, ?2, ?3, ?4)",
        params![a.icao, a.name, a.city, a.state],
    )
    .map_err(|e| map_unique(e, &format!("Aerodrome {}", a.icao)))?;

    Ok(conn.last_insert_rowid())
}

pub fn find_by_icao(conn: &Connection, icao: &str) -> AppResult<Option<Aerodrome>> {
    Ok(conn
        .query_row(
            "SELECT id, icao, name, city, state FROM aerodromes WHERE icao = ?1",
            [icao.trim().to_uppercase()],
            map_row,
        )
        .optional()?)
}

pub fn list_aerodromes(conn: &Connection) -> AppResult<Vec<Aerodrome>> {
    let mut stmt =
        conn.prepare("SELECT id, icao, name, city, state FROM aerodromes ORDER BY icao ASC")?;
    let rows = stmt.query_map([], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn delete_aerodrome(conn: &Connection, icao: &str) -> AppResult<usize> {
    conn.execute("DELETE FROM aerodromes WHERE icao = ?1", [icao])
        .map_err(|e| map_foreign_key(e, &format!("Aerodrome {icao}")))
}
