use crate::db::queries::{collect_rows, conversion_error, map_foreign_key, map_unique, now_rfc3339};
use crate::errors::{AppError, AppResult};
use crate::models::crew::{CrewFunction, CrewMember};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, name, canac, function, birth_date, medical_expiry";

fn map_row(row: &Row) -> rusqlite::Result<CrewMember> {
    let function_str: String = row.get("function")?;
    let function = CrewFunction::from_db_str(&function_str).ok_or_else(|| {
        conversion_error(
            3,
            AppError::InvalidInput(format!("crew function '{function_str}'")),
        )
    })?;

    Ok(CrewMember {
        id: row.get("id")?,
        name: row.get("name")?,
        canac: row.get("canac")?,
        function,
        birth_date: row.get("birth_date")?,
        medical_expiry: row.get("medical_expiry")?,
    })
}

pub fn insert_crew(conn: &Connection, c: &CrewMember) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO crew_members (name, canac, function, birth_date, medical_expiry, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            c.name,
            c.canac,
            c.function.to_db_str(),
            c.birth_date,
            c.medical_expiry,
            now_rfc3339()
        ],
    )
    .map_err(|e| map_unique(e, &format!("Crew member with CANAC {}", c.canac)))?;

    Ok(conn.last_insert_rowid())
}

pub fn find_by_canac(conn: &Connection, canac: &str) -> AppResult<Option<CrewMember>> {
    let sql = format!("SELECT {COLUMNS} FROM crew_members WHERE canac = ?1");
    Ok(conn.query_row(&sql, [canac.trim()], map_row).optional()?)
}

pub fn list_crew(conn: &Connection) -> AppResult<Vec<CrewMember>> {
    let sql = format!("SELECT {COLUMNS} FROM crew_members ORDER BY name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;
    Ok(collect_rows(rows)?)
}

pub fn delete_crew(conn: &Connection, canac: &str) -> AppResult<usize> {
    conn.execute("DELETE FROM crew_members WHERE canac = ?1", [canac])
        .map_err(|e| map_foreign_key(e, &format!("Crew member {canac}")))
}
