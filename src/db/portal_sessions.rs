use crate::db::queries::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::portal_session::PortalSession;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn get_utc(row: &Row, name: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

pub fn insert_session(
    conn: &Connection,
    token_hash: &str,
    client_id: i64,
    aircraft_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO portal_sessions (token_hash, client_id, aircraft_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            token_hash,
            client_id,
            aircraft_id,
            created_at.to_rfc3339(),
            expires_at.to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up a non-revoked session by token hash, joined with its display strings.
pub fn find_active_by_hash(conn: &Connection, token_hash: &str) -> AppResult<Option<PortalSession>> {
    let session = conn
        .query_row(
            "SELECT s.id, s.client_id, s.aircraft_id, s.created_at, s.expires_at,
                    c.name AS client_name, a.registration
             FROM portal_sessions s
             JOIN clients c ON c.id = s.client_id
             JOIN aircraft a ON a.id = s.aircraft_id
             WHERE s.token_hash = ?1 AND s.revoked = 0",
            [token_hash],
            |row| {
                Ok(PortalSession {
                    id: row.get("id")?,
                    client_id: row.get("client_id")?,
                    aircraft_id: row.get("aircraft_id")?,
                    client_name: row.get("client_name")?,
                    registration: row.get("registration")?,
                    created_at: get_utc(row, "created_at")?,
                    expires_at: get_utc(row, "expires_at")?,
                })
            },
        )
        .optional()?;
    Ok(session)
}

pub fn revoke(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE portal_sessions SET revoked = 1 WHERE id = ?1 AND revoked = 0",
        [id],
    )?)
}
