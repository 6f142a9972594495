//! Client portal: passwordless access for co-owners using the first four
//! CNPJ digits plus the aircraft registration. A successful login issues a
//! random token; only its blake3 hash is stored, with an expiry.

use crate::core::calculator::totals::FlightTotals;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::{aircraft, clients, logbook, portal_sessions, receipts};
use crate::errors::{AppError, AppResult};
use crate::models::aircraft::Aircraft;
use crate::models::client::Client;
use crate::models::logbook_entry::LogbookEntry;
use crate::models::portal_session::PortalSession;
use crate::models::receipt::Receipt;
use crate::utils::documents::digits_only;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::RngCore;
use rusqlite::Connection;

pub const CNPJ_PREFIX_LEN: usize = 4;
const TOKEN_BYTES: usize = 32;

/// Match a visitor to a client row. Every failure maps to the same
/// `PortalLoginFailed` error.
pub fn lookup(conn: &Connection, cnpj_prefix: &str, registration: &str) -> AppResult<(Client, Aircraft)> {
    let prefix = cnpj_prefix.trim();
    if prefix.len() != CNPJ_PREFIX_LEN || digits_only(prefix) != prefix {
        return Err(AppError::PortalLoginFailed);
    }

    let Some(a) = aircraft::find_by_registration(conn, registration.trim())? else {
        return Err(AppError::PortalLoginFailed);
    };

    let client = clients::list_clients_by_aircraft(conn, a.id)?
        .into_iter()
        .find(|c| digits_only(&c.cnpj).starts_with(prefix))
        .ok_or(AppError::PortalLoginFailed)?;

    Ok((client, a))
}

pub fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    blake3::hash(token.trim().as_bytes()).to_hex().to_string()
}

/// Result of a successful login. The token is shown once and never stored.
#[derive(Debug, Clone)]
pub struct PortalLogin {
    pub token: String,
    pub session: PortalSession,
}

#[derive(Debug, Clone)]
pub struct PortalSummary {
    pub session: PortalSession,
    pub legs: Vec<LogbookEntry>,
    pub aircraft_totals: FlightTotals,
    pub client_totals: FlightTotals,
    pub cell_hours: Option<f64>,
    pub receipts: Vec<Receipt>,
}

pub struct PortalLogic;

impl PortalLogic {
    pub fn login(
        pool: &mut DbPool,
        cnpj_prefix: &str,
        registration: &str,
        ttl_hours: i64,
        now: DateTime<Utc>,
    ) -> AppResult<PortalLogin> {
        let conn = &pool.conn;

        let (client, a) = match lookup(conn, cnpj_prefix, registration) {
            Ok(found) => found,
            Err(e) => {
                audit_or_warn(conn, "portal_login_failed", registration.trim(), "Login rejected");
                return Err(e);
            }
        };

        let expires_at = TimeDelta::try_hours(ttl_hours)
            .filter(|_| ttl_hours > 0)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "portal_session_hours must be a positive number of hours, got {ttl_hours}"
                ))
            })?;

        let token = new_token();
        let id = portal_sessions::insert_session(
            conn,
            &hash_token(&token),
            client.id,
            a.id,
            now,
            expires_at,
        )?;

        audit_or_warn(
            conn,
            "portal_login",
            &a.registration,
            &format!("Session #{} for {}", id, client.name),
        );

        Ok(PortalLogin {
            token,
            session: PortalSession {
                id,
                client_id: client.id,
                aircraft_id: a.id,
                client_name: client.name,
                registration: a.registration,
                created_at: now,
                expires_at,
            },
        })
    }

    /// Resolve a token to its session. Unknown, revoked and expired tokens
    /// are all `PortalSessionInvalid`.
    pub fn validate(conn: &Connection, token: &str, now: DateTime<Utc>) -> AppResult<PortalSession> {
        let session = portal_sessions::find_active_by_hash(conn, &hash_token(token))?
            .ok_or(AppError::PortalSessionInvalid)?;

        if session.is_expired_at(now) {
            return Err(AppError::PortalSessionInvalid);
        }
        Ok(session)
    }

    pub fn summary(
        pool: &mut DbPool,
        token: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
        now: DateTime<Utc>,
    ) -> AppResult<PortalSummary> {
        let conn = &pool.conn;
        let session = Self::validate(conn, token, now)?;

        let legs = logbook::load_all_entries(conn, Some(session.aircraft_id), bounds)?;
        let aircraft_totals = FlightTotals::from_entries(&legs);
        let client_totals = FlightTotals::from_entries(
            legs.iter()
                .filter(|e| e.client_id == Some(session.client_id)),
        );

        let cell_hours = logbook::list_months(conn, session.aircraft_id)?
            .last()
            .map(|m| m.cell_end);

        let receipts = receipts::list_receipts(conn, bounds)?
            .into_iter()
            .filter(|r| r.client_id == Some(session.client_id))
            .collect();

        Ok(PortalSummary {
            session,
            legs,
            aircraft_totals,
            client_totals,
            cell_hours,
            receipts,
        })
    }

    pub fn logout(pool: &mut DbPool, token: &str, now: DateTime<Utc>) -> AppResult<PortalSession> {
        let conn = &pool.conn;
        let session = Self::validate(conn, token, now)?;

        portal_sessions::revoke(conn, session.id)?;
        audit_or_warn(
            conn,
            "portal_logout",
            &session.registration,
            &format!("Session #{} revoked", session.id),
        );
        Ok(session)
    }
}
