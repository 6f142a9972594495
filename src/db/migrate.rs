//! Schema migrations.
//!
//! Every migration has a version tag. Once applied, a `migration_applied`
//! row with that tag is written to the `log` table, inside the same
//! transaction as the schema change, so each one runs exactly once.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created aircraft, clients, crew, aerodromes, logbook, receipts, messages and portal tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS aircraft (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            registration        TEXT NOT NULL UNIQUE,
            model               TEXT NOT NULL DEFAULT '',
            serial_number       TEXT NOT NULL DEFAULT '',
            initial_cell_hours  REAL NOT NULL DEFAULT 0,
            active              INTEGER NOT NULL DEFAULT 1,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clients (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            cnpj           TEXT NOT NULL,
            aircraft_id    INTEGER REFERENCES aircraft(id),
            share_percent  REAL CHECK(share_percent IS NULL OR (share_percent >= 0 AND share_percent <= 100)),
            email          TEXT NOT NULL DEFAULT '',
            phone          TEXT NOT NULL DEFAULT '',
            birth_date     TEXT,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_clients_aircraft ON clients(aircraft_id);

        CREATE TABLE IF NOT EXISTS crew_members (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            canac       TEXT NOT NULL UNIQUE,
            function    TEXT NOT NULL DEFAULT 'pic' CHECK(function IN ('pic','sic','mechanic','dispatcher')),
            birth_date  TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS aerodromes (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            icao   TEXT NOT NULL UNIQUE,
            name   TEXT NOT NULL DEFAULT '',
            city   TEXT NOT NULL DEFAULT '',
            state  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS logbook_months (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            aircraft_id  INTEGER NOT NULL REFERENCES aircraft(id),
            year         INTEGER NOT NULL,
            month        INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            cell_start   REAL NOT NULL DEFAULT 0,
            cell_end     REAL NOT NULL DEFAULT 0,
            closed       INTEGER NOT NULL DEFAULT 0,
            closed_at    TEXT,
            closed_by    TEXT,
            UNIQUE(aircraft_id, year, month)
        );

        CREATE TABLE IF NOT EXISTS logbook_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            aircraft_id     INTEGER NOT NULL REFERENCES aircraft(id),
            date            TEXT NOT NULL,
            departure       TEXT NOT NULL REFERENCES aerodromes(icao),
            arrival         TEXT NOT NULL REFERENCES aerodromes(icao),
            time_ac         TEXT,
            time_dep        TEXT,
            time_pou        TEXT,
            time_cor        TEXT,
            flight_hours    REAL NOT NULL DEFAULT 0,
            day_hours       REAL NOT NULL DEFAULT 0,
            night_hours     REAL NOT NULL DEFAULT 0,
            ifr_hours       REAL NOT NULL DEFAULT 0,
            landings        INTEGER NOT NULL DEFAULT 1,
            fuel_added      REAL NOT NULL DEFAULT 0,
            fuel_remaining  REAL NOT NULL DEFAULT 0,
            cell_delta      REAL NOT NULL DEFAULT 0,
            pic_canac       TEXT REFERENCES crew_members(canac),
            sic_canac       TEXT REFERENCES crew_members(canac),
            daily_rate      INTEGER NOT NULL DEFAULT 0,
            client_id       INTEGER REFERENCES clients(id),
            confirmed       INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_logbook_aircraft_date ON logbook_entries(aircraft_id, date);

        CREATE TABLE IF NOT EXISTS receipts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            year            INTEGER NOT NULL,
            seq             INTEGER NOT NULL,
            client_id       INTEGER REFERENCES clients(id),
            payer_name      TEXT NOT NULL,
            payer_document  TEXT NOT NULL DEFAULT '',
            description     TEXT NOT NULL,
            amount_cents    INTEGER NOT NULL CHECK(amount_cents > 0),
            issue_date      TEXT NOT NULL,
            city            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL,
            UNIQUE(year, seq)
        );

        CREATE TABLE IF NOT EXISTS messages (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            sender     TEXT NOT NULL,
            recipient  TEXT NOT NULL,
            subject    TEXT NOT NULL DEFAULT '',
            body       TEXT NOT NULL DEFAULT '',
            sent_at    TEXT NOT NULL,
            read_at    TEXT
        );

        CREATE TABLE IF NOT EXISTS portal_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            token_hash   TEXT NOT NULL UNIQUE,
            client_id    INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            aircraft_id  INTEGER NOT NULL REFERENCES aircraft(id) ON DELETE CASCADE,
            created_at   TEXT NOT NULL,
            expires_at   TEXT NOT NULL,
            revoked      INTEGER NOT NULL DEFAULT 0
        );
        "#,
    },
    Migration {
        version: "20250612_0002_add_crew_medical_expiry",
        description: "Added medical_expiry to crew_members",
        sql: "ALTER TABLE crew_members ADD COLUMN medical_expiry TEXT;",
    },
    Migration {
        version: "20250904_0003_messages_inbox_index",
        description: "Added inbox index on messages",
        sql: "CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages(recipient, read_at);",
    },
];

/// Ensure that the `log` table exists: it doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let to_migration_err = |e: rusqlite::Error| AppError::Migration(format!("{}: {}", m.version, e));

    let tx = conn.unchecked_transaction().map_err(to_migration_err)?;
    tx.execute_batch(m.sql).map_err(to_migration_err)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )
    .map_err(to_migration_err)?;
    tx.commit().map_err(to_migration_err)?;

    Ok(())
}

/// Versions not yet applied on this database.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}
