use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: &[(&str, &str)] = &[
    ("aircraft", "Aircraft"),
    ("clients", "Clients"),
    ("crew_members", "Crew members"),
    ("aerodromes", "Aerodromes"),
    ("logbook_entries", "Logbook legs"),
    ("logbook_months", "Logbook months"),
    ("receipts", "Receipts"),
    ("messages", "Messages"),
];

pub fn count_rows(pool: &DbPool, table: &str) -> AppResult<i64> {
    // table names come from COUNTED_TABLES only
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(pool.conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    for (table, label) in COUNTED_TABLES {
        let count = count_rows(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM logbook_entries ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM logbook_entries ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Logbook range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    let open_months: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM logbook_months WHERE closed = 0",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Open months:{} {}{}{}",
        CYAN, RESET, YELLOW, open_months, RESET
    );

    println!();
    Ok(())
}
