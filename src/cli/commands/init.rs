use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // 1. Config dir, config file, empty DB file
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    info("Initializing aerodesk…");
    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Database    : {}", db_path));

    // 2. Schema through the migration engine
    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success(format!("Database initialized at {}", db_path));

    // 3. Audit (non blocking)
    audit_or_warn(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", db_path),
    );

    Ok(())
}
