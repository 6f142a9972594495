pub mod aerodrome;
pub mod aircraft;
pub mod backup;
pub mod birthdays;
pub mod client;
pub mod config;
pub mod crew;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod logbook;
pub mod message;
pub mod portal;
pub mod receipt;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
