use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::permissions::Operator;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        BackupLogic::backup(&mut pool, op, &cfg.database, file, *compress, *force)?;
    }

    Ok(())
}
