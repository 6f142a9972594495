use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::permissions::Operator;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        aircraft,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        ExportLogic::export(
            &mut pool,
            op,
            *format,
            file,
            range.as_ref(),
            aircraft.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
