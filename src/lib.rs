//! aerodesk library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use core::permissions::Operator;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;

    match cmd {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(cmd, cfg),
        Commands::Log { .. } => return commands::log::handle(cmd, cfg),
        Commands::Portal { .. } => return commands::portal::handle(cmd, cfg),
        Commands::Birthdays { .. } => return commands::birthdays::handle(cmd, cfg),
        _ => {}
    }

    let op = Operator::resolve(cfg, &cli.role)?;

    match cmd {
        Commands::Db { .. } => commands::db::handle(cmd, cfg, &op),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg, &op),
        Commands::Export { .. } => commands::export::handle(cmd, cfg, &op),
        Commands::Aircraft { .. } => commands::aircraft::handle(cmd, cfg, &op),
        Commands::Client { .. } => commands::client::handle(cmd, cfg, &op),
        Commands::Crew { .. } => commands::crew::handle(cmd, cfg, &op),
        Commands::Aerodrome { .. } => commands::aerodrome::handle(cmd, cfg, &op),
        Commands::Logbook { .. } => commands::logbook::handle(cmd, cfg, &op),
        Commands::Receipt { .. } => commands::receipt::handle(cmd, cfg, &op),
        Commands::Message { .. } => commands::message::handle(cmd, cfg, &op),
        Commands::Init
        | Commands::Config { .. }
        | Commands::Log { .. }
        | Commands::Portal { .. }
        | Commands::Birthdays { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1. Parse CLI
    let cli = Cli::parse();

    // 2. Load config once
    let mut cfg = Config::load()?;

    // 3. Command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4. Dispatch
    dispatch(&cli, &cfg)
}
