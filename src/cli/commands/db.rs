use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config, op: &Operator) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        if *migrate || *vacuum {
            op.require(Action::ManageDatabase)?;
        }

        // no automatic migrations here: `db --migrate` is the explicit path
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            let pending = pending_migrations(&pool.conn)?;
            if pending.is_empty() {
                info("No pending migrations.");
            } else {
                info(format!("Running migrations: {}", pending.join(", ")));
                let applied = run_pending_migrations(&pool.conn)?;
                success(format!("Migration completed ({applied} applied)."));
            }
        }

        //
        // 2) INFO
        //
        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            info("Running integrity check…");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            audit_or_warn(&pool.conn, "vacuum", "database", "VACUUM completed");
            success("Vacuum completed.");
        }
    }

    Ok(())
}
