// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Gate for every file the program writes (exports, receipts, backups).
/// Directories are refused; an existing file is replaced only with
/// `force` or after a `y` on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.is_dir() {
        return Err(AppError::InvalidInput(format!(
            "'{}' is a directory, expected a file path",
            path.display()
        )));
    }

    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    if confirm_overwrite(io::stdin().lock())? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export("cancelled, existing file kept".into()))
    }
}

/// One answer line; anything but `y`/`yes` (or end of input) means no.
fn confirm_overwrite<R: BufRead>(mut input: R) -> AppResult<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
