use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path of the file that was kept.
    pub fn backup(
        pool: &mut DbPool,
        op: &Operator,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        op.require(Action::ManageDatabase)?;

        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        // 1. Check DB exists
        if !src.exists() {
            return Err(AppError::NotFound(format!("Database {}", src.display())));
        }

        // 2. Ensure destination folder exists, confirm overwrite
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        ensure_writable(dest, force)?;

        // 3. Copy database
        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 4. Optional compression
        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest {
                match fs::remove_file(dest) {
                    Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                    Err(e) => warning(format!("Failed to remove uncompressed backup: {}", e)),
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        // 5. Audit
        audit_or_warn(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }
}

fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "aerodesk.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
