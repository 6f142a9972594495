// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::LegExport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON envelope: when it was produced, how many legs, the legs.
#[derive(Serialize)]
struct LegDocument<'a> {
    exported_at: String,
    count: usize,
    legs: &'a [LegExport],
}

fn export_err(stage: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Export(format!("{stage}: {e}"))
}

pub(crate) fn export_json(legs: &[LegExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let doc = LegDocument {
        exported_at: Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        count: legs.len(),
        legs,
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &doc).map_err(|e| export_err("JSON", e))?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with one row per leg; the header row comes from the serde field names.
pub(crate) fn export_csv(legs: &[LegExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path).map_err(|e| export_err("CSV open", e))?;
    legs.iter()
        .try_for_each(|leg| wtr.serialize(leg))
        .map_err(|e| export_err("CSV write", e))?;
    wtr.flush().map_err(|e| export_err("CSV flush", e))?;

    notify_export_success("CSV", path);
    Ok(())
}
