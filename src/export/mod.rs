// src/export/mod.rs

mod excel_date;
pub(crate) mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
pub mod pdf;
mod pdf_export;
pub mod receipt_pdf;
pub mod text_metrics;
mod xlsx;

pub use logic::ExportLogic;
pub use model::LegExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::fmt;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Output formats of `export`, one writer each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// File extension, also used as the audit label.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// True when `path` ends in this format's extension (case-insensitive).
    pub fn matches_path(self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}
