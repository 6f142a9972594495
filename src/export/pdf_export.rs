// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::LegExport;
use crate::export::notify_export_success;
use crate::export::pdf::{A4, PdfManager};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

const PDF_HEADERS: [&str; 12] = [
    "Data", "Aeronave", "Trecho", "DEP", "POU", "Voo", "Noturno", "IFR", "Pousos", "Célula",
    "PIC", "Cliente",
];

fn leg_to_pdf_row(l: &LegExport) -> Vec<String> {
    vec![
        l.date.clone(),
        l.registration.clone(),
        format!("{}-{}", l.departure, l.arrival),
        l.dep.clone(),
        l.pou.clone(),
        l.flight.clone(),
        l.night.clone(),
        l.ifr.clone(),
        l.landings.to_string(),
        format!("{:.2}", l.cell_delta),
        l.pic.clone(),
        l.client.clone(),
    ]
}

/// Logbook table on A4 landscape pages.
pub(crate) fn export_pdf(legs: &[LegExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let rows: Vec<Vec<String>> = legs.iter().map(leg_to_pdf_row).collect();

    let mut pdf = PdfManager::with_page((A4.1, A4.0), 40.0);
    pdf.write_table(title, &PDF_HEADERS, &rows);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}
