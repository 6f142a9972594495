// src/export/logic.rs

use crate::core::permissions::{Action, Operator};
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::{aircraft, clients, logbook};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{LegExport, legs_to_export};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::{YearMonth, month_name};
use crate::utils::period::parse_optional_period;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export logbook legs.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`,
    ///   and `A:B` ranges of the same shape
    /// - `registration`: limit to one aircraft
    ///
    /// Returns the number of legs written.
    pub fn export(
        pool: &mut DbPool,
        op: &Operator,
        format: ExportFormat,
        file: &str,
        range: Option<&String>,
        registration: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        op.require(Action::ExportData)?;

        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        let bounds = parse_optional_period(range)?;
        let legs = load_legs(pool, registration, bounds)?;

        if legs.is_empty() {
            warning("No logbook legs found for selected range.");
            return Ok(0);
        }

        if !format.matches_path(path) {
            warning(format!(
                "Writing {format} to '{}' (extension is not .{})",
                path.display(),
                format.extension()
            ));
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&legs, path)?,
            ExportFormat::Json => export_json(&legs, path)?,
            ExportFormat::Xlsx => export_xlsx(&legs, path)?,
            ExportFormat::Pdf => export_pdf(&legs, path, &build_pdf_title(range, registration))?,
        }

        audit_or_warn(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} legs as {}", legs.len(), format.extension()),
        );

        Ok(legs.len())
    }
}

/// PDF title from the selected period and aircraft.
fn build_pdf_title(range: Option<&String>, registration: Option<&str>) -> String {
    let period = match range.map(|r| r.trim()) {
        None => String::new(),
        Some(r) if r.eq_ignore_ascii_case("all") => String::new(),
        Some(r) => match r.len() {
            4 => format!(" – {r}"),
            7 => match YearMonth::parse(r) {
                Ok(ym) => format!(" – {} {}", month_name(ym.month()), ym.year()),
                Err(_) => format!(" – {r}"),
            },
            _ => match r.split_once(':') {
                Some((a, b)) => format!(" – {a} a {b}"),
                None => format!(" – {r}"),
            },
        },
    };

    match registration {
        Some(reg) => format!("Diário de bordo {}{}", reg.to_uppercase(), period),
        None => format!("Diário de bordo{}", period),
    }
}

fn load_legs(
    pool: &mut DbPool,
    registration: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<LegExport>> {
    let conn = &pool.conn;

    let aircraft_id = match registration {
        Some(r) => Some(aircraft::require_by_registration(conn, r)?.id),
        None => None,
    };

    let entries = logbook::load_all_entries(conn, aircraft_id, bounds)?;

    let registrations: HashMap<i64, String> = aircraft::list_aircraft(conn)?
        .into_iter()
        .map(|a| (a.id, a.registration))
        .collect();
    let client_names: HashMap<i64, String> = clients::list_clients(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(legs_to_export(&entries, &registrations, &client_names))
}
