// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{
    CLOCK_FORMAT, DATE_FORMAT, DURATION_FORMAT, clock_fraction, date_serial, duration_fraction,
};
use crate::export::model::LegExport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::utility::column_number_to_name;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Typed worksheet cell.
enum Cell {
    Text(String),
    Date(String),
    Clock(String),
    Duration(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

impl Cell {
    fn display_width(&self) -> usize {
        match self {
            Cell::Text(s) | Cell::Date(s) | Cell::Clock(s) | Cell::Duration(s) => {
                UnicodeWidthStr::width(s.as_str()).max(5)
            }
            Cell::Number(_) => 9,
            Cell::Integer(_) => 4,
            Cell::Flag(_) => 3,
        }
    }
}

/// Column header and whether the footer row sums it.
const COLUMNS: &[(&str, bool)] = &[
    ("ID", false),
    ("Aeronave", false),
    ("Data", false),
    ("De", false),
    ("Para", false),
    ("DEP", false),
    ("POU", false),
    ("Voo", true),
    ("Diurno", true),
    ("Noturno", true),
    ("IFR", true),
    ("Pousos", true),
    ("Abastecido", true),
    ("Restante", false),
    ("Consumo", true),
    ("Célula", true),
    ("PIC", false),
    ("SIC", false),
    ("Cliente", false),
    ("Diária", false),
    ("Confirmado", false),
];

fn leg_cells(l: &LegExport) -> Vec<Cell> {
    vec![
        Cell::Integer(l.id),
        Cell::Text(l.registration.clone()),
        Cell::Date(l.date.clone()),
        Cell::Text(l.departure.clone()),
        Cell::Text(l.arrival.clone()),
        Cell::Clock(l.dep.clone()),
        Cell::Clock(l.pou.clone()),
        Cell::Duration(l.flight.clone()),
        Cell::Duration(l.day.clone()),
        Cell::Duration(l.night.clone()),
        Cell::Duration(l.ifr.clone()),
        Cell::Integer(i64::from(l.landings)),
        Cell::Number(l.fuel_added),
        Cell::Number(l.fuel_remaining),
        l.fuel_used.map(Cell::Number).unwrap_or(Cell::Text(String::new())),
        Cell::Number(l.cell_delta),
        Cell::Text(l.pic.clone()),
        Cell::Text(l.sic.clone()),
        Cell::Text(l.client.clone()),
        Cell::Flag(l.daily_rate),
        Cell::Flag(l.confirmed),
    ]
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<()> {
    let fmt = base_format(bg);

    let result = match cell {
        Cell::Date(s) => match date_serial(s) {
            Some(serial) => ws.write_with_format(row, col, serial, &fmt.set_num_format(DATE_FORMAT)),
            None => ws.write_with_format(row, col, s.as_str(), &fmt),
        },
        Cell::Clock(s) => match clock_fraction(s) {
            Some(v) => ws.write_with_format(row, col, v, &fmt.set_num_format(CLOCK_FORMAT)),
            None => ws.write_with_format(row, col, "", &fmt),
        },
        Cell::Duration(s) => ws.write_with_format(
            row,
            col,
            duration_fraction(s),
            &fmt.set_num_format(DURATION_FORMAT),
        ),
        Cell::Number(v) => ws.write_with_format(
            row,
            col,
            *v,
            &fmt.set_num_format("0.00").set_align(FormatAlign::Right),
        ),
        Cell::Integer(v) => ws.write_with_format(row, col, *v as f64, &fmt.set_align(FormatAlign::Right)),
        Cell::Flag(b) => ws.write_with_format(
            row,
            col,
            if *b { "sim" } else { "não" },
            &fmt.set_align(FormatAlign::Center),
        ),
        Cell::Text(s) => ws.write_with_format(row, col, s.as_str(), &fmt),
    };

    result.map(|_| ()).map_err(xlsx_err)
}

/// Styled XLSX export: typed cells (dates, clock times, `[h]:mm` durations,
/// numbers) and a footer row with `SUM` formulas over the hour, landing,
/// fuel and cell columns.
pub(crate) fn export_xlsx(legs: &[LegExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Diário de bordo").map_err(xlsx_err)?;

    // 1. Header
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x1F4E79))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, (title, _)) in COLUMNS.iter().enumerate() {
        ws.write_with_format(0, col as u16, *title, &header_format)
            .map_err(xlsx_err)?;
    }
    ws.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    // 2. One row per leg, banded
    let mut widths: Vec<usize> = COLUMNS.iter().map(|(t, _)| UnicodeWidthStr::width(*t)).collect();

    for (i, leg) in legs.iter().enumerate() {
        let row = (i + 1) as u32;
        let bg = if i % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        for (col, cell) in leg_cells(leg).iter().enumerate() {
            write_cell(ws, row, col as u16, cell, bg)?;
            widths[col] = widths[col].max(cell.display_width());
        }
    }

    // 3. Totals
    if !legs.is_empty() {
        let total_row = (legs.len() + 1) as u32;
        let last_data_row = legs.len() + 1;
        let bold = Format::new().set_bold().set_border_top(FormatBorder::Thin);

        ws.write_with_format(total_row, 0, "Total", &bold)
            .map_err(xlsx_err)?;

        for (col, (title, summed)) in COLUMNS.iter().enumerate() {
            if !summed {
                continue;
            }
            let letter = column_number_to_name(col as u16);
            let fmt = match *title {
                "Voo" | "Diurno" | "Noturno" | "IFR" => bold.clone().set_num_format(DURATION_FORMAT),
                "Pousos" => bold.clone(),
                _ => bold.clone().set_num_format("0.00"),
            };
            ws.write_formula_with_format(
                total_row,
                col as u16,
                format!("=SUM({letter}2:{letter}{last_data_row})").as_str(),
                &fmt,
            )
            .map_err(xlsx_err)?;
        }
    }

    for (c, w) in widths.iter().enumerate() {
        ws.set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_err)?;
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| AppError::Export(format!("non UTF-8 path: {}", path.display())))?;
    workbook.save(path_str).map_err(xlsx_err)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn xlsx_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX: {e}"))
}
