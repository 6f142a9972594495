use crate::core::calculator::cell::CellProjection;
use crate::utils::date::YearMonth;
use serde::Serialize;

/// Per (aircraft, year, month) header of the logbook.
#[derive(Debug, Clone, Serialize)]
pub struct LogbookMonth {
    pub id: i64,
    pub aircraft_id: i64,
    pub year: i32,
    pub month: u32,
    pub cell_start: f64,
    pub cell_end: f64,
    pub closed: bool,
    pub closed_at: Option<String>,
    pub closed_by: Option<String>,
}

impl LogbookMonth {
    pub fn period(&self) -> Option<YearMonth> {
        YearMonth::new(self.year, self.month)
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn projection(&self, interval: f64) -> CellProjection {
        CellProjection::from_cell_end(self.cell_end, interval)
    }
}
