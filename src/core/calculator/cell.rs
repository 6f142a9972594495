//! Cell-hours ("célula") projection towards the next inspection boundary.

use super::hours::round2;
use serde::Serialize;

pub const DEFAULT_INSPECTION_INTERVAL: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellProjection {
    /// Accumulated airframe hours at the end of the period.
    pub cell_end: f64,
    /// Next inspection boundary: the first multiple of the interval at or above `cell_end`.
    pub cell_prev: f64,
    /// Hours available before reaching `cell_prev`, never negative.
    pub cell_disp: f64,
}

impl CellProjection {
    pub fn from_cell_end(cell_end: f64, interval: f64) -> Self {
        let interval = if interval > 0.0 {
            interval
        } else {
            DEFAULT_INSPECTION_INTERVAL
        };

        // Rounding first keeps sums like 189.99999999 from landing on the wrong boundary.
        let end = round2(cell_end);
        let prev = (end / interval).ceil() * interval;

        Self {
            cell_end: end,
            cell_prev: round2(prev),
            cell_disp: round2((prev - end).max(0.0)),
        }
    }
}

/// Running cell hours across a sequence of legs: `(before, after)` per leg.
pub fn running_cell(cell_start: f64, deltas: &[f64]) -> Vec<(f64, f64)> {
    let mut current = cell_start;
    deltas
        .iter()
        .map(|d| {
            let before = round2(current);
            current += d;
            (before, round2(current))
        })
        .collect()
}
