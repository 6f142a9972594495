pub mod cell;
pub mod hours;
pub mod totals;
