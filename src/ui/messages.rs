//! Colored one-line feedback for every command.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_CYAN: &str = "\x1b[36m";

fn tagged(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_BLUE, "ℹ️", msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_GREEN, "✅", msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", tagged(FG_YELLOW, "⚠️", msg));
}

/// Goes to stderr, unlike the others.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", tagged(FG_RED, "❌", msg));
}

/// Section header, e.g. the title of a logbook month.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}=== {msg} ==={RESET}");
}

/// Aligned `label: value` line used by summaries.
pub fn field<L: fmt::Display, V: fmt::Display>(label: L, value: V) {
    println!("{FG_CYAN}• {:<18}{RESET} {value}", format!("{label}:"));
}
