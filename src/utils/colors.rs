/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for empty cells ("", "--:--"), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Hours left before the next cell inspection:
/// red at zero, yellow within two hours, green otherwise.
pub fn color_for_cell_disp(hours: f64) -> &'static str {
    if hours <= 0.0 {
        RED
    } else if hours <= 2.0 {
        YELLOW
    } else {
        GREEN
    }
}
