/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Colour used for an audit-log operation name.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "define" => GREEN,
        "replace" => YELLOW,
        "drop" => RED,
        "provision" => CYAN,
        _ => RESET,
    }
}
