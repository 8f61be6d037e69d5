//! CLI command messaging system
//!
//! Consistent output for the one-shot commands: login, logout, whoami and the
//! chart, history and avatar printers.

const INFO: &str = "\x1b[1;33m[INFO]\x1b[0m";
const WARN: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR: &str = "\x1b[1;31m[ERROR]\x1b[0m";
const SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";

/// `<tag> <title>`, with the details tab-separated on the same line.
fn tagged_line(tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", tag, title)
    } else {
        format!("{} {}\t {}", tag, title, details)
    }
}

pub fn print_info(title: &str, details: &str) {
    println!("{}", tagged_line(INFO, title, details));
}

pub fn print_warn(title: &str, details: &str) {
    println!("{}", tagged_line(WARN, title, details));
}

/// Print CLI command error, with the details on their own line
pub fn print_error(title: &str, details: Option<&str>) {
    println!("{} {}", ERROR, title);
    if let Some(details) = details {
        println!("{} Details: {}", ERROR, details);
    }
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", tagged_line(SUCCESS, title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors; details are optional
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_line_appends_details() {
        assert_eq!(tagged_line("[X]", "Done.", ""), "[X] Done.");
        assert_eq!(tagged_line("[X]", "Done.", "3 rows"), "[X] Done.\t 3 rows");
    }
}
