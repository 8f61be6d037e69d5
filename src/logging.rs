//! `RUST_LOG`-driven filtering of dashboard events.

pub use crate::error_classifier::LogLevel;
use std::env;

/// Target name that directives may use to address this crate.
const CRATE_TARGET: &str = "kpi_dashboard";

pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}

/// Resolves the threshold for this crate from a `RUST_LOG` value.
///
/// A `kpi_dashboard=<level>` directive wins over a bare `<level>` default; anything
/// unparseable falls back to info.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let mut default = None;
    for directive in rust_log.split(',') {
        match directive.split_once('=') {
            Some((target, level)) if target.trim() == CRATE_TARGET => {
                if let Some(level) = parse_level(level) {
                    return level;
                }
            }
            Some(_) => {}
            None => default = default.or_else(|| parse_level(directive)),
        }
    }
    default.unwrap_or(LogLevel::Info)
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = get_rust_log_level();
    should_log(event_level, threshold)
}
