//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Auth => Color::Magenta,
        Worker::BestPerformers => Color::Cyan,
        Worker::WorstPerformers => Color::LightRed,
        Worker::History => Color::Yellow,
        Worker::Avatar => Color::Green,
    }
}

/// Converts a `#RRGGBB` chart color to a terminal color.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
        (6, Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    let month_day = parts.next().and_then(|date| date.get(5..10));
    let hour_min = parts.next().and_then(|time| time.get(0..5));
    match (month_day, hour_min) {
        (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
        _ => timestamp.to_string(),
    }
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("ConnectTimeout") {
        return "Connection failed - press [R] to retry".to_string();
    }
    if msg.contains("operation timed out") || msg.contains("TimedOut") {
        return "Request timed out - press [R] to retry".to_string();
    }
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4DA9A6"), Color::Rgb(0x4D, 0xA9, 0xA6));
        assert_eq!(hex_color("nope"), Color::Gray);
    }

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2026-03-09 14:05:33"), "03-09 14:05");
        assert_eq!(format_compact_timestamp("garbled"), "garbled");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message("Failed to load data: error sending request for url"),
            "Connection failed - press [R] to retry"
        );
        assert_eq!(clean_http_error_message("HTTP 404"), "HTTP 404");
    }
}
