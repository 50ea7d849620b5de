//! Shared formatting utilities for the Sysgraph views.

use chrono::{Local, TimeZone};

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1G display as "X.XG"
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000_000.0 {
        format!("{:.1}G", value / 1_000_000_000.0)
    } else if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a byte count with binary units, e.g. "3.2 GB".
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let unit = sysgraph_core::suitable_unit(bytes.max(0.0), &UNITS, 1024.0);
    if unit.unit_idx == 0 {
        format!("{:.0} {}", unit.value, UNITS[0])
    } else {
        format!("{:.1} {}", unit.value, UNITS[unit.unit_idx])
    }
}

/// Format a gridline time in local time.
///
/// Sub-minute gridlines show seconds; coarser ones drop them.
pub fn format_tick_time(time_ms: i64, step_ms: i64) -> String {
    let pattern = if step_ms < 60_000 { "%H:%M:%S" } else { "%H:%M" };
    match Local.timestamp_millis_opt(time_ms).single() {
        Some(time) => time.format(pattern).to_string(),
        None => String::new(),
    }
}

/// Format a window length such as "30s", "5m" or "2h 30m".
pub fn format_duration(duration_ms: i64) -> String {
    let seconds = duration_ms.max(0) / 1000;
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        let (m, s) = (seconds / 60, seconds % 60);
        if s == 0 {
            format!("{}m", m)
        } else {
            format!("{}m {}s", m, s)
        }
    } else {
        let (h, m) = (seconds / 3600, seconds % 3600 / 60);
        if m == 0 {
            format!("{}h", h)
        } else {
            format!("{}h {}m", h, m)
        }
    }
}
