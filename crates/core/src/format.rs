//! Human-readable renderings of upstream values

use chrono::{Local, TimeZone};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// "45 minutes" below one hour, "1.5 hours" from one hour on
pub fn playtime_readable(minutes: u64) -> String {
    if minutes < 60 {
        format!("{} minutes", minutes)
    } else {
        format!("{:.1} hours", minutes as f64 / 60.0)
    }
}

/// Unix timestamp in local time. Zero means "never" and yields `None`.
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    if timestamp == 0 {
        return None;
    }
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
}

/// Label for a `personastate` code
pub fn persona_state_label(state: i64) -> &'static str {
    match state {
        0 => "Offline",
        1 => "Online",
        2 => "Busy",
        3 => "Away",
        4 => "Snooze",
        5 => "Looking to Trade",
        6 => "Looking to Play",
        _ => "Unknown",
    }
}

/// Percentage of `completed` over `total`, rounded to two decimals
pub fn completion_percentage(completed: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let pct = completed as f64 / total as f64 * 100.0;
    Some((pct * 100.0).round() / 100.0)
}
