use chrono::{Local, TimeZone};
use humansize::{format_size, BINARY};

/// Format a byte count in human-readable binary units (KiB, MiB, GiB)
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Format an optional byte count, falling back to "Unknown"
pub fn format_optional_bytes(bytes: Option<u64>) -> String {
    bytes.map(format_bytes).unwrap_or_else(|| "Unknown".to_string())
}

/// Format a percentage the way the process table shows it
pub fn format_percent(value: f32) -> String {
    format!("{:.1}%", value)
}

/// Format a Unix timestamp as local time (HH:MM:SS)
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(datetime) => datetime.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Truncate `text` to at most `width` characters, marking the cut with "…"
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
