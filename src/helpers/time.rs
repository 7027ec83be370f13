use chrono::{DateTime, Local};

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

/// Chart label for a sample, e.g. "14:03:27"
pub fn time_label(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Last-update stamp, e.g. "2024-05-01 14:03:27"
pub fn wall_clock(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn time_label_from_millis(timestamp_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|utc| time_label(utc.with_timezone(&Local)))
}
