use chrono::{DateTime, Local, Utc};

/// `value` in the local zone, to the second.
pub fn local_datetime(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Cuts `value` to `max_chars`, marking the cut with an ellipsis.
pub fn truncate_cell(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
