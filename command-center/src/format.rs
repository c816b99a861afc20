use chrono::{DateTime, Local, Utc};
pub use taskdeck_utilities::format::{local_datetime, truncate_cell};

pub fn local_time(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
