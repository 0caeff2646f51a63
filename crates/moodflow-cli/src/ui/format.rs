//! String helpers for display.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// Truncate to `max_len` characters, ending in "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Pretty output shows local wall time, everything else gets RFC 3339.
pub fn format_datetime(dt: &DateTime<Utc>, tz: Tz, pretty: bool) -> String {
    if pretty {
        dt.with_timezone(&tz).format("%a %b %-d, %H:%M").to_string()
    } else {
        dt.to_rfc3339()
    }
}

pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}
