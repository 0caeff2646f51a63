//! Parsing helpers for command arguments.

use std::path::Path;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use moodflow_core::storage::JsonFileStore;
use moodflow_core::{EntryStore, MoodKind};

use crate::errors::CliError;

pub const VALID_MOODS_HINT: &str = "Hint: Valid moods are happy, sad, angry, calm, excited.";

/// Parse a mood name (case-insensitive).
pub fn parse_mood(value: &str) -> Result<MoodKind, CliError> {
    value.parse::<MoodKind>().map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Unknown mood: {}", value.trim()),
            VALID_MOODS_HINT,
        )
    })
}

/// Parse RFC 3339, or a bare `YYYY-MM-DD` read as noon in `tz`.
pub fn parse_datetime(value: &str, tz: Tz) -> Result<DateTime<Utc>, CliError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        return match tz.from_local_datetime(&noon) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => Err(invalid_date(trimmed)),
        };
    }

    Err(invalid_date(trimmed))
}

fn invalid_date(value: &str) -> CliError {
    CliError::invalid_input_with_hint(
        format!("Invalid date/time: {}", value),
        "Hint: Use ISO-8601 (2024-06-01T08:30:00Z) or YYYY-MM-DD.",
    )
}

pub fn parse_entry_id(value: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        CliError::invalid_input_with_hint(
            format!("Invalid entry ID: {}", value),
            "Hint: Entry IDs are full UUIDs. Run `moodflow list --json` to see them.",
        )
    })
}

/// Save the journal, creating its parent directory on first write.
pub fn save_journal(store: &mut JsonFileStore) -> anyhow::Result<()> {
    ensure_parent_dir(store.path())?;
    store.save()?;
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mood() {
        assert_eq!(parse_mood(" Calm ").unwrap(), MoodKind::Calm);
        let err = parse_mood("meh").unwrap_err();
        assert!(err.to_string().contains("Unknown mood: meh"));
        assert!(err.to_string().contains("Valid moods"));
    }

    #[test]
    fn test_parse_datetime_rfc3339() {
        let dt = parse_datetime("2024-06-01T08:30:00+02:00", chrono_tz::UTC).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_date_is_local_noon() {
        let dt = parse_datetime("2024-01-15", chrono_tz::America::New_York).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday", chrono_tz::UTC).is_err());
    }

    #[test]
    fn test_parse_entry_id() {
        assert!(parse_entry_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_entry_id(&id.to_string()).unwrap(), id);
    }
}
