//! Raw SQLite rows and their conversion into domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{MoodError, Result};
use crate::storage::types::{MoodRecord, User};

/// Column list matching [`MoodRow::from_row`].
pub(crate) const MOOD_COLUMNS: &str = "id, user_id, mood_type, emoji, note, mood_score, created_at";

/// Column list matching [`UserRow::from_row`].
pub(crate) const USER_COLUMNS: &str =
    "id, username, email, password_hash, created_at, updated_at";

/// Timestamps are stored as fixed-width RFC 3339 so text order is time order.
pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| MoodError::Storage(format!("Invalid timestamp: {}", e)))
}

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| MoodError::Storage(format!("Invalid {} UUID: {}", what, e)))
}

#[derive(Debug)]
pub(crate) struct MoodRow {
    pub id: String,
    pub user_id: String,
    pub mood_type: String,
    pub emoji: String,
    pub note: Option<String>,
    pub mood_score: i64,
    pub created_at: String,
}

impl MoodRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            mood_type: row.get(2)?,
            emoji: row.get(3)?,
            note: row.get(4)?,
            mood_score: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl TryFrom<MoodRow> for MoodRecord {
    type Error = MoodError;

    fn try_from(row: MoodRow) -> Result<Self> {
        let mood_type = row
            .mood_type
            .parse()
            .map_err(|_| MoodError::Storage(format!("Invalid mood_type: {}", row.mood_type)))?;
        let mood_score = u8::try_from(row.mood_score)
            .map_err(|_| MoodError::Storage(format!("Invalid mood_score: {}", row.mood_score)))?;

        Ok(MoodRecord {
            id: parse_uuid(&row.id, "mood")?,
            user_id: parse_uuid(&row.user_id, "user")?,
            mood_type,
            emoji: row.emoji,
            note: row.note,
            mood_score,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug)]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = MoodError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: parse_uuid(&row.id, "user")?,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
