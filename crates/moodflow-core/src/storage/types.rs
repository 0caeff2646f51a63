//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mood::MoodKind;

/// A single journal entry.
///
/// Serialized as `{id, mood, emoji, note?, date}`. The emoji is always derived
/// from `mood`; a stored emoji is ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryRepr", into = "EntryRepr")]
pub struct MoodEntry {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Mood kind
    pub mood: MoodKind,

    /// Free-text note; never blank
    pub note: Option<String>,

    /// Creation instant
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn emoji(&self) -> &'static str {
        self.mood.emoji()
    }
}

#[derive(Serialize, Deserialize)]
struct EntryRepr {
    id: Uuid,
    mood: MoodKind,
    #[serde(default, skip_deserializing)]
    emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    date: DateTime<Utc>,
}

impl From<EntryRepr> for MoodEntry {
    fn from(repr: EntryRepr) -> Self {
        MoodEntry {
            id: repr.id,
            mood: repr.mood,
            note: normalize_note(repr.note),
            created_at: repr.date,
        }
    }
}

impl From<MoodEntry> for EntryRepr {
    fn from(entry: MoodEntry) -> Self {
        EntryRepr {
            id: entry.id,
            mood: entry.mood,
            emoji: entry.mood.emoji().to_string(),
            note: entry.note,
            date: entry.created_at,
        }
    }
}

/// Trim a note and collapse blank input to `None`.
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.and_then(|n| {
        let trimmed = n.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Builder for creating new entries.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub mood: MoodKind,
    pub note: Option<String>,

    /// Overrides the store-assigned timestamp (imports, tests)
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMoodEntry {
    pub fn new(mood: MoodKind) -> Self {
        Self {
            mood,
            note: None,
            created_at: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(Some(note.into()));
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Materialize into a stored entry with a fresh id.
    pub fn into_entry(self, now: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            mood: self.mood,
            note: normalize_note(self.note),
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

// --- Server mode ---

/// A mood row owned by a user account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood_type: MoodKind,
    pub emoji: String,
    pub note: Option<String>,
    pub mood_score: u8,
    pub created_at: DateTime<Utc>,
}

impl From<&MoodRecord> for MoodEntry {
    fn from(record: &MoodRecord) -> Self {
        MoodEntry {
            id: record.id,
            mood: record.mood_type,
            note: record.note.clone(),
            created_at: record.created_at,
        }
    }
}

/// Input for inserting a mood row.
#[derive(Debug, Clone)]
pub struct NewMoodRecord {
    pub user_id: Uuid,
    pub mood_type: MoodKind,
    pub emoji: String,
    pub note: Option<String>,
    pub mood_score: u8,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMoodRecord {
    /// Start a record whose emoji defaults to the kind's emoji.
    pub fn new(user_id: Uuid, mood_type: MoodKind, mood_score: u8) -> Self {
        Self {
            user_id,
            mood_type,
            emoji: mood_type.emoji().to_string(),
            note: None,
            mood_score,
            created_at: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = normalize_note(note);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Full replacement of a mood row's mutable fields.
#[derive(Debug, Clone)]
pub struct MoodUpdate {
    pub mood_type: MoodKind,
    pub emoji: String,
    pub note: Option<String>,
    pub mood_score: u8,
}

/// A registered account. Only the account store sees the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account. `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile view with mood aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub total_moods: u64,
    /// Rounded to 2 decimals, 0 with no moods
    pub avg_mood_score: f64,
}

/// Row of the account listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub total_moods: u64,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

/// Per-kind aggregate over stored scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindScore {
    pub mood_type: MoodKind,
    pub count: u64,
    pub avg_score: f64,
}

/// Aggregates over a user's stored scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub mood_distribution: Vec<KindScore>,
    pub total_entries: u64,
    /// Rounded to 2 decimals, 0 with no moods
    pub average_mood_score: f64,
}
