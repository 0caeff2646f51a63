//! Server-mode storage: accounts and per-user moods in SQLite.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::row::{
    format_timestamp, parse_timestamp, MoodRow, UserRow, MOOD_COLUMNS, USER_COLUMNS,
};
use super::traits::EntryStore;
use super::types::{
    normalize_note, KindScore, MoodEntry, MoodRecord, MoodSummary, MoodUpdate, NewMoodEntry,
    NewMoodRecord, NewUser, ProfileUpdate, User, UserProfile, UserSummary,
};
use crate::error::{MoodError, Result};
use crate::mood::{validate_score, MoodKind};

const ACCOUNT_TAKEN: &str = "Username or email already exists";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS moods (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    mood_type TEXT NOT NULL CHECK (mood_type IN ('happy', 'sad', 'angry', 'calm', 'excited')),
    emoji TEXT NOT NULL,
    note TEXT,
    mood_score INTEGER NOT NULL CHECK (mood_score >= 1 AND mood_score <= 5),
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_moods_user_id ON moods(user_id);
"#;

/// Username of the account created by [`SqliteStore::seed_demo_data`].
pub const DEMO_USERNAME: &str = "demo_user";

/// Email of the demo account.
pub const DEMO_EMAIL: &str = "demo@moodflow.local";

const DEMO_MOODS: [(MoodKind, &str, u8); 5] = [
    (MoodKind::Happy, "Feeling great today!", 5),
    (MoodKind::Calm, "Peaceful morning", 4),
    (MoodKind::Excited, "New project starting!", 5),
    (MoodKind::Sad, "Missing friends", 2),
    (MoodKind::Angry, "Traffic was terrible", 1),
];

/// Stored timestamps keep microseconds; trim in-memory values to match.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// UNIQUE violations on `users` surface as the duplicate-account message.
fn account_conflict(err: rusqlite::Error) -> MoodError {
    match MoodError::from(err) {
        MoodError::Validation(_) => MoodError::validation(ACCOUNT_TAKEN),
        other => other,
    }
}

/// SQLite-backed account and mood store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MoodError::Storage("SQLite connection poisoned".to_string()))
    }

    /// A per-user [`EntryStore`] view over this database.
    pub fn journal(&self, user_id: Uuid) -> SqliteJournal<'_> {
        SqliteJournal {
            store: self,
            user_id,
        }
    }

    // --- Accounts ---

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::Validation` if the username or email is taken.
    pub fn create_user(&self, user: &NewUser) -> Result<User> {
        let conn = self.lock_conn()?;

        let taken: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1 OR email = ?2",
                params![user.username, user.email],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(MoodError::validation(ACCOUNT_TAKEN));
        }

        let now = stored_now();
        let id = Uuid::new_v4();
        conn.execute(
            "INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                id.to_string(),
                user.username,
                user.email,
                user.password_hash,
                format_timestamp(&now)
            ],
        )
        .map_err(account_conflict)?;
        tracing::info!(user_id = %id, username = %user.username, "created user");

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
                [username],
                UserRow::from_row,
            )
            .optional()?;
        row.map(User::try_from).transpose()
    }

    pub fn get_user(&self, id: &Uuid) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                [id.to_string()],
                UserRow::from_row,
            )
            .optional()?;
        row.map(User::try_from).transpose()
    }

    /// Profile with mood count and average stored score.
    pub fn user_profile(&self, id: &Uuid) -> Result<Option<UserProfile>> {
        let Some(user) = self.get_user(id)? else {
            return Ok(None);
        };

        let conn = self.lock_conn()?;
        let (total, avg): (i64, Option<f64>) = conn.query_row(
            "SELECT COUNT(*), AVG(mood_score) FROM moods WHERE user_id = ?1",
            [id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(Some(UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            total_moods: total as u64,
            avg_mood_score: avg.map(round2).unwrap_or(0.0),
        }))
    }

    /// Replace username and email.
    ///
    /// # Returns
    ///
    /// The number of rows changed (0 when the user does not exist).
    pub fn update_profile(&self, id: &Uuid, update: &ProfileUpdate) -> Result<usize> {
        let conn = self.lock_conn()?;
        let changes = conn.execute(
            "UPDATE users SET username = ?1, email = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                update.username,
                update.email,
                format_timestamp(&stored_now()),
                id.to_string()
            ],
        )
        .map_err(account_conflict)?;
        Ok(changes)
    }

    /// All accounts with their mood counts, newest account first.
    pub fn list_users(&self) -> Result<Vec<UserSummary>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT u.id, u.username, u.email, u.created_at, COUNT(m.id)
            FROM users u
            LEFT JOIN moods m ON u.id = m.user_id
            GROUP BY u.id
            ORDER BY u.created_at DESC, u.rowid DESC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut users = Vec::new();
        for row in rows {
            let (id, username, email, created_at, total) = row?;
            users.push(UserSummary {
                id: Uuid::parse_str(&id)
                    .map_err(|e| MoodError::Storage(format!("Invalid user UUID: {}", e)))?,
                username,
                email,
                created_at: parse_timestamp(&created_at)?,
                total_moods: total as u64,
            });
        }
        Ok(users)
    }

    // --- Moods ---

    /// Insert a mood for an existing user.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::Validation` for an out-of-range score and
    /// `MoodError::NotFound` when the user does not exist.
    pub fn insert_mood(&self, mood: &NewMoodRecord) -> Result<MoodRecord> {
        let mood_score = validate_score(i64::from(mood.mood_score))?;
        let conn = self.lock_conn()?;

        let user_exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM users WHERE id = ?1",
                [mood.user_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        if user_exists.is_none() {
            return Err(MoodError::not_found("User not found"));
        }

        let record = MoodRecord {
            id: Uuid::new_v4(),
            user_id: mood.user_id,
            mood_type: mood.mood_type,
            emoji: mood.emoji.clone(),
            note: mood.note.clone(),
            mood_score,
            created_at: mood
                .created_at
                .map(|at| at.trunc_subsecs(6))
                .unwrap_or_else(stored_now),
        };
        conn.execute(
            &format!(
                "INSERT INTO moods ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                MOOD_COLUMNS
            ),
            params![
                record.id.to_string(),
                record.user_id.to_string(),
                record.mood_type.as_str(),
                record.emoji,
                record.note,
                record.mood_score,
                format_timestamp(&record.created_at)
            ],
        )?;
        tracing::debug!(
            mood_id = %record.id,
            user_id = %record.user_id,
            mood = %record.mood_type,
            "inserted mood"
        );

        Ok(record)
    }

    /// A user's moods, newest first.
    pub fn moods_for_user(&self, user_id: &Uuid) -> Result<Vec<MoodRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM moods WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            MOOD_COLUMNS
        ))?;
        let rows = stmt.query_map([user_id.to_string()], MoodRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(MoodRecord::try_from(row?)?);
        }
        Ok(records)
    }

    pub fn get_mood(&self, id: &Uuid) -> Result<Option<MoodRecord>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM moods WHERE id = ?1", MOOD_COLUMNS),
                [id.to_string()],
                MoodRow::from_row,
            )
            .optional()?;
        row.map(MoodRecord::try_from).transpose()
    }

    /// Replace a mood's mutable fields. Returns the number of rows changed.
    pub fn update_mood(&self, id: &Uuid, update: &MoodUpdate) -> Result<usize> {
        let mood_score = validate_score(i64::from(update.mood_score))?;
        let note = normalize_note(update.note.clone());
        let conn = self.lock_conn()?;
        let changes = conn.execute(
            "UPDATE moods SET mood_type = ?1, emoji = ?2, note = ?3, mood_score = ?4 WHERE id = ?5",
            params![
                update.mood_type.as_str(),
                update.emoji,
                note,
                mood_score,
                id.to_string()
            ],
        )?;
        Ok(changes)
    }

    /// Delete a mood. Returns the number of rows removed.
    pub fn delete_mood(&self, id: &Uuid) -> Result<usize> {
        let conn = self.lock_conn()?;
        let changes = conn.execute("DELETE FROM moods WHERE id = ?1", [id.to_string()])?;
        Ok(changes)
    }

    /// Per-kind counts and average stored scores, in enumeration order.
    pub fn mood_summary(&self, user_id: &Uuid) -> Result<MoodSummary> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT mood_type, COUNT(*), AVG(mood_score) FROM moods WHERE user_id = ?1 GROUP BY mood_type",
        )?;
        let rows = stmt.query_map([user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut by_kind = Vec::new();
        for row in rows {
            let (kind, count, avg) = row?;
            let mood_type: MoodKind = kind
                .parse()
                .map_err(|_| MoodError::Storage(format!("Invalid mood_type: {}", kind)))?;
            by_kind.push(KindScore {
                mood_type,
                count: count as u64,
                avg_score: avg,
            });
        }
        by_kind.sort_by_key(|k| k.mood_type);

        let total_entries: u64 = by_kind.iter().map(|k| k.count).sum();
        let weighted: f64 = by_kind.iter().map(|k| k.avg_score * k.count as f64).sum();
        let average_mood_score = if total_entries == 0 {
            0.0
        } else {
            round2(weighted / total_entries as f64)
        };

        for kind in &mut by_kind {
            kind.avg_score = round2(kind.avg_score);
        }

        Ok(MoodSummary {
            mood_distribution: by_kind,
            total_entries,
            average_mood_score,
        })
    }

    /// Create the demo account and its sample moods when no accounts exist.
    ///
    /// # Returns
    ///
    /// The demo user's id, or `None` if the database already had users.
    pub fn seed_demo_data(&self, password_hash: &str) -> Result<Option<Uuid>> {
        let user_count: i64 = {
            let conn = self.lock_conn()?;
            conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?
        };
        if user_count > 0 {
            tracing::debug!("sample data already exists");
            return Ok(None);
        }

        let user = self.create_user(&NewUser {
            username: DEMO_USERNAME.to_string(),
            email: DEMO_EMAIL.to_string(),
            password_hash: password_hash.to_string(),
        })?;
        for (kind, note, score) in DEMO_MOODS {
            self.insert_mood(
                &NewMoodRecord::new(user.id, kind, score).with_note(Some(note.to_string())),
            )?;
        }
        tracing::info!(user_id = %user.id, "inserted sample data");
        Ok(Some(user.id))
    }
}

/// One user's moods seen through the [`EntryStore`] interface.
///
/// Writes go straight to the database, so `load` and `save` have nothing to do.
pub struct SqliteJournal<'a> {
    store: &'a SqliteStore,
    user_id: Uuid,
}

impl SqliteJournal<'_> {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl EntryStore for SqliteJournal<'_> {
    fn load(&mut self) -> Result<()> {
        Ok(())
    }

    fn append(&mut self, entry: NewMoodEntry) -> Result<MoodEntry> {
        let mut record = NewMoodRecord::new(self.user_id, entry.mood, entry.mood.score())
            .with_note(entry.note);
        if let Some(at) = entry.created_at {
            record = record.with_created_at(at);
        }
        let stored = self.store.insert_mood(&record)?;
        Ok(MoodEntry::from(&stored))
    }

    fn list_all(&self) -> Result<Vec<MoodEntry>> {
        Ok(self
            .store
            .moods_for_user(&self.user_id)?
            .iter()
            .map(MoodEntry::from)
            .collect())
    }

    fn get(&self, id: &Uuid) -> Result<Option<MoodEntry>> {
        Ok(self
            .store
            .get_mood(id)?
            .filter(|record| record.user_id == self.user_id)
            .map(|record| MoodEntry::from(&record)))
    }

    fn save(&mut self) -> Result<()> {
        Ok(())
    }
}
