//! Entry store trait definition.
//!
//! `EntryStore` is the seam between the front ends and persistence. The
//! local JSON blob and the per-user SQLite view both implement it, so the
//! statistics engine never cares which one produced its input.

use uuid::Uuid;

use super::types::{MoodEntry, NewMoodEntry};
use crate::error::Result;

/// Persistence interface for mood entries.
pub trait EntryStore {
    /// (Re)read the backing collection.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::Storage` if the backing data cannot be read or
    /// does not parse. A missing backing file is not an error.
    fn load(&mut self) -> Result<()>;

    /// Record a new entry, assigning its id and (unless supplied) timestamp.
    ///
    /// # Returns
    ///
    /// The entry as stored.
    fn append(&mut self, entry: NewMoodEntry) -> Result<MoodEntry>;

    /// All entries, in no particular order.
    fn list_all(&self) -> Result<Vec<MoodEntry>>;

    /// Get an entry by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if found, `Ok(None)` if not found.
    fn get(&self, id: &Uuid) -> Result<Option<MoodEntry>>;

    /// Persist pending changes.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::Storage` if the write fails. The previous contents
    /// stay intact in that case.
    fn save(&mut self) -> Result<()>;

    /// The `limit` newest entries, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<MoodEntry>> {
        let mut entries = self.list_all()?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }
}
