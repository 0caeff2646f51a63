//! Local-mode store: the whole journal is one JSON array on disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use super::traits::EntryStore;
use super::types::{MoodEntry, NewMoodEntry};
use crate::error::{MoodError, Result};
use crate::fs::write_atomic;

/// Journal backed by a single JSON file.
///
/// Entries are held newest first in memory. Every `save` rewrites the whole
/// file atomically.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<MoodEntry>,
    dirty: bool,
}

impl JsonFileStore {
    /// Create an empty journal file.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::Storage` if the file already exists or cannot be
    /// written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(MoodError::Storage(format!(
                "Journal already exists at {}",
                path.display()
            )));
        }
        write_atomic(path, b"[]\n")?;
        tracing::debug!(path = %path.display(), "created journal");
        Ok(Self::unloaded(path))
    }

    /// Open a journal and read it immediately.
    pub fn open(path: &Path) -> Result<Self> {
        let mut store = Self::unloaded(path);
        store.load()?;
        Ok(store)
    }

    fn unloaded(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: Vec::new(),
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryStore for JsonFileStore {
    fn load(&mut self) -> Result<()> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.entries.clear();
                self.dirty = false;
                return Ok(());
            }
            Err(e) => {
                return Err(MoodError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let entries: Vec<MoodEntry> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw).map_err(|e| {
                MoodError::Storage(format!(
                    "Journal at {} is not valid JSON: {}",
                    self.path.display(),
                    e
                ))
            })?
        };

        tracing::debug!(path = %self.path.display(), count = entries.len(), "loaded journal");
        self.entries = entries;
        self.dirty = false;
        Ok(())
    }

    fn append(&mut self, entry: NewMoodEntry) -> Result<MoodEntry> {
        let entry = entry.into_entry(Utc::now());
        let at = self
            .entries
            .partition_point(|e| e.created_at > entry.created_at);
        self.entries.insert(at, entry.clone());
        self.dirty = true;
        Ok(entry)
    }

    fn list_all(&self) -> Result<Vec<MoodEntry>> {
        Ok(self.entries.clone())
    }

    fn get(&self, id: &Uuid) -> Result<Option<MoodEntry>> {
        Ok(self.entries.iter().find(|e| e.id == *id).cloned())
    }

    fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let mut data = serde_json::to_vec_pretty(&self.entries)?;
        data.push(b'\n');
        write_atomic(&self.path, &data)?;
        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "saved journal");
        self.dirty = false;
        Ok(())
    }
}
