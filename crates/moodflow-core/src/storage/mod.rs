//! Storage abstractions and backends.

mod json_file;
mod row;
mod sqlite;
mod traits;
pub mod types;

pub use json_file::JsonFileStore;
pub use sqlite::{SqliteJournal, SqliteStore, DEMO_EMAIL, DEMO_USERNAME};
pub use traits::EntryStore;
pub use types::{
    KindScore, MoodEntry, MoodRecord, MoodSummary, MoodUpdate, NewMoodEntry, NewMoodRecord,
    NewUser, ProfileUpdate, User, UserProfile, UserSummary,
};
