//! # Moodflow Core
//!
//! Core library for Moodflow, a small mood journal with a local CLI and an
//! optional multi-user HTTP server.
//!
//! ## Architecture
//!
//! - **mood**: the five mood kinds and their emoji/score/color tables
//! - **stats**: pure analytics over entries (distribution, streak, weekly trend)
//! - **storage**: the `EntryStore` trait, the JSON-file journal and the SQLite
//!   account/mood store
//! - **auth**: password hashing and bearer tokens for the server

pub mod auth;
pub mod error;
pub mod fs;
pub mod mood;
pub mod stats;
pub mod storage;

pub use error::{MoodError, Result};
pub use mood::MoodKind;
pub use stats::MoodStats;
pub use storage::{EntryStore, MoodEntry, NewMoodEntry};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
