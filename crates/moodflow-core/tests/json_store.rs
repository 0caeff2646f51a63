use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, TimeZone, Utc};
use moodflow_core::stats::MoodStats;
use moodflow_core::storage::{EntryStore, JsonFileStore, NewMoodEntry};
use moodflow_core::MoodKind;

struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let filename = format!("{}_{}_{}.json", prefix, std::process::id(), nanos);
        let path = std::env::temp_dir().join(filename);
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn test_save_then_load_preserves_every_field() {
    let temp = TempFile::new("moodflow_round_trip");
    let mut store = JsonFileStore::create(&temp.path).expect("create should succeed");

    let at = Utc.with_ymd_and_hms(2024, 5, 1, 7, 45, 12).unwrap();
    let first = store
        .append(
            NewMoodEntry::new(MoodKind::Excited)
                .with_note("New project starting!")
                .with_created_at(at),
        )
        .expect("append should succeed");
    let second = store
        .append(NewMoodEntry::new(MoodKind::Angry))
        .expect("append should succeed");
    store.save().expect("save should succeed");

    let reopened = JsonFileStore::open(&temp.path).expect("open should succeed");
    let mut loaded = reopened.list_all().expect("list should succeed");
    loaded.sort_by_key(|e| e.created_at);

    assert_eq!(loaded, vec![first, second]);
}

#[test]
fn test_file_contains_emoji_and_date_keys() {
    let temp = TempFile::new("moodflow_shape");
    let mut store = JsonFileStore::create(&temp.path).expect("create should succeed");
    store
        .append(NewMoodEntry::new(MoodKind::Happy).with_note("Feeling great today!"))
        .expect("append should succeed");
    store.save().expect("save should succeed");

    let raw = fs::read_to_string(&temp.path).expect("read should succeed");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let entry = &value[0];
    assert_eq!(entry["mood"], "happy");
    assert_eq!(entry["emoji"], "\u{1F60A}");
    assert_eq!(entry["note"], "Feeling great today!");
    assert!(entry["date"].is_string());
    assert!(entry["id"].is_string());
}

#[test]
fn test_recent_is_newest_first() {
    let temp = TempFile::new("moodflow_recent");
    let mut store = JsonFileStore::open(&temp.path).expect("open should succeed");

    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    // Appended out of chronological order on purpose.
    for (mood, offset) in [
        (MoodKind::Calm, 2),
        (MoodKind::Sad, 0),
        (MoodKind::Happy, 3),
        (MoodKind::Angry, 1),
    ] {
        store
            .append(NewMoodEntry::new(mood).with_created_at(base + Duration::days(offset)))
            .expect("append should succeed");
    }

    let recent = store.recent(3).expect("recent should succeed");
    let moods: Vec<MoodKind> = recent.iter().map(|e| e.mood).collect();
    assert_eq!(moods, vec![MoodKind::Happy, MoodKind::Calm, MoodKind::Angry]);
}

#[test]
fn test_stats_over_loaded_journal() {
    let temp = TempFile::new("moodflow_stats");
    let today = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();
    {
        let mut store = JsonFileStore::create(&temp.path).expect("create should succeed");
        for (mood, days_ago) in [
            (MoodKind::Happy, 0),
            (MoodKind::Happy, 0),
            (MoodKind::Sad, 1),
        ] {
            store
                .append(NewMoodEntry::new(mood).with_created_at(today - Duration::days(days_ago)))
                .expect("append should succeed");
        }
        store.save().expect("save should succeed");
    }

    let store = JsonFileStore::open(&temp.path).expect("open should succeed");
    let entries = store.list_all().expect("list should succeed");
    let stats = MoodStats::compute(&entries, today.date_naive(), &Utc);

    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.average_mood, MoodKind::Happy);
    assert_eq!(stats.streak_count, 2);
    assert_eq!(stats.this_week, 3);
}
