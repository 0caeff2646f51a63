use chrono::{Duration, Utc};
use moodflow_core::auth::{hash_password, verify_password};
use moodflow_core::storage::{
    EntryStore, MoodUpdate, NewMoodEntry, NewMoodRecord, NewUser, ProfileUpdate, SqliteStore,
    DEMO_USERNAME,
};
use moodflow_core::{MoodError, MoodKind};
use tempfile::tempdir;
use uuid::Uuid;

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: format!("{}@example.com", name),
        password_hash: hash_password("password123").expect("hash should succeed"),
    }
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("moodflow.db");

    let user_id = {
        let store = SqliteStore::open(&path).expect("open should succeed");
        let user = store.create_user(&new_user("alice")).expect("create user");
        store
            .insert_mood(&NewMoodRecord::new(user.id, MoodKind::Calm, 3))
            .expect("insert mood");
        user.id
    };

    let store = SqliteStore::open(&path).expect("reopen should succeed");
    let found = store
        .find_user_by_username("alice")
        .expect("query")
        .expect("user exists");
    assert_eq!(found.id, user_id);
    assert!(verify_password("password123", &found.password_hash).unwrap());
    assert_eq!(store.moods_for_user(&user_id).unwrap().len(), 1);
}

#[test]
fn test_moods_for_user_newest_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    let now = Utc::now();

    for (kind, hours_ago) in [(MoodKind::Sad, 5), (MoodKind::Happy, 1), (MoodKind::Calm, 3)] {
        store
            .insert_mood(
                &NewMoodRecord::new(user.id, kind, kind.score())
                    .with_created_at(now - Duration::hours(hours_ago)),
            )
            .unwrap();
    }

    let kinds: Vec<MoodKind> = store
        .moods_for_user(&user.id)
        .unwrap()
        .iter()
        .map(|r| r.mood_type)
        .collect();
    assert_eq!(kinds, vec![MoodKind::Happy, MoodKind::Calm, MoodKind::Sad]);
}

#[test]
fn test_update_and_delete_report_changes() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    let record = store
        .insert_mood(&NewMoodRecord::new(user.id, MoodKind::Sad, 2))
        .unwrap();

    let update = MoodUpdate {
        mood_type: MoodKind::Excited,
        emoji: MoodKind::Excited.emoji().to_string(),
        note: Some("better now".to_string()),
        mood_score: 5,
    };
    assert_eq!(store.update_mood(&record.id, &update).unwrap(), 1);
    assert_eq!(store.update_mood(&Uuid::new_v4(), &update).unwrap(), 0);

    let updated = store.get_mood(&record.id).unwrap().unwrap();
    assert_eq!(updated.mood_type, MoodKind::Excited);
    assert_eq!(updated.note.as_deref(), Some("better now"));

    assert_eq!(store.delete_mood(&record.id).unwrap(), 1);
    assert_eq!(store.delete_mood(&record.id).unwrap(), 0);
    assert!(store.get_mood(&record.id).unwrap().is_none());
}

#[test]
fn test_update_with_blank_note_clears_it() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    let record = store
        .insert_mood(
            &NewMoodRecord::new(user.id, MoodKind::Calm, 3).with_note(Some("tea".to_string())),
        )
        .unwrap();

    let update = MoodUpdate {
        mood_type: MoodKind::Calm,
        emoji: MoodKind::Calm.emoji().to_string(),
        note: Some("   ".to_string()),
        mood_score: 3,
    };
    assert_eq!(store.update_mood(&record.id, &update).unwrap(), 1);

    assert!(store.get_mood(&record.id).unwrap().unwrap().note.is_none());
    let entries = store.journal(user.id).list_all().unwrap();
    assert_eq!(entries[0].note, None);
}

#[test]
fn test_mood_summary_weights_by_count() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    for (kind, score) in [
        (MoodKind::Happy, 5),
        (MoodKind::Happy, 4),
        (MoodKind::Sad, 2),
    ] {
        store
            .insert_mood(&NewMoodRecord::new(user.id, kind, score))
            .unwrap();
    }

    let summary = store.mood_summary(&user.id).unwrap();
    assert_eq!(summary.total_entries, 3);
    // (5 + 4 + 2) / 3
    assert_eq!(summary.average_mood_score, 3.67);
    assert_eq!(summary.mood_distribution[0].mood_type, MoodKind::Happy);
    assert_eq!(summary.mood_distribution[0].count, 2);
    assert_eq!(summary.mood_distribution[0].avg_score, 4.5);
    assert_eq!(summary.mood_distribution[1].mood_type, MoodKind::Sad);
}

#[test]
fn test_profile_and_listing() {
    let store = SqliteStore::open_in_memory().unwrap();
    let alice = store.create_user(&new_user("alice")).unwrap();
    store.create_user(&new_user("bob")).unwrap();
    store
        .insert_mood(&NewMoodRecord::new(alice.id, MoodKind::Happy, 4))
        .unwrap();
    store
        .insert_mood(&NewMoodRecord::new(alice.id, MoodKind::Sad, 1))
        .unwrap();

    let profile = store.user_profile(&alice.id).unwrap().unwrap();
    assert_eq!(profile.total_moods, 2);
    assert_eq!(profile.avg_mood_score, 2.5);
    assert!(store.user_profile(&Uuid::new_v4()).unwrap().is_none());

    let users = store.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "bob");
    assert_eq!(users[1].total_moods, 2);
}

#[test]
fn test_update_profile_conflict_is_validation() {
    let store = SqliteStore::open_in_memory().unwrap();
    let alice = store.create_user(&new_user("alice")).unwrap();
    store.create_user(&new_user("bob")).unwrap();

    let err = store
        .update_profile(
            &alice.id,
            &ProfileUpdate {
                username: "bob".to_string(),
                email: "alice@example.com".to_string(),
            },
        )
        .unwrap_err();
    match err {
        MoodError::Validation(message) => assert_eq!(message, "Username or email already exists"),
        other => panic!("expected a validation error, got {:?}", other),
    }

    let changes = store
        .update_profile(
            &Uuid::new_v4(),
            &ProfileUpdate {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
            },
        )
        .unwrap();
    assert_eq!(changes, 0);
}

#[test]
fn test_deleting_user_cascades_to_moods() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cascade.db");
    let store = SqliteStore::open(&path).unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    let record = store
        .insert_mood(&NewMoodRecord::new(user.id, MoodKind::Calm, 3))
        .unwrap();
    drop(store);

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    conn.execute("DELETE FROM users WHERE id = ?1", [user.id.to_string()])
        .unwrap();
    drop(conn);

    let store = SqliteStore::open(&path).unwrap();
    assert!(store.get_mood(&record.id).unwrap().is_none());
}

#[test]
fn test_seeded_demo_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    let demo = store
        .seed_demo_data(&hash_password("demo_password").unwrap())
        .unwrap()
        .expect("first seed inserts");

    let user = store.find_user_by_username(DEMO_USERNAME).unwrap().unwrap();
    assert_eq!(user.id, demo);
    let summary = store.mood_summary(&demo).unwrap();
    assert_eq!(summary.total_entries, 5);
    // 5 + 4 + 5 + 2 + 1 = 17 / 5
    assert_eq!(summary.average_mood_score, 3.4);
}

#[test]
fn test_journal_view_is_interchangeable_with_file_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let user = store.create_user(&new_user("alice")).unwrap();
    let mut journal = store.journal(user.id);

    journal.load().unwrap();
    let entry = journal
        .append(NewMoodEntry::new(MoodKind::Excited).with_note("launch day"))
        .unwrap();
    journal.save().unwrap();

    assert_eq!(journal.get(&entry.id).unwrap(), Some(entry.clone()));
    assert_eq!(journal.recent(10).unwrap(), vec![entry]);

    let stored = store.moods_for_user(&user.id).unwrap();
    assert_eq!(stored[0].mood_score, MoodKind::Excited.score());
    assert_eq!(stored[0].emoji, MoodKind::Excited.emoji());
}
