// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use wellness_insights::clock::FixedClock;
use wellness_insights::config::Config;
use wellness_insights::db::{FirestoreDb, MemoryStore};
use wellness_insights::models::{JournalEntry, MoodEntry, MoodLabel};
use wellness_insights::time_utils::{format_utc_rfc3339, locale_date_string};
use wellness_insights::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Generate a unique user ID for test isolation.
#[allow(dead_code)]
pub fn unique_user_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-user-{nanos}")
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Instant on `day` at `hour`:00 UTC.
#[allow(dead_code)]
pub fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
}

/// Mood document as the mobile client writes it.
#[allow(dead_code)]
pub fn mood_at(user_id: &str, label: MoodLabel, when: DateTime<Utc>) -> MoodEntry {
    MoodEntry {
        id: None,
        user_id: user_id.to_string(),
        selected_mood: Some(label.value()),
        mood_label: label.as_str().to_string(),
        date: locale_date_string(when.date_naive()),
        time: when.format("%-I:%M:%S %p").to_string(),
        timestamp: format_utc_rfc3339(when),
        unix_timestamp: Some(when.timestamp()),
        created_at: Some(when),
    }
}

/// Journal entry written at `when`.
#[allow(dead_code)]
pub fn journal_at(user_id: &str, when: DateTime<Utc>) -> JournalEntry {
    JournalEntry {
        id: None,
        user_id: user_id.to_string(),
        selected_emotions: vec!["Calm".to_string()],
        prompt: "How was your day?".to_string(),
        journal_entry: "Went for a walk.".to_string(),
        date: locale_date_string(when.date_naive()),
        time: when.format("%-I:%M:%S %p").to_string(),
        timestamp: format_utc_rfc3339(when),
        created_at: Some(when),
    }
}

/// App state over an in-memory store with the clock pinned to `now`.
#[allow(dead_code)]
pub fn create_test_state(config: Config, now: DateTime<Utc>) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(config, store.clone(), Arc::new(FixedClock(now)));
    (state, store)
}
