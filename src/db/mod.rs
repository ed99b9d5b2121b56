//! Database layer (Firestore), behind store traits the services depend on.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{JournalEntry, MoodEntry};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Parent collection, one document per user
    pub const USER_MOOD: &str = "user_mood";
    /// Mood subcollection under `user_mood/{userId}`
    pub const MOODS: &str = "moods";
    /// Parent collection, one document per user
    pub const USER_JOURNALS: &str = "user_journals";
    /// Entry subcollection under `user_journals/{userId}`
    pub const ENTRIES: &str = "entries";
}

/// Read and append access to a user's mood logs.
///
/// Reads fail with `AppError::Fetch`, writes with `AppError::Database`.
#[async_trait]
pub trait MoodStore: Send + Sync {
    /// Every mood document of the user, unordered.
    async fn all_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>>;

    /// Documents whose `date` string equals `date`.
    async fn moods_on_date(&self, user_id: &str, date: &str) -> Result<Vec<MoodEntry>>;

    /// Documents with `start <= timestamp < end` (RFC 3339 strings).
    async fn moods_between(&self, user_id: &str, start: &str, end: &str)
        -> Result<Vec<MoodEntry>>;

    /// Most recent documents by `createdAt`, newest first.
    async fn latest_moods(&self, user_id: &str, limit: u32) -> Result<Vec<MoodEntry>>;

    /// Append a document, returning it with its generated ID.
    async fn add_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<MoodEntry>;
}

/// Read and append access to a user's journal entries.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Entries with `timestamp >= since`, newest `timestamp` first.
    async fn entries_since(&self, user_id: &str, since: &str) -> Result<Vec<JournalEntry>>;

    /// Most recent entries by `createdAt`, newest first.
    async fn latest_entries(&self, user_id: &str, limit: u32) -> Result<Vec<JournalEntry>>;

    /// Append an entry, returning it with its generated ID.
    async fn add_entry(&self, user_id: &str, entry: &JournalEntry) -> Result<JournalEntry>;
}
