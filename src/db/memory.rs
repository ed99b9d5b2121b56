// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store for tests and local development.
//!
//! Mirrors the query semantics the Firestore store relies on: string
//! comparison on `timestamp` for range filters and `createdAt` ordering
//! for "latest" listings.

use crate::db::{JournalStore, MoodStore};
use crate::error::{AppError, Result};
use crate::models::{JournalEntry, MoodEntry};
use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Documents keyed by user ID.
#[derive(Default)]
pub struct MemoryStore {
    moods: DashMap<String, Vec<MoodEntry>>,
    entries: DashMap<String, Vec<JournalEntry>>,
    next_id: AtomicU64,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read queries served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail with a fetch error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Insert a mood document as-is, keeping any ID it already has.
    pub fn seed_mood(&self, entry: MoodEntry) {
        let entry = self.with_mood_id(entry);
        self.moods
            .entry(entry.user_id.clone())
            .or_default()
            .push(entry);
    }

    /// Insert a journal entry as-is, keeping any ID it already has.
    pub fn seed_entry(&self, entry: JournalEntry) {
        let entry = self.with_entry_id(entry);
        self.entries
            .entry(entry.user_id.clone())
            .or_default()
            .push(entry);
    }

    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }

    fn with_mood_id(&self, mut entry: MoodEntry) -> MoodEntry {
        if entry.id.is_none() {
            entry.id = Some(self.generate_id("mood"));
        }
        entry
    }

    fn with_entry_id(&self, mut entry: JournalEntry) -> JournalEntry {
        if entry.id.is_none() {
            entry.id = Some(self.generate_id("entry"));
        }
        entry
    }

    fn begin_read(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("simulated read failure".to_string()));
        }
        Ok(())
    }

    fn moods_where<F>(&self, user_id: &str, keep: F) -> Vec<MoodEntry>
    where
        F: Fn(&MoodEntry) -> bool,
    {
        self.moods
            .get(user_id)
            .map(|docs| docs.iter().filter(|e| keep(e)).cloned().collect())
            .unwrap_or_default()
    }

    fn entries_where<F>(&self, user_id: &str, keep: F) -> Vec<JournalEntry>
    where
        F: Fn(&JournalEntry) -> bool,
    {
        self.entries
            .get(user_id)
            .map(|docs| docs.iter().filter(|e| keep(e)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MoodStore for MemoryStore {
    async fn all_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>> {
        self.begin_read()?;
        Ok(self.moods_where(user_id, |_| true))
    }

    async fn moods_on_date(&self, user_id: &str, date: &str) -> Result<Vec<MoodEntry>> {
        self.begin_read()?;
        Ok(self.moods_where(user_id, |e| e.date == date))
    }

    async fn moods_between(
        &self,
        user_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<MoodEntry>> {
        self.begin_read()?;
        let mut found = self.moods_where(user_id, |e| {
            e.timestamp.as_str() >= start && e.timestamp.as_str() < end
        });
        found.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(found)
    }

    async fn latest_moods(&self, user_id: &str, limit: u32) -> Result<Vec<MoodEntry>> {
        self.begin_read()?;
        // Firestore drops documents missing the ordered field.
        let mut found = self.moods_where(user_id, |e| e.created_at.is_some());
        found.sort_by_key(|e| Reverse(e.created_at));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn add_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<MoodEntry> {
        let stored = self.with_mood_id(entry.clone());
        self.moods
            .entry(user_id.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn entries_since(&self, user_id: &str, since: &str) -> Result<Vec<JournalEntry>> {
        self.begin_read()?;
        let mut found = self.entries_where(user_id, |e| e.timestamp.as_str() >= since);
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }

    async fn latest_entries(&self, user_id: &str, limit: u32) -> Result<Vec<JournalEntry>> {
        self.begin_read()?;
        let mut found = self.entries_where(user_id, |e| e.created_at.is_some());
        found.sort_by_key(|e| Reverse(e.created_at));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn add_entry(&self, user_id: &str, entry: &JournalEntry) -> Result<JournalEntry> {
        let stored = self.with_entry_id(entry.clone());
        self.entries
            .entry(user_id.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}
