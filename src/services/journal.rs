// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Journal entries and the journaling streak.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use validator::Validate;

use crate::clock::Clock;
use crate::config::DEFAULT_STREAK_WINDOW_DAYS;
use crate::db::JournalStore;
use crate::error::{require_user_id, AppError, Result};
use crate::models::{JournalEntry, NewJournalEntry};
use crate::time_utils::{format_utc_rfc3339, locale_date_string, locale_time_string, CalendarZone};

/// Default page size for [`JournalService::entries`].
pub const DEFAULT_JOURNAL_ENTRIES_LIMIT: u32 = 10;

/// Journal operations for one store.
#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn JournalStore>,
    clock: Arc<dyn Clock>,
    zone: CalendarZone,
    window_days: u32,
}

impl JournalService {
    pub fn new(store: Arc<dyn JournalStore>, clock: Arc<dyn Clock>, zone: CalendarZone) -> Self {
        Self {
            store,
            clock,
            zone,
            window_days: DEFAULT_STREAK_WINDOW_DAYS,
        }
    }

    /// Length of the rolling lookback, in days, the streak query looks at.
    ///
    /// Entries older than `now - days` are never fetched, so the streak is
    /// capped at `days`, or `days + 1` when the oldest day is only partly
    /// covered. Zero is treated as one.
    pub fn with_streak_window(mut self, days: u32) -> Self {
        self.window_days = days.max(1);
        self
    }

    pub fn streak_window(&self) -> u32 {
        self.window_days
    }

    /// Today's calendar day in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.zone.day_of(self.clock.now())
    }

    /// Validate and append a journal entry.
    pub async fn save_entry(&self, user_id: &str, input: NewJournalEntry) -> Result<JournalEntry> {
        let user_id = require_user_id(user_id)?;
        input.validate()?;

        let now = self.clock.now();
        let entry = JournalEntry {
            id: None,
            user_id: user_id.to_string(),
            selected_emotions: input
                .selected_emotions
                .iter()
                .map(|e| e.as_str().to_string())
                .collect(),
            prompt: input.effective_prompt().to_string(),
            journal_entry: input.journal_entry.clone(),
            date: locale_date_string(self.zone.day_of(now)),
            time: locale_time_string(self.zone.time_of(now)),
            timestamp: format_utc_rfc3339(now),
            created_at: Some(now),
        };

        let stored = self.store.add_entry(user_id, &entry).await?;
        tracing::info!(
            user_id,
            id = ?stored.id,
            emotions = ?stored.selected_emotions,
            "Journal entry saved"
        );
        Ok(stored)
    }

    /// Most recent entries, newest first.
    pub async fn entries(&self, user_id: &str, limit: u32) -> Result<Vec<JournalEntry>> {
        let user_id = require_user_id(user_id)?;
        if limit == 0 {
            return Err(AppError::InvalidArgument(
                "limit must be positive".to_string(),
            ));
        }
        self.store.latest_entries(user_id, limit).await
    }

    /// Entries written in the last `window_days * 24h`, newest `timestamp` first.
    pub async fn recent_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let user_id = require_user_id(user_id)?;
        let now = self.clock.now();
        let since = format_utc_rfc3339(now - Duration::days(i64::from(self.window_days)));

        tracing::debug!(
            user_id,
            since = %since,
            window_days = self.window_days,
            "Fetching recent journal entries"
        );
        self.store.entries_since(user_id, &since).await
    }

    /// Consecutive days with at least one entry, ending today.
    ///
    /// Zero when nothing was written today. A failed fetch is an error,
    /// not a zero streak.
    pub async fn journaling_streak(&self, user_id: &str) -> Result<u32> {
        let entries = self.recent_entries(user_id).await?;
        let streak = current_streak(&entries, self.today(), &self.zone);

        tracing::debug!(
            user_id = user_id.trim(),
            entries = entries.len(),
            streak,
            "Journaling streak computed"
        );
        Ok(streak)
    }
}

/// Walk entries (newest first) back from `today` while each new day is
/// exactly one calendar day before the previous one.
pub fn current_streak(entries: &[JournalEntry], today: NaiveDate, zone: &CalendarZone) -> u32 {
    let days: Vec<Option<NaiveDate>> = entries.iter().map(|e| e.day(zone)).collect();

    if !days.contains(&Some(today)) {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = today;
    for day in days {
        match day {
            Some(d) if d == cursor => continue,
            Some(d) if cursor.pred_opt() == Some(d) => {
                streak += 1;
                cursor = d;
            }
            _ => break,
        }
    }
    streak
}
