// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mood logging and weekly mood aggregation.
//!
//! The weekly view is built in three steps:
//! 1. Shift the requested days by the week offset and sort them
//! 2. Fetch candidate documents (full scan or timestamp range)
//! 3. Bucket documents by calendar day and keep the latest per day

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::db::MoodStore;
use crate::error::{require_user_id, AppError, Result};
use crate::models::mood::most_recent;
use crate::models::{MoodEntry, MoodLabel, WeeklyMoodPoint};
use crate::time_utils::{
    format_utc_rfc3339, locale_date_string, locale_time_string, parse_locale_date, parse_rfc3339,
    shift_weeks, CalendarZone,
};

/// Default page size for [`MoodService::mood_history`] (a week of daily logs).
pub const DEFAULT_MOOD_HISTORY_LIMIT: u32 = 7;

/// How the weekly aggregator gets its candidate documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeeklyFetchStrategy {
    /// Read every mood document of the user and filter in memory.
    ///
    /// Cost grows with the user's total history.
    #[default]
    FullScan,
    /// Server-side range query on `timestamp` covering the requested days.
    ///
    /// The range compares strings, so documents whose `timestamp` is not
    /// canonical UTC (`...Z`) can be missed.
    DateRange,
}

impl fmt::Display for WeeklyFetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeeklyFetchStrategy::FullScan => f.write_str("full_scan"),
            WeeklyFetchStrategy::DateRange => f.write_str("date_range"),
        }
    }
}

impl FromStr for WeeklyFetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full_scan" => Ok(WeeklyFetchStrategy::FullScan),
            "date_range" => Ok(WeeklyFetchStrategy::DateRange),
            other => Err(format!("unknown weekly fetch strategy: {other}")),
        }
    }
}

/// Mood operations for one store.
#[derive(Clone)]
pub struct MoodService {
    store: Arc<dyn MoodStore>,
    clock: Arc<dyn Clock>,
    zone: CalendarZone,
    fetch: WeeklyFetchStrategy,
}

impl MoodService {
    pub fn new(store: Arc<dyn MoodStore>, clock: Arc<dyn Clock>, zone: CalendarZone) -> Self {
        Self {
            store,
            clock,
            zone,
            fetch: WeeklyFetchStrategy::default(),
        }
    }

    pub fn with_fetch_strategy(mut self, fetch: WeeklyFetchStrategy) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn fetch_strategy(&self) -> WeeklyFetchStrategy {
        self.fetch
    }

    /// Today's calendar day in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.zone.day_of(self.clock.now())
    }

    /// Append a mood log for the user and return the stored document.
    pub async fn log_mood(&self, user_id: &str, label: MoodLabel) -> Result<MoodEntry> {
        let user_id = require_user_id(user_id)?;
        let now = self.clock.now();

        let entry = MoodEntry {
            id: None,
            user_id: user_id.to_string(),
            selected_mood: Some(label.value()),
            mood_label: label.as_str().to_string(),
            date: locale_date_string(self.zone.day_of(now)),
            time: locale_time_string(self.zone.time_of(now)),
            timestamp: format_utc_rfc3339(now),
            unix_timestamp: Some(now.timestamp()),
            created_at: Some(now),
        };

        let stored = self.store.add_mood(user_id, &entry).await?;
        tracing::info!(user_id, mood = %label, id = ?stored.id, "Mood logged");
        Ok(stored)
    }

    /// Most recent mood logs, newest first.
    pub async fn mood_history(&self, user_id: &str, limit: u32) -> Result<Vec<MoodEntry>> {
        let user_id = require_user_id(user_id)?;
        if limit == 0 {
            return Err(AppError::InvalidArgument(
                "limit must be positive".to_string(),
            ));
        }
        self.store.latest_moods(user_id, limit).await
    }

    /// The latest mood logged today, or `None` if nothing was logged yet.
    pub async fn todays_mood(&self, user_id: &str) -> Result<Option<MoodEntry>> {
        let user_id = require_user_id(user_id)?;
        let today = locale_date_string(self.today());

        let todays = self.store.moods_on_date(user_id, &today).await?;
        let latest = most_recent(&todays).cloned();

        tracing::debug!(
            user_id,
            date = %today,
            candidates = todays.len(),
            found = latest.is_some(),
            "Looked up today's mood"
        );
        Ok(latest)
    }

    /// One point per requested day, shifted by `week_offset` weeks.
    ///
    /// The result is sorted ascending by date regardless of input order,
    /// and always has exactly `dates.len()` points.
    pub async fn weekly_moods(
        &self,
        user_id: &str,
        dates: &[NaiveDate],
        week_offset: i32,
    ) -> Result<Vec<WeeklyMoodPoint>> {
        let user_id = require_user_id(user_id)?;

        let mut days: Vec<NaiveDate> = dates
            .iter()
            .map(|d| shift_weeks(*d, week_offset))
            .collect();
        days.sort();

        let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
            return Ok(Vec::new());
        };

        tracing::info!(
            user_id,
            week_offset,
            start = %first,
            end = %last,
            strategy = %self.fetch,
            "Fetching weekly moods"
        );

        let candidates = match self.fetch {
            WeeklyFetchStrategy::FullScan => self.store.all_moods(user_id).await?,
            WeeklyFetchStrategy::DateRange => {
                let start = format_utc_rfc3339(self.zone.start_of_day(first));
                let end = last
                    .succ_opt()
                    .map(|next| format_utc_rfc3339(self.zone.start_of_day(next)))
                    .ok_or_else(|| {
                        AppError::InvalidArgument(format!("date out of range: {last}"))
                    })?;
                self.store.moods_between(user_id, &start, &end).await?
            }
        };

        let points = aggregate_weekly(&candidates, &days, &self.zone);

        tracing::debug!(
            user_id,
            fetched = candidates.len(),
            logged_days = points.iter().filter(|p| p.is_logged()).count(),
            "Weekly moods aggregated"
        );
        Ok(points)
    }
}

/// Calendar day a mood document belongs to.
///
/// Uses `timestamp`; documents with an unparsable timestamp fall back to
/// their `date` string.
fn entry_day(entry: &MoodEntry, zone: &CalendarZone) -> Option<NaiveDate> {
    parse_rfc3339(&entry.timestamp)
        .map(|ts| zone.day_of(ts))
        .or_else(|| parse_locale_date(&entry.date))
}

/// Map each day to the latest entry logged on it, or a placeholder.
///
/// Output order and length follow `days` exactly.
pub fn aggregate_weekly(
    entries: &[MoodEntry],
    days: &[NaiveDate],
    zone: &CalendarZone,
) -> Vec<WeeklyMoodPoint> {
    let mut buckets: HashMap<NaiveDate, Vec<&MoodEntry>> = HashMap::new();
    for entry in entries {
        match entry_day(entry, zone) {
            Some(day) => buckets.entry(day).or_default().push(entry),
            None => tracing::warn!(
                id = ?entry.id,
                timestamp = %entry.timestamp,
                "Skipping mood document with unreadable date"
            ),
        }
    }

    days.iter()
        .map(|day| {
            buckets
                .get(day)
                .and_then(|bucket| most_recent(bucket.iter().copied()))
                .map(|entry| WeeklyMoodPoint::from_entry(*day, entry))
                .unwrap_or_else(|| WeeklyMoodPoint::empty(*day))
        })
        .collect()
}
