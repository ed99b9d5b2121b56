// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mood log documents and the weekly chart points derived from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::parse_rfc3339;

/// Color used for labels outside the known set.
pub const DEFAULT_MOOD_COLOR: &str = "rgba(173, 216, 230, 0.5)";
/// Emoji used for labels outside the known set.
pub const DEFAULT_MOOD_EMOJI: &str = "😐";

/// The five moods a user can log, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub enum MoodLabel {
    Unhappy,
    Sad,
    Normal,
    Good,
    Happy,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Unhappy,
        MoodLabel::Sad,
        MoodLabel::Normal,
        MoodLabel::Good,
        MoodLabel::Happy,
    ];

    /// Ordinal value stored as `selectedMood` (1-5).
    pub fn value(self) -> u8 {
        match self {
            MoodLabel::Unhappy => 1,
            MoodLabel::Sad => 2,
            MoodLabel::Normal => 3,
            MoodLabel::Good => 4,
            MoodLabel::Happy => 5,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.value() == value)
    }

    /// Display label as stored in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Unhappy => "Unhappy",
            MoodLabel::Sad => "Sad",
            MoodLabel::Normal => "Normal",
            MoodLabel::Good => "Good",
            MoodLabel::Happy => "Happy",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MoodLabel::Unhappy => "#FF6B6B",
            MoodLabel::Sad => "#74B9FF",
            MoodLabel::Normal => "#95A5A6",
            MoodLabel::Good => "#55EFC4",
            MoodLabel::Happy => "#FFD93D",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLabel::Unhappy => "😢",
            MoodLabel::Sad => "😔",
            MoodLabel::Normal => "😐",
            MoodLabel::Good => "🙂",
            MoodLabel::Happy => "😄",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood label: {0}")]
pub struct UnknownMoodLabel(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMoodLabel;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMoodLabel(s.to_string()))
    }
}

/// Color for a free-form label, falling back to [`DEFAULT_MOOD_COLOR`].
pub fn mood_color(label: &str) -> &'static str {
    label
        .parse::<MoodLabel>()
        .map(MoodLabel::color)
        .unwrap_or(DEFAULT_MOOD_COLOR)
}

/// Emoji for a free-form label, falling back to [`DEFAULT_MOOD_EMOJI`].
pub fn mood_emoji(label: &str) -> &'static str {
    label
        .parse::<MoodLabel>()
        .map(MoodLabel::emoji)
        .unwrap_or(DEFAULT_MOOD_EMOJI)
}

/// Stored mood log, one per logging action.
///
/// Stored at: `user_mood/{userId}/moods/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Document ID (populated on read, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    /// Owning user
    pub user_id: String,
    /// Ordinal mood 1-5; legacy writers stored it as a string
    #[serde(default, deserialize_with = "deserialize_selected_mood")]
    pub selected_mood: Option<u8>,
    /// Display label (Unhappy, Sad, Normal, Good, Happy)
    pub mood_label: String,
    /// Locale date string (`M/D/YYYY`)
    pub date: String,
    /// Locale time string, display only
    #[serde(default)]
    pub time: String,
    /// Moment of creation (RFC 3339)
    pub timestamp: String,
    /// Seconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unix_timestamp: Option<i64>,
    /// Server-side creation time; absent on documents from older writers
    #[serde(default, with = "firestore::serialize_as_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MoodEntry {
    /// Parsed label, if it is one of the known five.
    pub fn label(&self) -> Option<MoodLabel> {
        self.mood_label.parse().ok()
    }

    /// Mood value, from `selectedMood` or else from the label.
    pub fn value(&self) -> Option<u8> {
        self.selected_mood
            .filter(|v| MoodLabel::from_value(*v).is_some())
            .or_else(|| self.label().map(MoodLabel::value))
    }

    /// Instant used to order entries: `createdAt`, else `timestamp`.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| parse_rfc3339(&self.timestamp))
    }
}

/// Pick the most recent entry, keeping the first one seen on ties.
pub fn most_recent<'a, I>(entries: I) -> Option<&'a MoodEntry>
where
    I: IntoIterator<Item = &'a MoodEntry>,
{
    let mut best: Option<&MoodEntry> = None;
    for entry in entries {
        match best {
            Some(current) if entry.recency() <= current.recency() => {}
            _ => best = Some(entry),
        }
    }
    best
}

fn deserialize_selected_mood<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(v)) => u8::try_from(v).ok(),
        Some(Raw::Float(v)) if v.fract() == 0.0 && (0.0..=255.0).contains(&v) => Some(v as u8),
        Some(Raw::Float(_)) => None,
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    };
    Ok(value)
}

/// One day of the weekly mood chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct WeeklyMoodPoint {
    pub date: NaiveDate,
    /// Lowercased label of the latest entry that day
    pub mood: Option<String>,
    pub value: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl WeeklyMoodPoint {
    /// Placeholder for a day with nothing logged.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            value: None,
            time: None,
            id: None,
        }
    }

    pub fn from_entry(date: NaiveDate, entry: &MoodEntry) -> Self {
        Self {
            date,
            mood: Some(entry.mood_label.trim().to_lowercase()),
            value: entry.value(),
            time: Some(entry.time.clone()),
            id: entry.id.clone(),
        }
    }

    pub fn is_logged(&self) -> bool {
        self.mood.is_some()
    }
}
