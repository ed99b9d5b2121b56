// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Journal entry documents and the input for saving new ones.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use validator::{Validate, ValidationError};

use crate::time_utils::{parse_locale_date, parse_rfc3339, CalendarZone};

/// Prompt stored when the client did not supply one.
pub const FALLBACK_PROMPT: &str = "Reflect on your current thoughts and feelings.";
/// Most emotions a single entry may carry.
pub const MAX_EMOTIONS: usize = 3;

/// Emotions offered when writing a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Grateful,
    Motivated,
    Sad,
    Stressed,
    Anxious,
    Excited,
    Calm,
    Confident,
    Curious,
    Frustrated,
    Hopeful,
    Inspired,
    Lonely,
    Nervous,
    Peaceful,
    Proud,
    Relaxed,
    Surprised,
    Tired,
}

impl Emotion {
    pub const ALL: [Emotion; 20] = [
        Emotion::Happy,
        Emotion::Grateful,
        Emotion::Motivated,
        Emotion::Sad,
        Emotion::Stressed,
        Emotion::Anxious,
        Emotion::Excited,
        Emotion::Calm,
        Emotion::Confident,
        Emotion::Curious,
        Emotion::Frustrated,
        Emotion::Hopeful,
        Emotion::Inspired,
        Emotion::Lonely,
        Emotion::Nervous,
        Emotion::Peaceful,
        Emotion::Proud,
        Emotion::Relaxed,
        Emotion::Surprised,
        Emotion::Tired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Grateful => "Grateful",
            Emotion::Motivated => "Motivated",
            Emotion::Sad => "Sad",
            Emotion::Stressed => "Stressed",
            Emotion::Anxious => "Anxious",
            Emotion::Excited => "Excited",
            Emotion::Calm => "Calm",
            Emotion::Confident => "Confident",
            Emotion::Curious => "Curious",
            Emotion::Frustrated => "Frustrated",
            Emotion::Hopeful => "Hopeful",
            Emotion::Inspired => "Inspired",
            Emotion::Lonely => "Lonely",
            Emotion::Nervous => "Nervous",
            Emotion::Peaceful => "Peaceful",
            Emotion::Proud => "Proud",
            Emotion::Relaxed => "Relaxed",
            Emotion::Surprised => "Surprised",
            Emotion::Tired => "Tired",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored journal entry, one per save.
///
/// Stored at: `user_journals/{userId}/entries/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Document ID (populated on read)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub user_id: String,
    /// Kept as strings so entries with retired emotions still load
    #[serde(default)]
    pub selected_emotions: Vec<String>,
    #[serde(default)]
    pub prompt: String,
    pub journal_entry: String,
    /// Locale date string (`M/D/YYYY`)
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Moment of creation (RFC 3339)
    pub timestamp: String,
    #[serde(default, with = "firestore::serialize_as_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Calendar day of the entry: its `date` string, else the day of its `timestamp`.
    pub fn day(&self, zone: &CalendarZone) -> Option<NaiveDate> {
        parse_locale_date(&self.date)
            .or_else(|| parse_rfc3339(&self.timestamp).map(|ts| zone.day_of(ts)))
    }
}

/// Input for saving a journal entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    #[validate(
        length(min = 1, max = 3, message = "Select between 1 and 3 emotions"),
        custom(function = "validate_distinct_emotions")
    )]
    pub selected_emotions: Vec<Emotion>,

    #[validate(length(max = 2000, message = "Prompt too long"))]
    #[serde(default)]
    pub prompt: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub journal_entry: String,
}

impl NewJournalEntry {
    /// Prompt to store, substituting [`FALLBACK_PROMPT`] for a blank one.
    pub fn effective_prompt(&self) -> &str {
        if self.prompt.trim().is_empty() {
            FALLBACK_PROMPT
        } else {
            &self.prompt
        }
    }
}

fn validate_distinct_emotions(emotions: &[Emotion]) -> Result<(), ValidationError> {
    let unique: HashSet<_> = emotions.iter().collect();
    if unique.len() != emotions.len() {
        return Err(ValidationError::new("duplicate_emotion"));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Journal entry is empty".into()));
    }
    Ok(())
}
