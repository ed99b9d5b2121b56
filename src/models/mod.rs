// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod journal;
pub mod mood;

pub use journal::{Emotion, JournalEntry, NewJournalEntry};
pub use mood::{MoodEntry, MoodLabel, WeeklyMoodPoint};
