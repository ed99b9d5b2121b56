// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod journal;
pub mod mood;

pub use journal::JournalService;
pub use mood::{MoodService, WeeklyFetchStrategy};
