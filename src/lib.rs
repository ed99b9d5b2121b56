// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wellness insights: mood and journaling statistics for the wellness app
//!
//! This crate turns the raw mood logs and journal entries stored in
//! Firestore into the numbers the app shows: one mood per day for a
//! display week, today's mood, and the current journaling streak.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod time_utils;

use std::sync::Arc;

use clock::{Clock, SystemClock};
use config::Config;
use db::{FirestoreDb, JournalStore, MoodStore};
use services::{JournalService, MoodService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub moods: MoodService,
    pub journal: JournalService,
}

impl AppState {
    /// Connect to Firestore and wire both services to it.
    pub async fn connect(config: Config) -> error::Result<Self> {
        let db = Arc::new(FirestoreDb::new(&config.gcp_project_id).await?);
        tracing::info!(
            project = %config.gcp_project_id,
            offset_minutes = config.calendar_zone.offset_minutes(),
            streak_window_days = config.streak_window_days,
            weekly_fetch = %config.weekly_fetch,
            "Wellness insights initialized"
        );
        Ok(Self::with_store(config, db, Arc::new(SystemClock)))
    }

    /// Wire both services to a single store handle.
    pub fn with_store<S>(config: Config, store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: MoodStore + JournalStore + 'static,
    {
        let mood_store: Arc<dyn MoodStore> = store.clone();
        let journal_store: Arc<dyn JournalStore> = store;

        let moods = MoodService::new(mood_store, clock.clone(), config.calendar_zone)
            .with_fetch_strategy(config.weekly_fetch);
        let journal = JournalService::new(journal_store, clock, config.calendar_zone)
            .with_streak_window(config.streak_window_days);

        Self {
            config,
            moods,
            journal,
        }
    }
}
