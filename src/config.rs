//! Application configuration loaded from environment variables.
//!
//! Everything has a default, so a host app can start with an empty
//! environment and still get the same behavior as the mobile client.

use std::env;

use crate::services::mood::WeeklyFetchStrategy;
use crate::time_utils::CalendarZone;

/// Lookback, in days, that reproduces the mobile client's `now - 2 days` streak query.
pub const DEFAULT_STREAK_WINDOW_DAYS: u32 = 2;
/// Upper bound for the streak lookback window.
pub const MAX_STREAK_WINDOW_DAYS: u32 = 366;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID
    pub gcp_project_id: String,
    /// Offset used to map instants to calendar days
    pub calendar_zone: CalendarZone,
    /// Rolling lookback, in days, fetched for the journaling streak
    pub streak_window_days: u32,
    /// How the weekly aggregator fetches candidate documents
    pub weekly_fetch: WeeklyFetchStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gcp_project_id: "local-dev".to_string(),
            calendar_zone: CalendarZone::utc(),
            streak_window_days: DEFAULT_STREAK_WINDOW_DAYS,
            weekly_fetch: WeeklyFetchStrategy::FullScan,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let calendar_zone = match var("CALENDAR_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .parse::<i32>()
                .ok()
                .and_then(CalendarZone::from_offset_minutes)
                .ok_or(ConfigError::Invalid {
                    name: "CALENDAR_UTC_OFFSET_MINUTES",
                    value: raw,
                })?,
            None => defaults.calendar_zone,
        };

        let streak_window_days = match var("JOURNAL_STREAK_WINDOW_DAYS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=MAX_STREAK_WINDOW_DAYS).contains(days))
                .ok_or(ConfigError::Invalid {
                    name: "JOURNAL_STREAK_WINDOW_DAYS",
                    value: raw,
                })?,
            None => defaults.streak_window_days,
        };

        let weekly_fetch = match var("WEEKLY_FETCH_STRATEGY") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "WEEKLY_FETCH_STRATEGY",
                value: raw,
            })?,
            None => defaults.weekly_fetch,
        };

        Ok(Self {
            gcp_project_id: var("GCP_PROJECT_ID").unwrap_or(defaults.gcp_project_id),
            calendar_zone,
            streak_window_days,
            weekly_fetch,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
