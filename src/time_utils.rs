// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar days and date/time formatting.
//!
//! Every instant is mapped to a calendar day through a [`CalendarZone`].
//! Documents still carry en-US style `M/D/YYYY` strings for compatibility
//! with existing clients, but comparisons happen on [`NaiveDate`] values.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Offset, SecondsFormat, TimeZone,
    Utc,
};

const SECONDS_PER_MINUTE: i32 = 60;
/// Largest offset chrono accepts, exclusive (24h).
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Fixed UTC offset that decides which calendar day an instant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarZone {
    offset_minutes: i32,
}

impl Default for CalendarZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl CalendarZone {
    pub const fn utc() -> Self {
        Self { offset_minutes: 0 }
    }

    /// Build a zone from an offset east of UTC, in minutes.
    ///
    /// Returns `None` when the offset is a day or more in either direction.
    pub fn from_offset_minutes(offset_minutes: i32) -> Option<Self> {
        if offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return None;
        }
        Some(Self { offset_minutes })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    fn offset(&self) -> FixedOffset {
        // Range is checked in the constructor.
        FixedOffset::east_opt(self.offset_minutes * SECONDS_PER_MINUTE)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Calendar day an instant falls on in this zone.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    /// First instant of `day` in this zone, as UTC.
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let local = day.and_time(NaiveTime::MIN);
        // Fixed offsets never produce gaps or folds.
        self.offset()
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&local))
    }

    /// Local wall-clock time of an instant in this zone.
    pub fn time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.offset()).time()
    }
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC3339 timestamp into UTC.
pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// en-US short date without padding, e.g. `3/7/2026`.
pub fn locale_date_string(day: NaiveDate) -> String {
    format!("{}/{}/{}", day.month(), day.day(), day.year())
}

/// en-US wall-clock time, e.g. `9:05:03 PM`.
pub fn locale_time_string(time: NaiveTime) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

/// Parse a stored date string back into a calendar day.
///
/// Accepts the `M/D/YYYY` form this crate writes as well as ISO `YYYY-MM-DD`.
pub fn parse_locale_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some((month, rest)) = value.split_once('/') {
        let (day, year) = rest.split_once('/')?;
        return NaiveDate::from_ymd_opt(
            year.trim().parse().ok()?,
            month.trim().parse().ok()?,
            day.trim().parse().ok()?,
        );
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Shift a day by whole weeks; positive moves into the future.
pub fn shift_weeks(day: NaiveDate, week_offset: i32) -> NaiveDate {
    let days = u64::from(week_offset.unsigned_abs()) * 7;
    let shifted = if week_offset >= 0 {
        day.checked_add_days(Days::new(days))
    } else {
        day.checked_sub_days(Days::new(days))
    };
    shifted.unwrap_or(day)
}

/// The seven days ending on `today`, shifted by `week_offset` weeks, oldest first.
pub fn display_week(today: NaiveDate, week_offset: i32) -> [NaiveDate; 7] {
    let end = shift_weeks(today, week_offset);
    let mut week = [end; 7];
    for (i, slot) in week.iter_mut().enumerate() {
        *slot = end
            .checked_sub_days(Days::new(6 - i as u64))
            .unwrap_or(end);
    }
    week
}

/// Human-readable range for a display week, e.g. `Mar 1 - Mar 7`.
pub fn format_week_range(week: &[NaiveDate]) -> String {
    match (week.iter().min(), week.iter().max()) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            start.format("%b %-d"),
            end.format("%b %-d")
        ),
        _ => String::new(),
    }
}
