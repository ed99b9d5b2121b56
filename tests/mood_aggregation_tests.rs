// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly mood aggregation and today's mood, against the in-memory store.

use wellness_insights::config::Config;
use wellness_insights::error::AppError;
use wellness_insights::models::MoodLabel;
use wellness_insights::services::mood::DEFAULT_MOOD_HISTORY_LIMIT;
use wellness_insights::services::WeeklyFetchStrategy;
use wellness_insights::time_utils::{display_week, CalendarZone};

mod common;
use common::{at, create_test_state, day, mood_at};

const USER: &str = "user-abc";

fn config_with(fetch: WeeklyFetchStrategy) -> Config {
    Config {
        weekly_fetch: fetch,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_week_has_one_point_per_requested_day() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.seed_mood(mood_at(USER, MoodLabel::Good, at(day(2026, 3, 8), 9)));

    let week = display_week(today, 0);
    let points = state.moods.weekly_moods(USER, &week, 0).await.unwrap();

    assert_eq!(points.len(), 7);
    assert_eq!(points.iter().filter(|p| p.is_logged()).count(), 1);

    let logged = points.iter().find(|p| p.is_logged()).unwrap();
    assert_eq!(logged.date, day(2026, 3, 8));
    assert_eq!(logged.mood.as_deref(), Some("good"));
    assert_eq!(logged.value, Some(4));

    for point in points.iter().filter(|p| !p.is_logged()) {
        assert!(point.value.is_none());
        assert!(point.time.is_none());
    }
}

#[tokio::test]
async fn test_latest_log_of_the_day_wins() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.seed_mood(mood_at(USER, MoodLabel::Sad, at(today, 8)));
    store.seed_mood(mood_at(USER, MoodLabel::Happy, at(today, 17)));
    store.seed_mood(mood_at(USER, MoodLabel::Normal, at(today, 12)));

    let points = state.moods.weekly_moods(USER, &[today], 0).await.unwrap();
    assert_eq!(points[0].mood.as_deref(), Some("happy"));
    assert_eq!(points[0].value, Some(5));
}

#[tokio::test]
async fn test_week_offset_shifts_every_day() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.seed_mood(mood_at(USER, MoodLabel::Unhappy, at(day(2026, 3, 3), 10)));
    store.seed_mood(mood_at(USER, MoodLabel::Happy, at(today, 10)));

    let current = display_week(today, 0);
    let previous = state.moods.weekly_moods(USER, &current, -1).await.unwrap();

    assert_eq!(previous[0].date, day(2026, 2, 25));
    assert_eq!(previous[6].date, day(2026, 3, 3));
    assert_eq!(previous[6].mood.as_deref(), Some("unhappy"));
    assert!(previous[..6].iter().all(|p| !p.is_logged()));
}

#[tokio::test]
async fn test_unsorted_input_comes_back_sorted() {
    let today = day(2026, 3, 10);
    let (state, _store) = create_test_state(Config::default(), at(today, 18));

    let dates = [day(2026, 3, 9), day(2026, 3, 4), day(2026, 3, 7)];
    let points = state.moods.weekly_moods(USER, &dates, 0).await.unwrap();

    let returned: Vec<_> = points.iter().map(|p| p.date).collect();
    assert_eq!(
        returned,
        vec![day(2026, 3, 4), day(2026, 3, 7), day(2026, 3, 9)]
    );
}

#[tokio::test]
async fn test_empty_dates_skip_the_fetch() {
    let (state, store) = create_test_state(Config::default(), at(day(2026, 3, 10), 18));

    let points = state.moods.weekly_moods(USER, &[], 0).await.unwrap();
    assert!(points.is_empty());
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn test_fetch_strategies_agree() {
    let today = day(2026, 3, 10);
    let week = display_week(today, 0);
    let mut results = Vec::new();

    for fetch in [WeeklyFetchStrategy::FullScan, WeeklyFetchStrategy::DateRange] {
        let (state, store) = create_test_state(config_with(fetch), at(today, 18));
        // Outside the week on both sides
        store.seed_mood(mood_at(USER, MoodLabel::Sad, at(day(2026, 3, 3), 23)));
        store.seed_mood(mood_at(USER, MoodLabel::Sad, at(day(2026, 3, 11), 0)));
        // Inside
        store.seed_mood(mood_at(USER, MoodLabel::Good, at(day(2026, 3, 4), 0)));
        store.seed_mood(mood_at(USER, MoodLabel::Normal, at(day(2026, 3, 6), 14)));
        store.seed_mood(mood_at(USER, MoodLabel::Happy, at(today, 23)));

        assert_eq!(state.moods.fetch_strategy(), fetch);
        results.push(state.moods.weekly_moods(USER, &week, 0).await.unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0].iter().filter(|p| p.is_logged()).count(), 3);
}

#[tokio::test]
async fn test_fetch_strategies_agree_outside_utc() {
    let today = day(2026, 3, 10);
    let week = display_week(today, 0);
    let eastern = CalendarZone::from_offset_minutes(-5 * 60).unwrap();
    let mut results = Vec::new();

    for fetch in [WeeklyFetchStrategy::FullScan, WeeklyFetchStrategy::DateRange] {
        let config = Config {
            calendar_zone: eastern,
            weekly_fetch: fetch,
            ..Config::default()
        };
        let (state, store) = create_test_state(config, at(day(2026, 3, 11), 3));
        // 3/3 23:00 local, before the week
        store.seed_mood(mood_at(USER, MoodLabel::Sad, at(day(2026, 3, 4), 4)));
        // 3/4 01:00 local, first day
        store.seed_mood(mood_at(USER, MoodLabel::Good, at(day(2026, 3, 4), 6)));
        // 3/10 22:00 local, last day
        store.seed_mood(mood_at(USER, MoodLabel::Happy, at(day(2026, 3, 11), 3)));
        // 3/11 01:00 local, after the week
        store.seed_mood(mood_at(USER, MoodLabel::Sad, at(day(2026, 3, 11), 6)));

        results.push(state.moods.weekly_moods(USER, &week, 0).await.unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0][0].mood.as_deref(), Some("good"));
    assert_eq!(results[0][6].mood.as_deref(), Some("happy"));
    assert_eq!(results[0].iter().filter(|p| p.is_logged()).count(), 2);
}

#[tokio::test]
async fn test_other_users_are_invisible() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.seed_mood(mood_at("someone-else", MoodLabel::Happy, at(today, 9)));

    let points = state.moods.weekly_moods(USER, &[today], 0).await.unwrap();
    assert!(!points[0].is_logged());
    assert!(state.moods.todays_mood(USER).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_failure_is_an_error() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.set_fail_reads(true);

    let err = state
        .moods
        .weekly_moods(USER, &display_week(today, 0), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)));

    let err = state.moods.todays_mood(USER).await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)));
}

#[tokio::test]
async fn test_missing_user_id_is_rejected_before_any_read() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));

    let err = state
        .moods
        .weekly_moods("  ", &[today], 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    let err = state.moods.todays_mood("").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert!(err.is_caller_error());

    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn test_todays_mood_none_until_logged() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    store.seed_mood(mood_at(USER, MoodLabel::Good, at(day(2026, 3, 9), 22)));

    assert!(state.moods.todays_mood(USER).await.unwrap().is_none());

    store.seed_mood(mood_at(USER, MoodLabel::Sad, at(today, 7)));
    store.seed_mood(mood_at(USER, MoodLabel::Normal, at(today, 15)));

    let found = state.moods.todays_mood(USER).await.unwrap().unwrap();
    assert_eq!(found.mood_label, "Normal");
    assert_eq!(found.value(), Some(3));
}

#[tokio::test]
async fn test_logged_mood_shows_up_everywhere() {
    let today = day(2026, 3, 10);
    let (state, _store) = create_test_state(Config::default(), at(today, 18));

    let stored = state.moods.log_mood(USER, MoodLabel::Good).await.unwrap();
    assert!(stored.id.is_some());
    assert_eq!(stored.date, "3/10/2026");
    assert_eq!(stored.time, "6:00:00 PM");
    assert_eq!(stored.timestamp, "2026-03-10T18:00:00.000Z");

    let todays = state.moods.todays_mood(USER).await.unwrap().unwrap();
    assert_eq!(todays.id, stored.id);

    let history = state
        .moods
        .mood_history(USER, DEFAULT_MOOD_HISTORY_LIMIT)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);

    let points = state
        .moods
        .weekly_moods(USER, &display_week(today, 0), 0)
        .await
        .unwrap();
    assert_eq!(points[6].mood.as_deref(), Some("good"));
}

#[tokio::test]
async fn test_mood_history_newest_first_and_limited() {
    let today = day(2026, 3, 10);
    let (state, store) = create_test_state(Config::default(), at(today, 18));
    for d in 1..=9 {
        store.seed_mood(mood_at(USER, MoodLabel::Normal, at(day(2026, 3, d), 12)));
    }

    let history = state.moods.mood_history(USER, 3).await.unwrap();
    let days: Vec<_> = history.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(days, vec!["3/9/2026", "3/8/2026", "3/7/2026"]);

    let err = state.moods.mood_history(USER, 0).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}
