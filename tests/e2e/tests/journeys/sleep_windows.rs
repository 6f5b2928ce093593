//! Journey: session recommendations across a full day for both an evening
//! bedtime and a midnight-crossing one.

use cadence_core::{recommend, RecommendationKind, SchedulePreferences};
use chrono::NaiveTime;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn evening_bedtime_day_cycle() {
    let prefs = SchedulePreferences::parse("22:00", "07:00").unwrap();

    // Just woke up: reduced standard session.
    let early = recommend(Some(&prefs), at(7, 30));
    assert_eq!(early.kind, RecommendationKind::Standard);
    assert_eq!(early.new_concepts_allowed, 2);

    // Mid-day: full session.
    let noon = recommend(Some(&prefs), at(13, 0));
    assert_eq!(noon.kind, RecommendationKind::Standard);
    assert_eq!(noon.new_concepts_allowed, 4);
    assert_eq!(noon.suggested_duration_minutes, 25);

    // Wind-down before bed: review only, nothing new.
    let evening = recommend(Some(&prefs), at(21, 0));
    assert_eq!(evening.kind, RecommendationKind::ReviewOnly);
    assert_eq!(evening.new_concepts_allowed, 0);

    // Past bedtime: skip entirely.
    let late = recommend(Some(&prefs), at(23, 0));
    assert_eq!(late.kind, RecommendationKind::Skip);
    assert_eq!(late.suggested_duration_minutes, 0);

    // 3 AM still counts as past bedtime, not as a fresh morning.
    let overnight = recommend(Some(&prefs), at(3, 0));
    assert_eq!(overnight.kind, RecommendationKind::Skip);
}

#[test]
fn midnight_crossing_bedtime_cycle() {
    let prefs = SchedulePreferences::parse("01:00", "08:00").unwrap();

    // 22:00 is more than two hours from a 1 AM bedtime: full session.
    let evening = recommend(Some(&prefs), at(22, 0));
    assert_eq!(evening.kind, RecommendationKind::Standard);
    assert_eq!(evening.new_concepts_allowed, 4);

    // 23:30 is inside the wind-down window across midnight.
    let wind_down = recommend(Some(&prefs), at(23, 30));
    assert_eq!(wind_down.kind, RecommendationKind::ReviewOnly);

    // 2 AM is past the post-midnight bedtime.
    let past = recommend(Some(&prefs), at(2, 0));
    assert_eq!(past.kind, RecommendationKind::Skip);

    // By 7 AM the overrun heuristic releases; the learner is "up early".
    let morning = recommend(Some(&prefs), at(7, 0));
    assert_eq!(morning.kind, RecommendationKind::Standard);
}

#[test]
fn missing_preferences_never_block_study() {
    for (hour, minute) in [(0, 0), (3, 30), (12, 0), (23, 59)] {
        let rec = recommend(None, at(hour, minute));
        assert_eq!(rec.kind, RecommendationKind::Standard);
        assert_eq!(rec.new_concepts_allowed, 4);
    }
}
