//! Journey: a brand-new concept progresses through the early mastery
//! stages across three days of successful reviews.

use cadence_core::{
    process_new_concept, process_review, GradedAnswer, MasteryRecord, MasteryState, MemoryCard,
    SchedulerConfig,
};
use chrono::{Duration, TimeZone, Utc};

#[test]
fn new_concept_reaches_developing_across_three_days() {
    let config = SchedulerConfig::default();
    let day1 = Utc::now();
    let day2 = day1 + Duration::days(1);
    let day3 = day2 + Duration::days(1);

    // Day 1: first teaching. Any first contact is exposure, not recall.
    let first = process_new_concept(
        "s1",
        "mitosis",
        &MemoryCard::new(),
        &MasteryRecord::new(),
        &GradedAnswer::correct_in(6_000),
        &config,
        day1,
    );
    assert_eq!(first.record.state, MasteryState::Exposed);
    assert_eq!(first.card.reps, 1);
    assert!(first.record.due_date.is_some());

    // Day 2: first successful review proves initial recall.
    let second = process_review(
        "s2",
        "mitosis",
        &first.card,
        &first.record,
        &GradedAnswer::correct_in(7_000),
        &config,
        day2,
    );
    assert_eq!(second.record.state, MasteryState::Fragile);
    assert_eq!(second.record.session_dates.len(), 2);

    // Day 3: a third distinct day of success crosses the spacing gate.
    let third = process_review(
        "s3",
        "mitosis",
        &second.card,
        &second.record,
        &GradedAnswer::correct_in(7_000),
        &config,
        day3,
    );
    assert_eq!(third.record.state, MasteryState::Developing);
    assert_eq!(third.record.successful_sessions, 3);
    assert_eq!(third.record.session_dates.len(), 3);

    // Stability grew every day, so the interval stretched out.
    assert!(third.card.stability > second.card.stability);
    assert!(second.card.stability > first.card.stability);
}

#[test]
fn same_day_cramming_does_not_cross_spacing_gates() {
    let config = SchedulerConfig::default();
    // Fixed mid-morning instant so repeated reviews stay on one calendar day.
    let day1 = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();

    let first = process_new_concept(
        "s1",
        "meiosis",
        &MemoryCard::new(),
        &MasteryRecord::new(),
        &GradedAnswer::correct_in(6_000),
        &config,
        day1,
    );

    // Three more correct answers, all on the same calendar day.
    let mut card = first.card;
    let mut record = first.record;
    for _ in 0..3 {
        let processed = process_review(
            "s1",
            "meiosis",
            &card,
            &record,
            &GradedAnswer::correct_in(7_000),
            &config,
            day1 + Duration::minutes(5),
        );
        card = processed.card;
        record = processed.record;
    }

    // Repetition proved recall once (fragile) but spacing never happened,
    // so the concept cannot reach developing today.
    assert_eq!(record.state, MasteryState::Fragile);
    assert_eq!(record.session_dates.len(), 1);
    assert!(record.successful_sessions >= 3);
}

#[test]
fn misconception_detour_and_recovery() {
    let config = SchedulerConfig::default();
    let now = Utc::now();

    let record = MasteryRecord {
        state: MasteryState::Solid,
        successful_sessions: 5,
        ..MasteryRecord::new()
    };
    let card = MemoryCard {
        stability: 12.0,
        difficulty: 0.3,
        reps: 6,
        phase: cadence_core::CardPhase::Review,
        last_review: Some(now - Duration::days(10)),
        ..MemoryCard::new()
    };

    // A confidently wrong answer on solid material flags a misconception.
    let wrong = GradedAnswer::incorrect_in(3_000)
        .with_confidence(cadence_core::Confidence::High);
    let flagged = process_review("s1", "osmosis", &card, &record, &wrong, &config, now);
    assert_eq!(flagged.record.state, MasteryState::Misconceived);
    assert!(flagged.card.stability < card.stability);

    // Recovery restarts at fragile rather than back at solid.
    let corrected = process_review(
        "s2",
        "osmosis",
        &flagged.card,
        &flagged.record,
        &GradedAnswer::correct_in(7_000),
        &config,
        now + Duration::days(1),
    );
    assert_eq!(corrected.record.state, MasteryState::Fragile);
}
