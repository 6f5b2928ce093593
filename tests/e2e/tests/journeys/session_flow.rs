//! Journey: compose a session, answer every item through the live cursor,
//! and check the audit trail and final statistics.

use std::collections::HashMap;

use cadence_core::{
    interleave, process_new_concept, process_pretest, process_review, rating_for, ActiveSession,
    AnsweredItem, GradedAnswer, MasteryRecord, MemoryCard, ReviewHistoryRecord, SchedulerConfig,
    SessionItemKind, SessionKind,
};
use cadence_e2e_tests::fixtures::TestDataFactory;
use chrono::Utc;

#[test]
fn full_session_round_trip() {
    let config = SchedulerConfig::default();
    let now = Utc::now();

    let reviews: Vec<String> = ["photosynthesis", "osmosis", "diffusion"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let new: Vec<String> = vec!["active-transport".to_string()];

    let plan = interleave(&reviews, &new, 2);
    assert_eq!(plan.kind, SessionKind::Standard);

    // Collaborator-side state: one card and record per concept.
    let mut cards: HashMap<String, MemoryCard> = HashMap::new();
    let mut records: HashMap<String, MasteryRecord> = HashMap::new();
    for id in reviews.iter() {
        cards.insert(id.clone(), TestDataFactory::review_card(6.0, 6, now));
        records.insert(
            id.clone(),
            TestDataFactory::mastery_record(cadence_core::MasteryState::Developing, 2, 2, now),
        );
    }
    cards.insert(new[0].clone(), MemoryCard::new());
    records.insert(new[0].clone(), MasteryRecord::new());

    let mut session = ActiveSession::start(plan);
    let session_id = session.id().to_string();
    let mut history: Vec<ReviewHistoryRecord> = Vec::new();

    while let Some(item) = session.current_item().cloned() {
        let answer = GradedAnswer::correct_in(4_000);
        let card = cards[&item.concept_id].clone();
        let record = records[&item.concept_id].clone();

        let processed = match item.kind {
            SessionItemKind::Review => process_review(
                &session_id,
                &item.concept_id,
                &card,
                &record,
                &answer,
                &config,
                now,
            ),
            SessionItemKind::Pretest => {
                process_pretest(&session_id, &item.concept_id, &card, &record, &answer, now)
            }
            SessionItemKind::New => process_new_concept(
                &session_id,
                &item.concept_id,
                &card,
                &record,
                &answer,
                &config,
                now,
            ),
        };

        cards.insert(item.concept_id.clone(), processed.card);
        records.insert(item.concept_id.clone(), processed.record);
        history.push(processed.history.clone());

        session.record_answer(AnsweredItem {
            kind: item.kind,
            concept_id: item.concept_id.clone(),
            correct: answer.correct,
            response_time_ms: answer.response_time_ms,
            rating: rating_for(&answer),
        });
    }

    assert!(session.is_complete());

    // One history record per answered item, all tagged with this session.
    assert_eq!(history.len(), session.answers().len());
    assert!(history.iter().all(|h| h.session_id == session_id));

    // Every review rescheduled its card into the future.
    for id in &reviews {
        assert!(cards[id].stability > 6.0);
        assert!(records[id].due_date.is_some());
    }

    // The new concept was initialized; the pretest exposed it and the
    // correct first teaching proved initial recall.
    assert_eq!(cards[&new[0]].reps, 1);
    assert_eq!(records[&new[0]].state, cadence_core::MasteryState::Fragile);

    let summary = session.summary();
    assert_eq!(summary.answered, 5);
    assert_eq!(summary.accuracy, 1.0);
    assert_eq!(summary.review.answered, 3);
    assert_eq!(summary.pretest.answered, 1);
    assert_eq!(summary.new_concepts.answered, 1);
}

#[test]
fn history_records_survive_serialization() {
    let config = SchedulerConfig::default();
    let now = Utc::now();

    let processed = process_review(
        "s1",
        "photosynthesis",
        &TestDataFactory::review_card(5.0, 5, now),
        &TestDataFactory::mastery_record(cadence_core::MasteryState::Fragile, 1, 1, now),
        &GradedAnswer::correct_in(3_000),
        &config,
        now,
    );

    let json = serde_json::to_string(&processed.history).unwrap();
    assert!(json.contains("\"itemKind\":\"review\""));
    assert!(json.contains("\"rating\":\"easy\""));
    assert!(json.contains("\"before\""));
    assert!(json.contains("\"after\""));

    let back: ReviewHistoryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, processed.history);
}
