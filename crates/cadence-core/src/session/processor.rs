//! Session response processing.
//!
//! Orchestration layer that runs per graded answer: map the outcome to a
//! rating, advance the mastery state machine, reschedule the memory card,
//! and assemble an immutable review-history record with before/after
//! snapshots. Callers persist the outputs; nothing here is stored.
//!
//! Pretest and first-exposure items deliberately bypass the full machinery:
//! a pretest only establishes exposure, and a brand-new concept can move
//! forward (unseen -> exposed -> fragile) but never regress or be marked
//! misconceived on first contact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mastery::{self, Confidence, MasteryRecord, MasteryState, ReviewObservation};
use crate::memory::{schedule_review, MemoryCard, Rating, SchedulerConfig};

use super::builder::SessionItemKind;

// ============================================================================
// GRADED ANSWERS
// ============================================================================

/// Correct answers faster than this are rated Easy.
pub const FAST_RESPONSE_MS: u32 = 5_000;

/// One answered question, as observed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub correct: bool,
    pub response_time_ms: u32,
    /// Learner-reported confidence, if the question collected it.
    pub confidence: Option<Confidence>,
    /// Whether the question required transfer to a novel context.
    pub is_transfer_question: bool,
}

impl GradedAnswer {
    pub fn correct_in(response_time_ms: u32) -> Self {
        Self {
            correct: true,
            response_time_ms,
            confidence: None,
            is_transfer_question: false,
        }
    }

    pub fn incorrect_in(response_time_ms: u32) -> Self {
        Self {
            correct: false,
            response_time_ms,
            confidence: None,
            is_transfer_question: false,
        }
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_transfer(mut self, is_transfer: bool) -> Self {
        self.is_transfer_question = is_transfer;
        self
    }
}

/// Map an answer to a memory-model rating: wrong is Again, fast-correct is
/// Easy, slower-correct is Good. (Hard is a learner-initiated grade that the
/// binary correct/incorrect flow never produces.)
pub fn rating_for(answer: &GradedAnswer) -> Rating {
    if !answer.correct {
        Rating::Again
    } else if answer.response_time_ms < FAST_RESPONSE_MS {
        Rating::Easy
    } else {
        Rating::Good
    }
}

fn observation_for(answer: &GradedAnswer) -> ReviewObservation {
    ReviewObservation {
        rating: rating_for(answer),
        is_transfer_question: answer.is_transfer_question,
        response_time_ms: Some(answer.response_time_ms),
        confidence: answer.confidence,
    }
}

// ============================================================================
// HISTORY RECORDS
// ============================================================================

/// State/stability/difficulty at a single moment, for audit records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSnapshot {
    #[serde(rename = "masteryState")]
    pub state: MasteryState,
    pub stability: f64,
    pub difficulty: f64,
}

impl ConceptSnapshot {
    fn of(record: &MasteryRecord, card: &MemoryCard) -> Self {
        Self {
            state: record.state,
            stability: card.stability,
            difficulty: card.difficulty,
        }
    }
}

/// Immutable audit record for one graded answer. Appended to history by the
/// persistence collaborator and never modified afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistoryRecord {
    pub id: Uuid,
    pub session_id: String,
    pub concept_id: String,
    pub item_kind: SessionItemKind,
    pub rating: Rating,
    pub before: ConceptSnapshot,
    pub after: ConceptSnapshot,
    /// Interval scheduled by this review, in days. Zero for pretests.
    pub interval_days: u32,
    pub response_time_ms: u32,
    pub reviewed_at: DateTime<Utc>,
}

/// Updated state plus the audit record for one processed answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReview {
    pub card: MemoryCard,
    pub record: MasteryRecord,
    pub history: ReviewHistoryRecord,
    pub interval_days: u32,
}

// ============================================================================
// PROCESSING
// ============================================================================

/// Process a graded answer on a review item: full mastery evaluation plus
/// memory-card rescheduling.
pub fn process_review(
    session_id: &str,
    concept_id: &str,
    card: &MemoryCard,
    record: &MasteryRecord,
    answer: &GradedAnswer,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ProcessedReview {
    let observation = observation_for(answer);
    let before = ConceptSnapshot::of(record, card);

    let mut updated_record = mastery::advance(record, &observation, now);
    let outcome = schedule_review(card, observation.rating, config, now);
    updated_record.due_date = Some(outcome.due_date);

    let history = ReviewHistoryRecord {
        id: Uuid::new_v4(),
        session_id: session_id.to_string(),
        concept_id: concept_id.to_string(),
        item_kind: SessionItemKind::Review,
        rating: observation.rating,
        before,
        after: ConceptSnapshot::of(&updated_record, &outcome.card),
        interval_days: outcome.scheduled_days,
        response_time_ms: answer.response_time_ms,
        reviewed_at: now,
    };

    ProcessedReview {
        interval_days: outcome.scheduled_days,
        card: outcome.card,
        record: updated_record,
        history,
    }
}

/// Process a pretest probe: the concept becomes (or stays) exposed no
/// matter the answer, and the memory card is untouched: the concept has
/// not been taught yet.
pub fn process_pretest(
    session_id: &str,
    concept_id: &str,
    card: &MemoryCard,
    record: &MasteryRecord,
    answer: &GradedAnswer,
    now: DateTime<Utc>,
) -> ProcessedReview {
    let rating = rating_for(answer);
    let before = ConceptSnapshot::of(record, card);

    let mut updated_record = record.clone();
    if updated_record.state == MasteryState::Unseen {
        updated_record.state = MasteryState::Exposed;
    }
    updated_record.session_dates.insert(now.date_naive());
    updated_record.last_review_date = Some(now);

    let history = ReviewHistoryRecord {
        id: Uuid::new_v4(),
        session_id: session_id.to_string(),
        concept_id: concept_id.to_string(),
        item_kind: SessionItemKind::Pretest,
        rating,
        before,
        after: ConceptSnapshot::of(&updated_record, card),
        interval_days: 0,
        response_time_ms: answer.response_time_ms,
        reviewed_at: now,
    };

    ProcessedReview {
        card: card.clone(),
        record: updated_record,
        history,
        interval_days: 0,
    }
}

/// Process the first teaching of a new concept.
///
/// The memory card is initialized through the scheduler's first-rating
/// tables, but the mastery ladder is restricted: unseen -> exposed, then
/// exposed -> fragile on a success. First contact never regresses a state
/// and never marks a misconception.
pub fn process_new_concept(
    session_id: &str,
    concept_id: &str,
    card: &MemoryCard,
    record: &MasteryRecord,
    answer: &GradedAnswer,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ProcessedReview {
    let rating = rating_for(answer);
    let before = ConceptSnapshot::of(record, card);

    let mut updated_record = record.clone();
    updated_record.state = match record.state {
        MasteryState::Unseen => MasteryState::Exposed,
        MasteryState::Exposed if rating.is_success() => MasteryState::Fragile,
        state => state,
    };
    if rating.is_success() {
        updated_record.successful_sessions += 1;
        updated_record.consecutive_correct += 1;
    }
    updated_record.session_dates.insert(now.date_naive());
    updated_record.last_review_date = Some(now);

    let outcome = schedule_review(card, rating, config, now);
    updated_record.due_date = Some(outcome.due_date);

    let history = ReviewHistoryRecord {
        id: Uuid::new_v4(),
        session_id: session_id.to_string(),
        concept_id: concept_id.to_string(),
        item_kind: SessionItemKind::New,
        rating,
        before,
        after: ConceptSnapshot::of(&updated_record, &outcome.card),
        interval_days: outcome.scheduled_days,
        response_time_ms: answer.response_time_ms,
        reviewed_at: now,
    };

    ProcessedReview {
        interval_days: outcome.scheduled_days,
        card: outcome.card,
        record: updated_record,
        history,
    }
}

// ============================================================================
// SESSION AGGREGATES
// ============================================================================

/// One answer as retained for session statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredItem {
    pub kind: SessionItemKind,
    pub concept_id: String,
    pub correct: bool,
    pub response_time_ms: u32,
    pub rating: Rating,
}

/// Accuracy and speed for one item kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindBreakdown {
    pub answered: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_response_ms: f64,
}

impl KindBreakdown {
    fn from_items<'a>(items: impl Iterator<Item = &'a AnsweredItem>) -> Self {
        let mut breakdown = KindBreakdown::default();
        let mut total_ms = 0u64;
        for item in items {
            breakdown.answered += 1;
            breakdown.correct += usize::from(item.correct);
            total_ms += u64::from(item.response_time_ms);
        }
        if breakdown.answered > 0 {
            breakdown.accuracy = breakdown.correct as f64 / breakdown.answered as f64;
            breakdown.mean_response_ms = total_ms as f64 / breakdown.answered as f64;
        }
        breakdown
    }
}

/// Per-session statistics. Empty input yields all zeros, never NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub answered: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_response_ms: f64,
    pub review: KindBreakdown,
    pub new_concepts: KindBreakdown,
    pub pretest: KindBreakdown,
}

/// Aggregate answers into a session summary.
pub fn summarize(session_id: &str, answers: &[AnsweredItem]) -> SessionSummary {
    let overall = KindBreakdown::from_items(answers.iter());
    let of_kind = |kind: SessionItemKind| {
        KindBreakdown::from_items(answers.iter().filter(|item| item.kind == kind))
    };

    SessionSummary {
        session_id: session_id.to_string(),
        answered: overall.answered,
        correct: overall.correct,
        accuracy: overall.accuracy,
        mean_response_ms: overall.mean_response_ms,
        review: of_kind(SessionItemKind::Review),
        new_concepts: of_kind(SessionItemKind::New),
        pretest: of_kind(SessionItemKind::Pretest),
    }
}

// ============================================================================
// TESTS
// ============================================================================
