//! Mastery state machine.
//!
//! A seven-state pedagogical progression layered on top of review outcomes.
//! Where the memory model answers "when should this come back?", the mastery
//! machine answers "how well is this actually known?".
//!
//! States form a ladder (`unseen` through `mastered`) with one escape hatch:
//! a confident wrong answer marks the concept `misconceived`, which outranks
//! everything else in review priority because an actively-held wrong belief
//! is worse than ignorance.
//!
//! Two rules shape every transition:
//!
//! - Only Good and Easy ratings count as success; Again is failure; Hard is
//!   pedagogically neutral and moves nothing.
//! - Advancing past the early stages requires successes on **distinct
//!   calendar days**. Repeating a concept five times in one sitting proves
//!   short-term recall, not retention, so same-day repetition never
//!   satisfies a multi-day gate.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::Rating;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Successes (on distinct days) required to leave `fragile`.
pub const FRAGILE_GATE_SESSIONS: u32 = 2;

/// Successes (on distinct days) required to leave `developing`.
pub const DEVELOPING_GATE_SESSIONS: u32 = 3;

/// A transfer question answered faster than this (ms) can prove mastery.
pub const MASTERY_SPEED_THRESHOLD_MS: u32 = 5_000;

// ============================================================================
// MASTERY STATE
// ============================================================================

/// Pedagogical stage of one concept for one learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MasteryState {
    /// Never encountered.
    #[default]
    Unseen,
    /// Encountered at least once; no demonstrated recall yet.
    Exposed,
    /// Recalled once; retention not yet demonstrated across days.
    Fragile,
    /// Recalled on multiple distinct days; consolidating.
    Developing,
    /// Reliably recalled across days.
    Solid,
    /// Proven by fast transfer: applied to a novel context without effort.
    Mastered,
    /// Confidently wrong: the learner holds an active misconception.
    Misconceived,
}

impl MasteryState {
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryState::Unseen => "unseen",
            MasteryState::Exposed => "exposed",
            MasteryState::Fragile => "fragile",
            MasteryState::Developing => "developing",
            MasteryState::Solid => "solid",
            MasteryState::Mastered => "mastered",
            MasteryState::Misconceived => "misconceived",
        }
    }

    /// Parse from a stored literal. Unknown input maps to `Unseen`.
    pub fn parse_name(s: &str) -> Self {
        match s {
            "exposed" => MasteryState::Exposed,
            "fragile" => MasteryState::Fragile,
            "developing" => MasteryState::Developing,
            "solid" => MasteryState::Solid,
            "mastered" => MasteryState::Mastered,
            "misconceived" => MasteryState::Misconceived,
            _ => MasteryState::Unseen,
        }
    }
}

impl std::fmt::Display for MasteryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Learner-reported confidence attached to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

// ============================================================================
// MASTERY RECORD
// ============================================================================

/// Persistent mastery bookkeeping for one concept/learner pair.
///
/// Mirrors the memory card but carries the coarser pedagogical state plus
/// the counters the day-distinctness gates need. Created on first exposure,
/// updated once per graded response, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    /// Current pedagogical stage.
    #[serde(rename = "masteryState")]
    pub state: MasteryState,
    /// Lifetime count of successful (Good/Easy) reviews.
    pub successful_sessions: u32,
    /// Current streak of successes; reset by Again, untouched by Hard.
    pub consecutive_correct: u32,
    /// Calendar days on which this concept was reviewed.
    pub session_dates: BTreeSet<NaiveDate>,
    /// When the concept is next due for review.
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of the most recent review.
    pub last_review_date: Option<DateTime<Utc>>,
}

impl MasteryRecord {
    /// A fresh record for a concept the learner has never seen.
    pub fn new() -> Self {
        Self {
            state: MasteryState::Unseen,
            successful_sessions: 0,
            consecutive_correct: 0,
            session_dates: BTreeSet::new(),
            due_date: None,
            last_review_date: None,
        }
    }

    /// Distinct review days counting `today`, whether or not `today` is
    /// already recorded. This is the quantity the multi-day gates check.
    fn distinct_days_including(&self, today: NaiveDate) -> usize {
        if self.session_dates.contains(&today) {
            self.session_dates.len()
        } else {
            self.session_dates.len() + 1
        }
    }
}

impl Default for MasteryRecord {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// REVIEW OBSERVATION
// ============================================================================

/// Everything observed about one graded response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewObservation {
    /// The rating for the response.
    pub rating: Rating,
    /// Whether the question required applying the concept in a novel
    /// context (transfer), as opposed to recognition or recall.
    pub is_transfer_question: bool,
    /// Time to answer, in milliseconds.
    pub response_time_ms: Option<u32>,
    /// Learner-reported confidence, if collected.
    pub confidence: Option<Confidence>,
}

impl ReviewObservation {
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            is_transfer_question: false,
            response_time_ms: None,
            confidence: None,
        }
    }

    pub fn with_transfer(mut self, is_transfer: bool) -> Self {
        self.is_transfer_question = is_transfer;
        self
    }

    pub fn with_response_time(mut self, millis: u32) -> Self {
        self.response_time_ms = Some(millis);
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// A confident failure signals a held misconception, not a memory gap.
    fn is_confident_failure(&self) -> bool {
        self.rating.is_failure() && self.confidence == Some(Confidence::High)
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Compute the next mastery state for one graded response.
///
/// Pure and total: every (state, observation) pair yields a valid state, the
/// same pair always yields the same state, and nothing is mutated. The
/// record's counters are read as they stood **before** this response; the
/// current response is counted by the gates themselves.
pub fn evaluate(record: &MasteryRecord, obs: &ReviewObservation, today: NaiveDate) -> MasteryState {
    let success = obs.rating.is_success();
    let failure = obs.rating.is_failure();

    // A confident wrong answer on anything already seen marks an active
    // misconception, whatever the current stage.
    if record.state != MasteryState::Unseen && obs.is_confident_failure() {
        return MasteryState::Misconceived;
    }

    let successes = record.successful_sessions + u32::from(success);
    let distinct_days = record.distinct_days_including(today);

    match record.state {
        // First contact counts as exposure no matter how it was rated.
        MasteryState::Unseen => MasteryState::Exposed,

        MasteryState::Exposed => {
            if success {
                MasteryState::Fragile
            } else {
                MasteryState::Exposed
            }
        }

        MasteryState::Fragile => {
            if failure {
                MasteryState::Exposed
            } else if success
                && successes >= FRAGILE_GATE_SESSIONS
                && distinct_days >= FRAGILE_GATE_SESSIONS as usize
            {
                MasteryState::Developing
            } else {
                MasteryState::Fragile
            }
        }

        MasteryState::Developing => {
            if failure {
                MasteryState::Fragile
            } else if success
                && successes >= DEVELOPING_GATE_SESSIONS
                && distinct_days >= DEVELOPING_GATE_SESSIONS as usize
            {
                MasteryState::Solid
            } else {
                MasteryState::Developing
            }
        }

        MasteryState::Solid => {
            if failure {
                MasteryState::Fragile
            } else if obs.rating == Rating::Easy
                && obs.is_transfer_question
                && obs.response_time_ms.is_some_and(|ms| ms < MASTERY_SPEED_THRESHOLD_MS)
            {
                MasteryState::Mastered
            } else {
                MasteryState::Solid
            }
        }

        MasteryState::Mastered => {
            if failure {
                MasteryState::Solid
            } else {
                MasteryState::Mastered
            }
        }

        // Recovery from a misconception restarts at fragile, not where the
        // learner left off.
        MasteryState::Misconceived => {
            if success {
                MasteryState::Fragile
            } else {
                MasteryState::Misconceived
            }
        }
    }
}

/// Evaluate a response and fold it into the record's bookkeeping.
///
/// Returns a new record; the input is untouched. Counter rules: Good/Easy
/// increment both counters, Again resets the streak, Hard touches neither.
/// The due date is left for the caller to fill from the memory scheduler.
pub fn advance(
    record: &MasteryRecord,
    obs: &ReviewObservation,
    now: DateTime<Utc>,
) -> MasteryRecord {
    let today = now.date_naive();
    let next_state = evaluate(record, obs, today);

    let mut updated = record.clone();
    updated.state = next_state;
    match obs.rating {
        Rating::Good | Rating::Easy => {
            updated.successful_sessions += 1;
            updated.consecutive_correct += 1;
        }
        Rating::Again => updated.consecutive_correct = 0,
        Rating::Hard => {}
    }
    updated.session_dates.insert(today);
    updated.last_review_date = Some(now);
    updated
}

// ============================================================================
// TESTS
// ============================================================================
