//! FSRS-style memory scheduler.
//!
//! Pure numeric engine computing stability, difficulty, retrievability, and
//! the next review interval from a rating event.
//!
//! Core formulas (power-law forgetting curve):
//!
//! - Retrievability: `R = (1 + FACTOR * t / S)^DECAY`, clamped to `[0, 1]`
//! - Interval: `I = S / FACTOR * (retention^(1/DECAY) - 1)`, rounded and
//!   clamped to `[1, maximum_interval]`
//!
//! With `DECAY = -0.5` and `FACTOR = 0.9^(1/DECAY) - 1`, retrievability is
//! exactly 0.9 when `t = S`, which is what "stability" means here: the
//! number of days until recall probability decays to 90%.
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! Everything in this module is pure arithmetic over its arguments:
//! out-of-range inputs are clamped, never rejected.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::card::{CardPhase, MemoryCard, Rating};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Forgetting-curve decay exponent.
pub const DECAY: f64 = -0.5;

/// Forgetting-curve time factor: `0.9^(1/DECAY) - 1`, exactly `19/81`.
pub const FACTOR: f64 = 19.0 / 81.0;

/// Floor for stability, in days.
pub const MIN_STABILITY: f64 = 0.1;

/// Difficulty bounds (0.01-1 scale, higher is harder).
pub const MIN_DIFFICULTY: f64 = 0.01;
pub const MAX_DIFFICULTY: f64 = 1.0;

/// Difficulty that mean reversion pulls toward: the "Good" starting point.
pub const TARGET_DIFFICULTY: f64 = 0.3;

/// Fraction of the distance to [`TARGET_DIFFICULTY`] applied per review.
pub const MEAN_REVERSION_WEIGHT: f64 = 0.1;

/// Per-step difficulty change per rating unit away from Good.
const DIFFICULTY_STEP: f64 = 0.05;

/// Initial stability (days) for first ratings Again, Hard, Good, Easy.
const INITIAL_STABILITY: [f64; 4] = [0.4072, 1.1829, 3.1262, 15.4722];

/// Initial difficulty for first ratings Again, Hard, Good, Easy.
/// Inversely ordered: a first "Again" marks the concept as hard.
const INITIAL_DIFFICULTY: [f64; 4] = [0.7, 0.5, 0.3, 0.15];

// Stability growth on successful recall.
const RECALL_GROWTH_BASE: f64 = 1.49;
const RECALL_STABILITY_DECAY: f64 = 0.14;
const RECALL_RETRIEVABILITY_WEIGHT: f64 = 0.94;
const HARD_PENALTY: f64 = 0.5;
const EASY_BONUS: f64 = 1.3;

// Stability penalty on a lapse.
const FORGET_BASE: f64 = 1.2;
const FORGET_DIFFICULTY_EXP: f64 = 0.2;
const FORGET_STABILITY_EXP: f64 = 0.3;
const FORGET_RETRIEVABILITY_WEIGHT: f64 = 1.26;

// ============================================================================
// SCHEDULER CONFIG
// ============================================================================

/// Caller-constructed scheduler configuration.
///
/// Threaded explicitly through every scheduling call; there is no global
/// default instance. Higher `desired_retention` produces shorter intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Recall probability to schedule for, in `(0, 1)`. Default 0.9.
    pub desired_retention: f64,
    /// Longest allowed interval in days. Default 365.
    pub maximum_interval: u32,
}

impl SchedulerConfig {
    pub fn new(desired_retention: f64, maximum_interval: u32) -> Self {
        Self {
            desired_retention,
            maximum_interval,
        }
    }

    /// Retention clamped away from 0 and 1 so interval math stays finite.
    #[inline]
    fn clamped_retention(&self) -> f64 {
        self.desired_retention.clamp(0.01, 0.999)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            desired_retention: 0.9,
            maximum_interval: 365,
        }
    }
}

// ============================================================================
// CORE CURVES
// ============================================================================

/// Probability of successful recall after `elapsed_days` at `stability`.
///
/// 1.0 at `t = 0`, monotonically decreasing, never negative.
pub fn retrievability(stability: f64, elapsed_days: f64) -> f64 {
    if elapsed_days <= 0.0 {
        return 1.0;
    }
    let stability = stability.max(MIN_STABILITY);
    (1.0 + FACTOR * elapsed_days / stability)
        .powf(DECAY)
        .clamp(0.0, 1.0)
}

/// Initial stability (days) from the first rating of a card.
///
/// Strictly increasing in the rating: ~0.4 days for Again up to ~15.5 days
/// for Easy.
#[inline]
pub fn initial_stability(rating: Rating) -> f64 {
    INITIAL_STABILITY[rating.index()]
}

/// Initial difficulty from the first rating of a card.
///
/// Inversely ordered in the rating; a first "Good" starts at
/// [`TARGET_DIFFICULTY`].
#[inline]
pub fn initial_difficulty(rating: Rating) -> f64 {
    INITIAL_DIFFICULTY[rating.index()]
}

/// Next difficulty after a review.
///
/// A linear step per rating unit away from Good (+0.1 for Again, -0.05 for
/// Easy), then 10% mean reversion toward [`TARGET_DIFFICULTY`], clamped to
/// `[0.01, 1]`.
pub fn next_difficulty(difficulty: f64, rating: Rating) -> f64 {
    let stepped = difficulty - DIFFICULTY_STEP * (rating.value() as f64 - 3.0);
    let reverted =
        stepped * (1.0 - MEAN_REVERSION_WEIGHT) + TARGET_DIFFICULTY * MEAN_REVERSION_WEIGHT;
    reverted.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Next stability after a successful recall (Hard, Good, or Easy).
///
/// Multiplicative growth that is larger for easier concepts, smaller for
/// already-stable cards, and larger the closer the review came to the
/// forgetting threshold. Hard halves the growth term; Easy amplifies it.
/// Success never shrinks stability.
pub fn next_recall_stability(
    stability: f64,
    difficulty: f64,
    retrievability: f64,
    rating: Rating,
) -> f64 {
    let stability = stability.max(MIN_STABILITY);
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let retrievability = retrievability.clamp(0.0, 1.0);

    let modifier = match rating {
        Rating::Hard => HARD_PENALTY,
        Rating::Easy => EASY_BONUS,
        _ => 1.0,
    };

    let growth = RECALL_GROWTH_BASE.exp()
        * (1.1 - difficulty)
        * stability.powf(-RECALL_STABILITY_DECAY)
        * ((RECALL_RETRIEVABILITY_WEIGHT * (1.0 - retrievability)).exp() - 1.0);

    let next = stability * (1.0 + growth * modifier);
    next.max(stability + 0.01)
}

/// Next stability after a lapse (Again).
///
/// A power law of prior stability, difficulty, and current retrievability.
/// The result never exceeds the prior stability and never drops below
/// [`MIN_STABILITY`].
pub fn next_forget_stability(stability: f64, difficulty: f64, retrievability: f64) -> f64 {
    let stability = stability.max(MIN_STABILITY);
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let retrievability = retrievability.clamp(0.0, 1.0);

    let next = FORGET_BASE
        * difficulty.powf(-FORGET_DIFFICULTY_EXP)
        * ((stability + 1.0).powf(FORGET_STABILITY_EXP) - 1.0)
        * (FORGET_RETRIEVABILITY_WEIGHT * (1.0 - retrievability)).exp();

    next.clamp(MIN_STABILITY, stability)
}

/// Interval in days that lets retrievability decay to the configured
/// retention, rounded and clamped to `[1, maximum_interval]`.
pub fn next_interval(stability: f64, config: &SchedulerConfig) -> u32 {
    let retention = config.clamped_retention();
    let raw = stability.max(MIN_STABILITY) / FACTOR * (retention.powf(1.0 / DECAY) - 1.0);
    let max = config.maximum_interval.max(1) as i64;
    (raw.round() as i64).clamp(1, max) as u32
}

// ============================================================================
// REVIEW SCHEDULING
// ============================================================================

/// Result of scheduling one graded review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// The updated card.
    pub card: MemoryCard,
    /// Interval scheduled, in days.
    pub scheduled_days: u32,
    /// When the card is next due.
    pub due_date: DateTime<Utc>,
    /// Retrievability at the moment this review happened.
    pub retrievability: f64,
}

/// Scheduled interval for each of the four possible ratings, used by UIs to
/// label grading buttons before the learner answers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPreview {
    pub again_days: u32,
    pub hard_days: u32,
    pub good_days: u32,
    pub easy_days: u32,
}

/// Apply one graded review to a card.
///
/// The first rating of a card draws stability and difficulty from the
/// per-rating lookup tables; subsequent ratings move them with the recall /
/// forget curves above. The phase advances through
/// new -> learning/review -> relearning per the usual lapse rules, and a
/// lapse after graduation increments the lapse counter.
pub fn schedule_review(
    card: &MemoryCard,
    rating: Rating,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let elapsed = card.elapsed_days_at(now);
    let current_r = if card.is_new() {
        1.0
    } else {
        retrievability(card.stability, elapsed)
    };

    let (stability, difficulty) = if card.is_new() {
        (initial_stability(rating), initial_difficulty(rating))
    } else if rating.is_failure() {
        (
            next_forget_stability(card.stability, card.difficulty, current_r),
            next_difficulty(card.difficulty, rating),
        )
    } else {
        (
            next_recall_stability(card.stability, card.difficulty, current_r, rating),
            next_difficulty(card.difficulty, rating),
        )
    };

    let lapses = if rating.is_failure() && !card.is_new() {
        card.lapses + 1
    } else {
        card.lapses
    };

    let scheduled_days = next_interval(stability, config);
    let due_date = now + Duration::days(scheduled_days as i64);

    let updated = MemoryCard {
        stability,
        difficulty,
        elapsed_days: elapsed,
        scheduled_days,
        reps: card.reps + 1,
        lapses,
        phase: next_phase(card.phase, rating),
        last_review: Some(now),
    };

    ReviewOutcome {
        card: updated,
        scheduled_days,
        due_date,
        retrievability: current_r,
    }
}

/// Preview the interval each rating would schedule, without mutating state.
pub fn preview_ratings(
    card: &MemoryCard,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> RatingPreview {
    RatingPreview {
        again_days: schedule_review(card, Rating::Again, config, now).scheduled_days,
        hard_days: schedule_review(card, Rating::Hard, config, now).scheduled_days,
        good_days: schedule_review(card, Rating::Good, config, now).scheduled_days,
        easy_days: schedule_review(card, Rating::Easy, config, now).scheduled_days,
    }
}

/// Phase transition for one review.
fn next_phase(phase: CardPhase, rating: Rating) -> CardPhase {
    match (phase, rating) {
        (CardPhase::New, Rating::Again) => CardPhase::Learning,
        (CardPhase::New, _) => CardPhase::Review,
        (CardPhase::Learning, Rating::Again) => CardPhase::Learning,
        (CardPhase::Learning, _) => CardPhase::Review,
        (CardPhase::Review, Rating::Again) => CardPhase::Relearning,
        (CardPhase::Review, _) => CardPhase::Review,
        (CardPhase::Relearning, Rating::Again) => CardPhase::Relearning,
        (CardPhase::Relearning, _) => CardPhase::Review,
    }
}

// ============================================================================
// TESTS
// ============================================================================
