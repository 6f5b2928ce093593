//! Per-concept memory card state.
//!
//! A [`MemoryCard`] holds the numeric memory parameters for one
//! concept/learner pair: stability, difficulty, repetition counters, and the
//! coarse scheduling phase. Cards are owned by exactly one learner, mutated
//! only by the scheduler in response to a rating event, and never shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RATING
// ============================================================================

/// How well a learner recalled a concept during a graded response.
///
/// Maps to the four grading buttons of classic spaced-repetition UIs:
///
/// | Rating | Value | Meaning                          |
/// |--------|-------|----------------------------------|
/// | Again  | 1     | Complete failure to recall       |
/// | Hard   | 2     | Recalled, but with real effort   |
/// | Good   | 3     | Normal successful recall         |
/// | Easy   | 4     | Effortless recall                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Rating {
    /// Complete failure to recall.
    Again = 1,
    /// Recalled with substantial effort.
    Hard = 2,
    /// Normal successful recall.
    Good = 3,
    /// Effortless recall.
    Easy = 4,
}

impl Rating {
    /// Numeric rating value (1-4).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based index for per-rating lookup tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        (self as u8 - 1) as usize
    }

    /// Parse from a numeric rating value.
    ///
    /// Returns `None` for values outside 1-4.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// Whether this rating counts as a pedagogical success (Good or Easy).
    ///
    /// Hard is neither success nor failure: it leaves mastery progression
    /// untouched.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Rating::Good | Rating::Easy)
    }

    /// Whether this rating counts as a failure (Again).
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Rating::Again)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CARD PHASE
// ============================================================================

/// Coarse scheduling phase of a card.
///
/// Distinct from the pedagogical mastery state: the phase only tracks where
/// the card sits in the review loop, not how well the concept is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardPhase {
    /// Never reviewed.
    #[default]
    New,
    /// Failed on first contact; still being acquired.
    Learning,
    /// In the regular review cycle.
    Review,
    /// Lapsed out of review and being re-acquired.
    Relearning,
}

impl CardPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CardPhase::New => "new",
            CardPhase::Learning => "learning",
            CardPhase::Review => "review",
            CardPhase::Relearning => "relearning",
        }
    }
}

impl std::fmt::Display for CardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MEMORY CARD
// ============================================================================

/// Numeric memory parameters for one concept/learner pair.
///
/// - `stability`: days until recall probability decays to 90% (always > 0
///   once reviewed)
/// - `difficulty`: learner-specific hardness on a 0.01-1 scale (higher is
///   harder)
///
/// Created on first exposure, updated exactly once per graded response, and
/// never deleted: review history must remain reconstructable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCard {
    /// Days until recall probability decays to 90%.
    pub stability: f64,
    /// Hardness estimate in `[0.01, 1]`.
    pub difficulty: f64,
    /// Days elapsed between the two most recent reviews.
    pub elapsed_days: f64,
    /// Interval scheduled at the most recent review, in days.
    pub scheduled_days: u32,
    /// Total graded reviews.
    pub reps: u32,
    /// Times the card was forgotten after entering the review cycle.
    pub lapses: u32,
    /// Scheduling phase.
    #[serde(rename = "cardPhase")]
    pub phase: CardPhase,
    /// Timestamp of the most recent review, if any.
    #[serde(rename = "lastReviewTimestamp")]
    pub last_review: Option<DateTime<Utc>>,
}

impl MemoryCard {
    /// A brand-new card with no review history.
    pub fn new() -> Self {
        Self {
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0.0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            phase: CardPhase::New,
            last_review: None,
        }
    }

    /// Whether this card has never been graded.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.reps == 0
    }

    /// Days elapsed since the last review at `now`, clamped to be
    /// non-negative. Zero for a card that has never been reviewed.
    pub fn elapsed_days_at(&self, now: DateTime<Utc>) -> f64 {
        match self.last_review {
            Some(last) => {
                let seconds = now.signed_duration_since(last).num_seconds();
                (seconds as f64 / 86_400.0).max(0.0)
            }
            None => 0.0,
        }
    }
}

impl Default for MemoryCard {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
