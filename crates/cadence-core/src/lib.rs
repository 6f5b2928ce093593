//! # Cadence Core
//!
//! Adaptive spaced-repetition scheduling engine for learning apps. Decides
//! *what* a learner reviews, *when*, at *what difficulty*, and how mastery
//! is tracked over time:
//!
//! - **Memory Model**: FSRS-style stability/difficulty/retrievability
//!   scheduler with caller-supplied retention targets
//! - **Mastery Machine**: seven-state pedagogical progression with
//!   distinct-day gates and misconception detection
//! - **Review Queue**: urgency ranking from overdueness, state, and
//!   memory instability
//! - **Cognitive Load**: circadian + sleep + fatigue adjusted
//!   working-memory capacity (Miller's law baseline)
//! - **Sleep-Aware Scheduling**: skip / review-only / standard session
//!   policy around the learner's bedtime
//! - **Question Weighting**: phase-based, adaptively adjusted question-type
//!   mix with injectable randomness
//! - **Session Builder**: interleaved review/new-concept composition under
//!   a capacity budget
//! - **Response Processor**: per-answer orchestration producing audit-ready
//!   history records
//!
//! ## Design
//!
//! The engine is a pure computation library. Every operation takes current
//! state, an observation, and a clock, and returns new state plus derived
//! records; persistence and presentation belong to the caller. All
//! functions are total: out-of-range numerics clamp, empty aggregates are
//! zero-valued, and missing preferences degrade to documented defaults.
//!
//! The only mutable state is [`ActiveSession`], the cursor over a session
//! in progress, which expects single-writer use.
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence_core::{
//!     interleave, process_review, GradedAnswer, MasteryRecord, MemoryCard,
//!     SchedulerConfig,
//! };
//! use chrono::Utc;
//!
//! // Compose a session: two reviews interleaved around one new concept.
//! let reviews = vec!["osmosis".to_string(), "diffusion".to_string()];
//! let new = vec!["active-transport".to_string()];
//! let plan = interleave(&reviews, &new, 4);
//! assert_eq!(plan.items.len(), 4);
//!
//! // Grade an answer and get updated state plus an audit record.
//! let config = SchedulerConfig::default();
//! let processed = process_review(
//!     "session-1",
//!     "osmosis",
//!     &MemoryCard::new(),
//!     &MasteryRecord::new(),
//!     &GradedAnswer::correct_in(4_200),
//!     &config,
//!     Utc::now(),
//! );
//! assert!(processed.interval_days >= 1);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod capacity;
pub mod error;
pub mod mastery;
pub mod memory;
pub mod queue;
pub mod schedule;
pub mod session;
pub mod weighting;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Memory model
pub use memory::{
    initial_difficulty, initial_stability, next_difficulty, next_forget_stability,
    next_interval, next_recall_stability, preview_ratings, retrievability, schedule_review,
    CardPhase, MemoryCard, Rating, RatingPreview, ReviewOutcome, SchedulerConfig,
};

// Mastery state machine
pub use mastery::{
    advance, evaluate, Confidence, MasteryRecord, MasteryState, ReviewObservation,
};

// Review queue
pub use queue::{
    filter_due, filter_overdue, priority, queue_stats, sort_by_priority, state_priority_weight,
    ConceptMeta, QueueStats, ReviewQueueItem, StateCounts,
};

// Cognitive load
pub use capacity::{
    assess, circadian_modifier, fatigue_modifier, warning_level, CognitiveCapacity,
    SleepQuality, WarningLevel, BASE_CAPACITY,
};

// Sleep-aware scheduling
pub use schedule::{
    is_past_bedtime, is_within_morning_window, is_within_sleep_window, minutes_since_wake,
    minutes_until_bedtime, parse_clock, recommend, RecommendationKind, SchedulePreferences,
    SessionRecommendation,
};

// Question weighting
pub use weighting::{
    adjusted_weights, base_weights, select, BloomLevel, LessonPhase, QuestionPicker,
    QuestionType, QuestionWeights, WeightingContext,
};

// Sessions
pub use session::{
    estimate_duration, interleave, process_new_concept, process_pretest, process_review,
    rating_for, summarize, ActiveSession, AnsweredItem, ConceptSnapshot, GradedAnswer,
    KindBreakdown, ProcessedReview, ReviewHistoryRecord, SessionItem, SessionItemKind,
    SessionKind, SessionPlan, SessionSummary,
};

// Errors
pub use error::{EngineError, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        assess, interleave, recommend, schedule_review, ActiveSession, CognitiveCapacity,
        Confidence, EngineError, GradedAnswer, MasteryRecord, MasteryState, MemoryCard,
        ProcessedReview, QuestionPicker, Rating, Result, ReviewHistoryRecord, ReviewQueueItem,
        SchedulePreferences, SchedulerConfig, SessionItem, SessionPlan, SessionRecommendation,
        SessionSummary, WarningLevel,
    };
}
