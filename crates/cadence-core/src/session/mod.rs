//! Study sessions: composition, response processing, and the live cursor.
//!
//! [`builder`] assembles the ordered item list before a session starts;
//! [`processor`] handles each graded answer; [`ActiveSession`] is the one
//! piece of mutable state in the engine, the cursor over a session in
//! progress.

mod builder;
mod processor;

pub use builder::{
    estimate_duration, interleave, SessionItem, SessionItemKind, SessionKind, SessionPlan,
};
pub use processor::{
    process_new_concept, process_pretest, process_review, rating_for, summarize, AnsweredItem,
    ConceptSnapshot, GradedAnswer, KindBreakdown, ProcessedReview, ReviewHistoryRecord,
    SessionSummary, FAST_RESPONSE_MS,
};

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

// ============================================================================
// ACTIVE SESSION
// ============================================================================

/// A session in progress: the plan, the cursor, and the answers so far.
///
/// Intended for single-writer sequential mutation by one caller: one
/// learner, one active session. The owning layer must serialize answer
/// submissions per session; nothing here locks.
///
/// Also owns the two explicit caches the session flow needs: generated
/// mini-lesson content keyed by concept id, and the set of lesson ids
/// already completed this session. Both live here rather than in any
/// ambient state.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    id: String,
    plan: SessionPlan,
    cursor: usize,
    answers: Vec<AnsweredItem>,
    mini_lesson_cache: HashMap<String, String>,
    completed_lessons: HashSet<String>,
}

impl ActiveSession {
    /// Start a session over a built plan with a generated id.
    pub fn start(plan: SessionPlan) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), plan)
    }

    /// Start a session with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, plan: SessionPlan) -> Self {
        let id = id.into();
        tracing::debug!(
            session_id = %id,
            items = plan.items.len(),
            kind = ?plan.kind,
            "session started"
        );
        Self {
            id,
            plan,
            cursor: 0,
            answers: Vec::new(),
            mini_lesson_cache: HashMap::new(),
            completed_lessons: HashSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    /// The item the learner should answer next, if any remain.
    pub fn current_item(&self) -> Option<&SessionItem> {
        self.plan.items.get(self.cursor)
    }

    /// Whether every item has been answered.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.plan.items.len()
    }

    /// (answered, total) progress counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.plan.items.len())
    }

    /// Record an answer for the current item and advance the cursor.
    ///
    /// Returns the item the answer was recorded against, or `None` if the
    /// session was already complete (the answer is dropped).
    pub fn record_answer(&mut self, answer: AnsweredItem) -> Option<&SessionItem> {
        if self.is_complete() {
            tracing::debug!(session_id = %self.id, "answer after session end dropped");
            return None;
        }
        let position = self.cursor;
        self.answers.push(answer);
        self.cursor += 1;
        tracing::debug!(
            session_id = %self.id,
            position,
            remaining = self.plan.items.len() - self.cursor,
            "answer recorded"
        );
        self.plan.items.get(position)
    }

    /// Answers recorded so far, in order.
    pub fn answers(&self) -> &[AnsweredItem] {
        &self.answers
    }

    /// Aggregate statistics over the answers so far.
    pub fn summary(&self) -> SessionSummary {
        summarize(&self.id, &self.answers)
    }

    // ------------------------------------------------------------------
    // Mini-lesson cache
    // ------------------------------------------------------------------

    /// Cache generated mini-lesson content for a concept.
    pub fn cache_mini_lesson(&mut self, concept_id: impl Into<String>, content: impl Into<String>) {
        self.mini_lesson_cache.insert(concept_id.into(), content.into());
    }

    /// Previously cached mini-lesson content, if any.
    pub fn cached_mini_lesson(&self, concept_id: &str) -> Option<&str> {
        self.mini_lesson_cache.get(concept_id).map(String::as_str)
    }

    /// Mark a lesson as completed this session.
    pub fn mark_lesson_completed(&mut self, concept_id: impl Into<String>) {
        self.completed_lessons.insert(concept_id.into());
    }

    pub fn is_lesson_completed(&self, concept_id: &str) -> bool {
        self.completed_lessons.contains(concept_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
