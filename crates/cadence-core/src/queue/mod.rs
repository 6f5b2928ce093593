//! Review queue prioritizer.
//!
//! Ranks due concepts by urgency. The priority score combines three
//! pressures:
//!
//! 1. **Overdueness**: 10 points per day overdue, saturating at 30 days so
//!    one abandoned concept cannot starve the rest of the queue forever.
//! 2. **Pedagogical state**: misconceptions first, then the fragile early
//!    stages, with comfortably-known material last.
//! 3. **Instability**: up to 20 points for low-stability memories, decaying
//!    logarithmically as stability grows.
//!
//! Queue items are read-only projections: they join a mastery record with
//! concept metadata at refresh time and are recomputed rather than mutated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mastery::{MasteryRecord, MasteryState};

// ============================================================================
// STATE WEIGHTS
// ============================================================================

/// Priority contribution of each mastery state.
///
/// `unseen` concepts are introduced by the session builder, never queued for
/// review, so their weight is zero.
pub fn state_priority_weight(state: MasteryState) -> f64 {
    match state {
        MasteryState::Misconceived => 100.0,
        MasteryState::Fragile => 80.0,
        MasteryState::Exposed => 60.0,
        MasteryState::Developing => 40.0,
        MasteryState::Solid => 20.0,
        MasteryState::Mastered => 10.0,
        MasteryState::Unseen => 0.0,
    }
}

/// Days-overdue saturation point.
pub const MAX_OVERDUE_DAYS: f64 = 30.0;

/// Points per day overdue.
pub const OVERDUE_WEIGHT: f64 = 10.0;

// ============================================================================
// QUEUE ITEM
// ============================================================================

/// Static metadata about a concept, supplied by the content layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMeta {
    pub concept_id: String,
    pub concept_name: String,
    /// Owning project/course, if the caller organizes concepts that way.
    pub project_id: Option<String>,
    /// Cognitive kind of the concept (fact, procedure, principle, ...).
    pub cognitive_kind: Option<String>,
    /// Intrinsic difficulty from content authoring, 0-1.
    pub intrinsic_difficulty: f64,
}

/// Read-only projection of one due concept, joining mastery state with
/// concept metadata plus derived overdueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueItem {
    pub concept_id: String,
    pub concept_name: String,
    pub project_id: Option<String>,
    pub cognitive_kind: Option<String>,
    pub intrinsic_difficulty: f64,
    #[serde(rename = "masteryState")]
    pub state: MasteryState,
    /// Stability of the backing memory card, in days.
    pub stability: f64,
    pub due_date: Option<DateTime<Utc>>,
    /// Days past due at projection time; zero when not yet due.
    pub days_overdue: f64,
}

impl ReviewQueueItem {
    /// Project a mastery record into a queue item at `now`.
    pub fn project(
        meta: &ConceptMeta,
        record: &MasteryRecord,
        stability: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let days_overdue = record
            .due_date
            .map(|due| {
                let seconds = now.signed_duration_since(due).num_seconds();
                (seconds as f64 / 86_400.0).max(0.0)
            })
            .unwrap_or(0.0);

        Self {
            concept_id: meta.concept_id.clone(),
            concept_name: meta.concept_name.clone(),
            project_id: meta.project_id.clone(),
            cognitive_kind: meta.cognitive_kind.clone(),
            intrinsic_difficulty: meta.intrinsic_difficulty,
            state: record.state,
            stability,
            due_date: record.due_date,
            days_overdue,
        }
    }
}

// ============================================================================
// PRIORITY
// ============================================================================

/// Urgency score for one queue item. Higher runs first.
pub fn priority(item: &ReviewQueueItem) -> f64 {
    let overdue = item.days_overdue.max(0.0).min(MAX_OVERDUE_DAYS) * OVERDUE_WEIGHT;
    let state = state_priority_weight(item.state);
    let instability = (20.0 - 5.0 * (item.stability.max(0.0) + 1.0).log2()).max(0.0);
    overdue + state + instability
}

/// Sort items descending by priority in place.
pub fn sort_by_priority(items: &mut [ReviewQueueItem]) {
    items.sort_by(|a, b| priority(b).total_cmp(&priority(a)));
}

/// Items whose due date has arrived at `now`.
pub fn filter_due(items: &[ReviewQueueItem], now: DateTime<Utc>) -> Vec<ReviewQueueItem> {
    items
        .iter()
        .filter(|item| item.due_date.is_some_and(|due| due <= now))
        .cloned()
        .collect()
}

/// Items strictly past their due date.
pub fn filter_overdue(items: &[ReviewQueueItem]) -> Vec<ReviewQueueItem> {
    items
        .iter()
        .filter(|item| item.days_overdue > 0.0)
        .cloned()
        .collect()
}

// ============================================================================
// QUEUE STATS
// ============================================================================

/// Item counts per mastery state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCounts {
    pub unseen: usize,
    pub exposed: usize,
    pub fragile: usize,
    pub developing: usize,
    pub solid: usize,
    pub mastered: usize,
    pub misconceived: usize,
}

impl StateCounts {
    fn record(&mut self, state: MasteryState) {
        match state {
            MasteryState::Unseen => self.unseen += 1,
            MasteryState::Exposed => self.exposed += 1,
            MasteryState::Fragile => self.fragile += 1,
            MasteryState::Developing => self.developing += 1,
            MasteryState::Solid => self.solid += 1,
            MasteryState::Mastered => self.mastered += 1,
            MasteryState::Misconceived => self.misconceived += 1,
        }
    }
}

/// Aggregate view of a review queue for dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub total: usize,
    pub by_state: StateCounts,
    /// Counts keyed by project id; items without a project are omitted.
    pub by_project: HashMap<String, usize>,
    /// Mean days overdue across the queue. Zero for an empty queue.
    pub average_days_overdue: f64,
}

/// Compute queue statistics. An empty queue yields all-zero stats, never
/// NaN.
pub fn queue_stats(items: &[ReviewQueueItem]) -> QueueStats {
    let mut stats = QueueStats {
        total: items.len(),
        ..QueueStats::default()
    };

    let mut overdue_sum = 0.0;
    for item in items {
        stats.by_state.record(item.state);
        if let Some(project) = &item.project_id {
            *stats.by_project.entry(project.clone()).or_insert(0) += 1;
        }
        overdue_sum += item.days_overdue.max(0.0);
    }

    if !items.is_empty() {
        stats.average_days_overdue = overdue_sum / items.len() as f64;
    }
    stats
}

// ============================================================================
// TESTS
// ============================================================================
