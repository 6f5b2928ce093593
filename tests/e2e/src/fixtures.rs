//! Test Data Factory
//!
//! Builders for realistic engine state:
//! - Memory cards at various points in their review history
//! - Mastery records with configurable success/day counts
//! - Review queue items for priority scenarios

use cadence_core::{
    CardPhase, ConceptMeta, MasteryRecord, MasteryState, MemoryCard, ReviewQueueItem,
};
use chrono::{DateTime, Duration, Utc};

/// Factory for creating test data.
pub struct TestDataFactory;

impl TestDataFactory {
    /// A card that graduated into the review cycle with the given
    /// stability, last reviewed `days_ago`.
    pub fn review_card(stability: f64, days_ago: i64, now: DateTime<Utc>) -> MemoryCard {
        MemoryCard {
            stability,
            difficulty: 0.3,
            elapsed_days: 0.0,
            scheduled_days: stability.round().max(1.0) as u32,
            reps: 4,
            lapses: 0,
            phase: CardPhase::Review,
            last_review: Some(now - Duration::days(days_ago)),
        }
    }

    /// A mastery record in `state` with `successes` successful sessions
    /// spread over as many distinct days, the most recent `days_ago` days
    /// before `now`.
    pub fn mastery_record(
        state: MasteryState,
        successes: u32,
        days_ago: i64,
        now: DateTime<Utc>,
    ) -> MasteryRecord {
        let mut record = MasteryRecord {
            state,
            successful_sessions: successes,
            consecutive_correct: successes,
            ..MasteryRecord::new()
        };
        for offset in 0..successes as i64 {
            let date = (now - Duration::days(days_ago + offset)).date_naive();
            record.session_dates.insert(date);
        }
        if successes > 0 {
            record.last_review_date = Some(now - Duration::days(days_ago));
        }
        record
    }

    /// Concept metadata with sensible defaults.
    pub fn concept_meta(id: &str, project: Option<&str>) -> ConceptMeta {
        ConceptMeta {
            concept_id: id.to_string(),
            concept_name: format!("Concept {id}"),
            project_id: project.map(str::to_string),
            cognitive_kind: Some("fact".to_string()),
            intrinsic_difficulty: 0.5,
        }
    }

    /// A queue item due `days_overdue` days ago.
    pub fn overdue_item(
        id: &str,
        state: MasteryState,
        stability: f64,
        days_overdue: i64,
        now: DateTime<Utc>,
    ) -> ReviewQueueItem {
        let record = MasteryRecord {
            state,
            due_date: Some(now - Duration::days(days_overdue)),
            ..MasteryRecord::new()
        };
        ReviewQueueItem::project(&Self::concept_meta(id, None), &record, stability, now)
    }
}
