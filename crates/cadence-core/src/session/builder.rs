//! Session composition.
//!
//! Builds the ordered item list for one study session by interleaving due
//! reviews with new-concept introductions. Interleaved practice beats
//! blocked practice for retention, so instead of "all reviews, then all new
//! material" the builder repeats a small cycle: a couple of reviews, a
//! pretest probe for the next new concept, then the concept itself.
//!
//! Reference: Rohrer, D., & Taylor, K. (2007). The shuffling of mathematics
//! problems improves learning.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Reviews placed before each new-concept pair.
const REVIEWS_PER_CYCLE: usize = 2;

/// Minutes budgeted per item kind.
const REVIEW_MINUTES: u32 = 2;
const PRETEST_MINUTES: u32 = 1;
const NEW_CONCEPT_MINUTES: u32 = 7;

// ============================================================================
// SESSION ITEMS
// ============================================================================

/// What one session slot asks the learner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionItemKind {
    /// Spaced review of a known concept.
    Review,
    /// First teaching of a new concept.
    New,
    /// Quick probe before a new concept is taught.
    Pretest,
}

impl SessionItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionItemKind::Review => "review",
            SessionItemKind::New => "new",
            SessionItemKind::Pretest => "pretest",
        }
    }

    /// Minutes budgeted for this kind of item.
    pub fn estimated_minutes(self) -> u32 {
        match self {
            SessionItemKind::Review => REVIEW_MINUTES,
            SessionItemKind::Pretest => PRETEST_MINUTES,
            SessionItemKind::New => NEW_CONCEPT_MINUTES,
        }
    }
}

impl std::fmt::Display for SessionItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One slot in the ordered session sequence. Append-only: produced once by
/// the builder, then iterated by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionItem {
    #[serde(rename = "type")]
    pub kind: SessionItemKind,
    pub concept_id: String,
    pub position: usize,
}

/// Overall shape of a built session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Contains at least one new concept.
    Standard,
    /// Reviews only; capacity was zero or no new concepts were available.
    ReviewOnly,
}

/// The built session: ordered items plus summary facts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub items: Vec<SessionItem>,
    pub kind: SessionKind,
    pub estimated_minutes: u32,
    pub new_concepts_placed: usize,
}

// ============================================================================
// INTERLEAVING
// ============================================================================

/// Interleave reviews and new concepts under a capacity budget.
///
/// Repeats `{up to 2 reviews, pretest for the next new concept, the new
/// concept}` until `capacity` new concepts are placed or none remain, then
/// appends leftover reviews unbroken. Zero capacity yields a review-only
/// plan.
pub fn interleave(review_ids: &[String], new_ids: &[String], capacity: usize) -> SessionPlan {
    let mut items = Vec::with_capacity(review_ids.len() + 2 * new_ids.len().min(capacity));
    let mut reviews = review_ids.iter();

    let push = |items: &mut Vec<SessionItem>, kind, concept_id: &String| {
        let position = items.len();
        items.push(SessionItem {
            kind,
            concept_id: concept_id.clone(),
            position,
        });
    };

    let mut placed = 0;
    for new_id in new_ids.iter().take(capacity) {
        for _ in 0..REVIEWS_PER_CYCLE {
            if let Some(review_id) = reviews.next() {
                push(&mut items, SessionItemKind::Review, review_id);
            }
        }
        push(&mut items, SessionItemKind::Pretest, new_id);
        push(&mut items, SessionItemKind::New, new_id);
        placed += 1;
    }

    for review_id in reviews {
        push(&mut items, SessionItemKind::Review, review_id);
    }

    let estimated_minutes = estimate_duration(&items);
    SessionPlan {
        kind: if placed == 0 {
            SessionKind::ReviewOnly
        } else {
            SessionKind::Standard
        },
        estimated_minutes,
        new_concepts_placed: placed,
        items,
    }
}

/// Total budgeted minutes for a set of session items.
pub fn estimate_duration(items: &[SessionItem]) -> u32 {
    items.iter().map(|item| item.kind.estimated_minutes()).sum()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn shape(plan: &SessionPlan) -> Vec<(SessionItemKind, String)> {
        plan.items
            .iter()
            .map(|item| (item.kind, item.concept_id.clone()))
            .collect()
    }

    #[test]
    fn test_interleaving_pattern() {
        let plan = interleave(&ids("r", 4), &ids("n", 1), 5);
        assert_eq!(
            shape(&plan),
            vec![
                (SessionItemKind::Review, "r1".to_string()),
                (SessionItemKind::Review, "r2".to_string()),
                (SessionItemKind::Pretest, "n1".to_string()),
                (SessionItemKind::New, "n1".to_string()),
                (SessionItemKind::Review, "r3".to_string()),
                (SessionItemKind::Review, "r4".to_string()),
            ]
        );
        assert_eq!(plan.kind, SessionKind::Standard);
        assert_eq!(plan.new_concepts_placed, 1);
    }

    #[test]
    fn test_positions_are_sequential() {
        let plan = interleave(&ids("r", 5), &ids("n", 2), 2);
        for (index, item) in plan.items.iter().enumerate() {
            assert_eq!(item.position, index);
        }
    }

    #[test]
    fn test_capacity_caps_new_concepts() {
        let plan = interleave(&ids("r", 2), &ids("n", 6), 2);
        assert_eq!(plan.new_concepts_placed, 2);
        let new_items: Vec<_> = plan
            .items
            .iter()
            .filter(|item| item.kind == SessionItemKind::New)
            .collect();
        assert_eq!(new_items.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_review_only() {
        let plan = interleave(&ids("r", 3), &ids("n", 2), 0);
        assert_eq!(plan.kind, SessionKind::ReviewOnly);
        assert_eq!(plan.new_concepts_placed, 0);
        assert!(plan.items.iter().all(|item| item.kind == SessionItemKind::Review));
        assert_eq!(plan.items.len(), 3);
    }

    #[test]
    fn test_no_new_concepts_is_review_only() {
        let plan = interleave(&ids("r", 3), &[], 4);
        assert_eq!(plan.kind, SessionKind::ReviewOnly);
    }

    #[test]
    fn test_runs_out_of_reviews_mid_cycle() {
        let plan = interleave(&ids("r", 1), &ids("n", 2), 2);
        assert_eq!(
            shape(&plan),
            vec![
                (SessionItemKind::Review, "r1".to_string()),
                (SessionItemKind::Pretest, "n1".to_string()),
                (SessionItemKind::New, "n1".to_string()),
                (SessionItemKind::Pretest, "n2".to_string()),
                (SessionItemKind::New, "n2".to_string()),
            ]
        );
    }

    #[test]
    fn test_duration_estimate() {
        // 4 reviews (8) + 1 pretest (1) + 1 new (7) = 16 minutes.
        let plan = interleave(&ids("r", 4), &ids("n", 1), 5);
        assert_eq!(plan.estimated_minutes, 16);
        assert_eq!(estimate_duration(&[]), 0);
    }

    #[test]
    fn test_serialized_literals() {
        let plan = interleave(&ids("r", 1), &ids("n", 1), 1);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"type\":\"pretest\""));
        assert!(json.contains("\"type\":\"new\""));
        assert_eq!(
            serde_json::to_string(&SessionKind::ReviewOnly).unwrap(),
            "\"review_only\""
        );
    }
}
