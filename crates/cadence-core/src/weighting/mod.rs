//! Question-type weighting.
//!
//! Chooses how a concept is presented: multiple choice, true/false, free
//! text, or an interactive exercise. Base weights depend on the lesson
//! phase, then stackable adjustments nudge the mix toward what the learner
//! needs right now (struggling learners get more recognition-style
//! questions, strong ones get more production and transfer).
//!
//! Selection is cumulative-distribution sampling over the normalized
//! weights. The pure [`select`] function takes an explicit `[0,1)` sample so
//! tests are deterministic; [`QuestionPicker`] wraps it with a seeded
//! ChaCha8 generator for production use. No hidden global RNG anywhere.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::mastery::MasteryState;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Strong adjustment applied by a single trigger.
const ADJUST_STRONG: f64 = 0.2;

/// Mild adjustment applied to each of two types by the low-capacity trigger.
const ADJUST_MILD: f64 = 0.1;

/// Accuracy below this pulls toward recognition-style questions.
const LOW_ACCURACY: f64 = 0.5;

/// Available-capacity ratio below this pulls toward low-effort questions.
const LOW_CAPACITY: f64 = 0.5;

// ============================================================================
// TYPES
// ============================================================================

/// Presentation modality for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FreeText,
    Interactive,
}

impl QuestionType {
    /// Fixed sampling order.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::FreeText,
        QuestionType::Interactive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::FreeText => "free_text",
            QuestionType::Interactive => "interactive",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where in the lesson flow the question appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonPhase {
    /// Probe before teaching; always multiple choice.
    Pretest,
    /// First acquisition of a concept.
    Learning,
    /// Spaced review of known material.
    Review,
}

/// Bloom's-taxonomy level of the concept being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// Analyze and above call for open-ended production.
    pub fn is_higher_order(self) -> bool {
        matches!(self, BloomLevel::Analyze | BloomLevel::Evaluate | BloomLevel::Create)
    }
}

// ============================================================================
// WEIGHTS
// ============================================================================

/// Sampling weights per question type. A well-formed set sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWeights {
    pub multiple_choice: f64,
    pub true_false: f64,
    pub free_text: f64,
    pub interactive: f64,
}

impl QuestionWeights {
    pub fn sum(&self) -> f64 {
        self.multiple_choice + self.true_false + self.free_text + self.interactive
    }

    pub fn get(&self, question_type: QuestionType) -> f64 {
        match question_type {
            QuestionType::MultipleChoice => self.multiple_choice,
            QuestionType::TrueFalse => self.true_false,
            QuestionType::FreeText => self.free_text,
            QuestionType::Interactive => self.interactive,
        }
    }

    /// Scale weights to sum to 1. An all-zero (or degenerate) set falls
    /// back to the uniform distribution rather than dividing by zero.
    pub fn normalize(&self) -> QuestionWeights {
        let sum = self.sum();
        if sum <= f64::EPSILON || !sum.is_finite() {
            return QuestionWeights {
                multiple_choice: 0.25,
                true_false: 0.25,
                free_text: 0.25,
                interactive: 0.25,
            };
        }
        QuestionWeights {
            multiple_choice: self.multiple_choice / sum,
            true_false: self.true_false / sum,
            free_text: self.free_text / sum,
            interactive: self.interactive / sum,
        }
    }
}

/// Base weights for a lesson phase, before adaptive adjustment.
pub fn base_weights(phase: LessonPhase) -> QuestionWeights {
    match phase {
        LessonPhase::Pretest => QuestionWeights {
            multiple_choice: 1.0,
            true_false: 0.0,
            free_text: 0.0,
            interactive: 0.0,
        },
        LessonPhase::Learning => QuestionWeights {
            multiple_choice: 0.3,
            true_false: 0.1,
            free_text: 0.4,
            interactive: 0.2,
        },
        LessonPhase::Review => QuestionWeights {
            multiple_choice: 0.4,
            true_false: 0.1,
            free_text: 0.4,
            interactive: 0.1,
        },
    }
}

// ============================================================================
// ADAPTIVE ADJUSTMENT
// ============================================================================

/// Signals that shift the question mix for the current learner.
///
/// All fields optional; an empty context leaves the base weights untouched
/// (aside from normalization, which is a no-op on the base tables).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightingContext {
    /// Recent answer accuracy, 0-1.
    pub recent_accuracy: Option<f64>,
    /// Mastery state of the concept being asked.
    pub mastery: Option<MasteryState>,
    /// Share of cognitive capacity still available, 0-1.
    pub available_capacity_ratio: Option<f64>,
    /// Bloom level of the concept.
    pub bloom_level: Option<BloomLevel>,
}

/// Phase base weights with every applicable adjustment applied, then
/// renormalized to sum to 1.
///
/// Adjustments stack independently:
/// - accuracy below 50% -> +0.2 multiple choice
/// - concept already solid or mastered -> +0.2 interactive
/// - under half capacity available -> +0.1 multiple choice, +0.1 true/false
/// - higher-order Bloom level -> +0.2 free text
pub fn adjusted_weights(phase: LessonPhase, context: &WeightingContext) -> QuestionWeights {
    let mut weights = base_weights(phase);

    if context.recent_accuracy.is_some_and(|a| a < LOW_ACCURACY) {
        weights.multiple_choice += ADJUST_STRONG;
    }

    if matches!(
        context.mastery,
        Some(MasteryState::Solid) | Some(MasteryState::Mastered)
    ) {
        weights.interactive += ADJUST_STRONG;
    }

    if context
        .available_capacity_ratio
        .is_some_and(|r| r < LOW_CAPACITY)
    {
        weights.multiple_choice += ADJUST_MILD;
        weights.true_false += ADJUST_MILD;
    }

    if context.bloom_level.is_some_and(BloomLevel::is_higher_order) {
        weights.free_text += ADJUST_STRONG;
    }

    weights.normalize()
}

// ============================================================================
// SELECTION
// ============================================================================

/// Pick a question type from `weights` using a `[0,1)` sample.
///
/// Cumulative-distribution walk in the fixed order multiple choice ->
/// true/false -> free text -> interactive. The sample is clamped into
/// `[0,1)` and the weights normalized, so the function is total.
pub fn select(weights: &QuestionWeights, sample: f64) -> QuestionType {
    let weights = weights.normalize();
    let sample = if sample.is_finite() {
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };

    let mut cumulative = 0.0;
    for question_type in QuestionType::ALL {
        cumulative += weights.get(question_type);
        if sample < cumulative {
            return question_type;
        }
    }
    // Floating-point shortfall at the very top of the distribution.
    QuestionType::Interactive
}

/// Owns a seeded generator for repeated picks.
///
/// Deterministic under a fixed seed, which is how session replays and tests
/// use it.
#[derive(Debug, Clone)]
pub struct QuestionPicker {
    rng: ChaCha8Rng,
}

impl QuestionPicker {
    /// Picker with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Sample one question type.
    pub fn pick(&mut self, weights: &QuestionWeights) -> QuestionType {
        let sample = self.rng.gen_range(0.0..1.0);
        select(weights, sample)
    }
}

// ============================================================================
// TESTS
// ============================================================================
