//! Cognitive load model.
//!
//! Estimates how many new concept "chunks" a learner can absorb right now.
//! The base is Miller's working-memory span of about four chunks, scaled by
//! three modifiers:
//!
//! - **Circadian**: alertness varies by time of day, with a morning peak, a
//!   post-lunch dip, and a late-night trough.
//! - **Sleep**: a poorly-slept learner encodes less.
//! - **Fatigue**: sustained study time erodes capacity, 5% per quarter hour,
//!   capped at 30%.
//!
//! References:
//! - Miller, G. A. (1956). The magical number seven, plus or minus two.
//! - Schmidt, C., et al. (2007). A time to think: circadian rhythms in human
//!   cognition.
//!
//! Every function here is total: out-of-range hours wrap, negative durations
//! clamp to zero, and a zero-capacity snapshot reports as blocked rather
//! than dividing by zero.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Miller's-law working-memory span, in chunks.
pub const BASE_CAPACITY: f64 = 4.0;

/// Capacity lost per 15 minutes of sustained study.
pub const FATIGUE_STEP: f64 = 0.05;

/// Ceiling on fatigue loss.
pub const MAX_FATIGUE: f64 = 0.3;

/// Percentage-used threshold where caution begins.
pub const CAUTION_THRESHOLD: f64 = 75.0;

/// Percentage-used threshold where new learning should stop.
pub const BLOCKED_THRESHOLD: f64 = 90.0;

// ============================================================================
// MODIFIERS
// ============================================================================

/// Circadian alertness modifier for an hour of day (0-23; larger values
/// wrap).
///
/// | Band        | Hours | Modifier |
/// |-------------|-------|----------|
/// | Late night  | 22-6  | 0.70     |
/// | Waking      | 6-9   | 0.90     |
/// | Peak        | 9-12  | 1.10     |
/// | Lunch dip   | 12-14 | 0.85     |
/// | Afternoon   | 14-17 | 1.00     |
/// | Evening     | 17-20 | 0.95     |
/// | Wind-down   | 20-22 | 0.80     |
pub fn circadian_modifier(hour: u32) -> f64 {
    match hour % 24 {
        22..=23 | 0..=5 => 0.70,
        6..=8 => 0.90,
        9..=11 => 1.10,
        12..=13 => 0.85,
        14..=16 => 1.00,
        17..=19 => 0.95,
        _ => 0.80, // 20-21
    }
}

/// Fatigue loss after `minutes_active` of sustained study.
///
/// Steps up 5% per completed quarter hour, capped at 30%. Negative input
/// clamps to zero.
pub fn fatigue_modifier(minutes_active: f64) -> f64 {
    if minutes_active <= 0.0 {
        return 0.0;
    }
    (FATIGUE_STEP * (minutes_active / 15.0).floor()).min(MAX_FATIGUE)
}

/// Self-reported sleep quality for the previous night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
}

impl SleepQuality {
    /// Capacity multiplier for this sleep quality.
    pub fn modifier(self) -> f64 {
        match self {
            SleepQuality::Poor => 0.70,
            SleepQuality::Fair => 0.85,
            SleepQuality::Good => 1.00,
        }
    }
}

// ============================================================================
// WARNING LEVEL
// ============================================================================

/// How close the learner is to cognitive overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    /// Under 75% of effective capacity in use.
    #[default]
    None,
    /// 75-89% in use; wind the session down.
    Caution,
    /// 90%+ in use; introduce nothing new.
    Blocked,
}

impl WarningLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningLevel::None => "none",
            WarningLevel::Caution => "caution",
            WarningLevel::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Warning level for a percentage of capacity in use.
pub fn warning_level(percentage_used: f64) -> WarningLevel {
    if percentage_used >= BLOCKED_THRESHOLD {
        WarningLevel::Blocked
    } else if percentage_used >= CAUTION_THRESHOLD {
        WarningLevel::Caution
    } else {
        WarningLevel::None
    }
}

// ============================================================================
// CAPACITY SNAPSHOT
// ============================================================================

/// Stateless snapshot of effective working-memory capacity.
///
/// Bundles every intermediate modifier so UIs can explain *why* capacity is
/// what it is. Recomputed per request; carries no identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveCapacity {
    pub base_capacity: f64,
    pub circadian_modifier: f64,
    pub sleep_modifier: f64,
    pub fatigue_modifier: f64,
    /// Chunks actually available right now.
    pub effective_capacity: f64,
    /// Share of effective capacity already in use, 0-100.
    pub percentage_used: f64,
    pub warning_level: WarningLevel,
}

/// Assess effective capacity at a moment in time.
///
/// `chunks_in_use` is the load already placed on the learner this session
/// (concepts currently being juggled). Missing sleep quality defaults to a
/// neutral 1.0 modifier.
pub fn assess(
    hour: u32,
    minutes_active: f64,
    sleep_quality: Option<SleepQuality>,
    chunks_in_use: f64,
) -> CognitiveCapacity {
    let circadian = circadian_modifier(hour);
    let sleep = sleep_quality.map_or(1.0, SleepQuality::modifier);
    let fatigue = fatigue_modifier(minutes_active);

    let effective = (BASE_CAPACITY * circadian * sleep * (1.0 - fatigue)).max(0.0);

    let in_use = chunks_in_use.max(0.0);
    let percentage_used = if effective > 0.0 {
        (in_use / effective * 100.0).clamp(0.0, 100.0)
    } else if in_use > 0.0 {
        100.0
    } else {
        0.0
    };

    CognitiveCapacity {
        base_capacity: BASE_CAPACITY,
        circadian_modifier: circadian,
        sleep_modifier: sleep,
        fatigue_modifier: fatigue,
        effective_capacity: effective,
        percentage_used,
        warning_level: warning_level(percentage_used),
    }
}

// ============================================================================
// TESTS
// ============================================================================
