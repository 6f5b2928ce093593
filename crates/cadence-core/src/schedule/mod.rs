//! Sleep-aware session scheduling.
//!
//! Decides whether this is a good moment to study at all, based on the
//! learner's stated bedtime and wake time. Learning right before sleep is
//! fine for review (sleep consolidates what was just rehearsed) but a poor
//! moment to introduce new material; past bedtime, the right answer is to
//! go to sleep.
//!
//! All window math works in minutes-since-midnight and must handle
//! midnight-crossing bedtimes ("01:00"). Two fixed boundaries shape the
//! heuristics: 6:00 separates "still up too late" from "up early", and
//! 12:00 splits evening bedtimes from post-midnight ones. These boundaries
//! are deliberate behavior, kept exactly as tuned.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

const MINUTES_PER_DAY: u32 = 1_440;

/// Before this time, a late clock still counts as "past bedtime" overrun.
const EARLY_MORNING_CUTOFF: u32 = 6 * 60;

/// Bedtimes at or after noon are evening bedtimes; earlier ones cross
/// midnight.
const NOON: u32 = 12 * 60;

/// Length of the wind-down window before bed, in minutes.
pub const SLEEP_WINDOW_MINUTES: u32 = 120;

/// Length of the just-woke-up window, in minutes.
pub const MORNING_WINDOW_MINUTES: u32 = 120;

/// Full-session defaults.
const FULL_SESSION_MINUTES: u32 = 25;
const FULL_NEW_CONCEPTS: u32 = 4;

/// Reduced-session defaults for the morning and pre-sleep windows.
const REDUCED_SESSION_MINUTES: u32 = 15;
const REDUCED_NEW_CONCEPTS: u32 = 2;

// ============================================================================
// PREFERENCES
// ============================================================================

/// Parse an `"HH:MM"` clock string into minutes since midnight.
pub fn parse_clock(text: &str) -> Result<u32> {
    let invalid = || EngineError::InvalidClockTime(text.to_string());

    let (hours, minutes) = text.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// A learner's sleep schedule, parsed into minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreferences {
    pub bedtime_minutes: u32,
    pub wake_minutes: u32,
    /// IANA timezone name, carried for the caller's clock conversions.
    pub timezone: Option<String>,
}

impl SchedulePreferences {
    /// Parse from the stored `"HH:MM"` preference strings.
    pub fn parse(bedtime: &str, wake_time: &str) -> Result<Self> {
        Ok(Self {
            bedtime_minutes: parse_clock(bedtime)?,
            wake_minutes: parse_clock(wake_time)?,
            timezone: None,
        })
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

// ============================================================================
// WINDOW PREDICATES
// ============================================================================

/// Whether `now` is past the learner's bedtime.
///
/// Evening bedtimes (noon or later) are "past" from the bedtime until 6:00
/// the next morning. Post-midnight bedtimes ("01:00") are "past" only in the
/// stretch between the bedtime and 6:00.
pub fn is_past_bedtime(bedtime_minutes: u32, now_minutes: u32) -> bool {
    let bedtime = bedtime_minutes % MINUTES_PER_DAY;
    let now = now_minutes % MINUTES_PER_DAY;

    if bedtime >= NOON {
        now >= bedtime || now < EARLY_MORNING_CUTOFF
    } else {
        bedtime <= now && now < EARLY_MORNING_CUTOFF
    }
}

/// Minutes until the next occurrence of bedtime, cyclic over the day.
/// Zero exactly at bedtime.
pub fn minutes_until_bedtime(bedtime_minutes: u32, now_minutes: u32) -> u32 {
    let bedtime = bedtime_minutes % MINUTES_PER_DAY;
    let now = now_minutes % MINUTES_PER_DAY;
    (bedtime + MINUTES_PER_DAY - now) % MINUTES_PER_DAY
}

/// Whether `now` falls in the two-hour wind-down before bedtime.
pub fn is_within_sleep_window(bedtime_minutes: u32, now_minutes: u32) -> bool {
    let until = minutes_until_bedtime(bedtime_minutes, now_minutes);
    until > 0 && until <= SLEEP_WINDOW_MINUTES
}

/// Minutes since the most recent occurrence of wake time, cyclic.
pub fn minutes_since_wake(wake_minutes: u32, now_minutes: u32) -> u32 {
    let wake = wake_minutes % MINUTES_PER_DAY;
    let now = now_minutes % MINUTES_PER_DAY;
    (now + MINUTES_PER_DAY - wake) % MINUTES_PER_DAY
}

/// Whether `now` falls in the two-hours-after-waking window.
///
/// The extra twelve-hour guard rejects false positives far from the actual
/// wake-up (e.g. a 7:00 wake time matching 21:00).
pub fn is_within_morning_window(wake_minutes: u32, now_minutes: u32) -> bool {
    let since = minutes_since_wake(wake_minutes, now_minutes);
    since <= MORNING_WINDOW_MINUTES && since < 720
}

// ============================================================================
// RECOMMENDATION
// ============================================================================

/// Kind of session the scheduler recommends right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Normal session with new material.
    Standard,
    /// Review only; no new concepts.
    ReviewOnly,
    /// Don't study now.
    Skip,
}

impl RecommendationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationKind::Standard => "standard",
            RecommendationKind::ReviewOnly => "review_only",
            RecommendationKind::Skip => "skip",
        }
    }
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computed fresh for each "can I start a session now?" check; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub reason: String,
    #[serde(rename = "suggestedDuration")]
    pub suggested_duration_minutes: u32,
    pub new_concepts_allowed: u32,
}

impl SessionRecommendation {
    fn standard_full(reason: &str) -> Self {
        Self {
            kind: RecommendationKind::Standard,
            reason: reason.to_string(),
            suggested_duration_minutes: FULL_SESSION_MINUTES,
            new_concepts_allowed: FULL_NEW_CONCEPTS,
        }
    }
}

/// Recommend a session shape for the current clock time.
///
/// Policy ladder, first match wins: past bedtime -> skip; wind-down window
/// -> review only; just woke up -> reduced standard; otherwise a full
/// standard session. A learner with no stored preferences always gets the
/// full standard session.
pub fn recommend(
    preferences: Option<&SchedulePreferences>,
    now: NaiveTime,
) -> SessionRecommendation {
    let now_minutes = now.hour() * 60 + now.minute();

    let Some(prefs) = preferences else {
        return SessionRecommendation::standard_full("no schedule preferences set");
    };

    let recommendation = if is_past_bedtime(prefs.bedtime_minutes, now_minutes) {
        SessionRecommendation {
            kind: RecommendationKind::Skip,
            reason: "past bedtime; sleep consolidates what you already studied".to_string(),
            suggested_duration_minutes: 0,
            new_concepts_allowed: 0,
        }
    } else if is_within_sleep_window(prefs.bedtime_minutes, now_minutes) {
        SessionRecommendation {
            kind: RecommendationKind::ReviewOnly,
            reason: "close to bedtime; review sticks, new material won't".to_string(),
            suggested_duration_minutes: REDUCED_SESSION_MINUTES,
            new_concepts_allowed: 0,
        }
    } else if is_within_morning_window(prefs.wake_minutes, now_minutes) {
        SessionRecommendation {
            kind: RecommendationKind::Standard,
            reason: "recently awake; easing in with a shorter session".to_string(),
            suggested_duration_minutes: REDUCED_SESSION_MINUTES,
            new_concepts_allowed: REDUCED_NEW_CONCEPTS,
        }
    } else {
        SessionRecommendation::standard_full("inside normal study hours")
    };

    tracing::debug!(
        kind = recommendation.kind.as_str(),
        minutes = now_minutes,
        "session recommendation"
    );
    recommendation
}

// ============================================================================
// TESTS
// ============================================================================
