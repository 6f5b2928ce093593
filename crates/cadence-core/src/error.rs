//! Engine error types.
//!
//! The engine favors total functions: numeric inputs are clamped, empty
//! aggregates return zeros, and missing preferences fall back to documented
//! defaults. The only fallible surface it owns is parsing caller-supplied
//! schedule preferences.

use thiserror::Error;

/// Errors produced at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock time string was not in `HH:MM` form, or out of range.
    #[error("invalid clock time '{0}': expected HH:MM (00:00-23:59)")]
    InvalidClockTime(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
