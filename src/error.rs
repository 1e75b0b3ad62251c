//! Game-specific error types.
//!
//! Systems should propagate errors through these types rather than panicking
//! where practical, enabling graceful degradation instead of hard crashes.
//!
//! ## Usage
//!
//! ```rust
//! use overrun::error::{GameError, GameResult};
//!
//! fn check_floor(floor_ms: u32, base_ms: u32) -> GameResult<()> {
//!     if floor_ms == 0 || floor_ms > base_ms {
//!         return Err(GameError::ConfigOutOfRange {
//!             name: "spawn_interval_floor_ms",
//!             value: floor_ms as f32,
//!             safe_range: "[1, spawn_interval_base_ms]",
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// An entity was referenced but could not be found in the world.
    /// Often caused by a despawn race between the two collision handlers
    /// (an enemy can be shot and ram the player in the same frame).
    EntityNotFound {
        /// Human-readable description of where the lookup occurred.
        context: &'static str,
    },

    /// A configuration value is outside its safe operating range.
    /// Returned by the validation helpers below; a config file containing
    /// any such value is rejected as a whole.
    ConfigOutOfRange {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EntityNotFound { context } => {
                write!(f, "entity not found during '{}'", context)
            }
            GameError::ConfigOutOfRange {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config field '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if the spawn interval schedule is degenerate.
///
/// The floor must be at least 1 ms (a zero floor lets the interval reach zero
/// and the spawn loop would fire every frame) and must not exceed the base,
/// otherwise the schedule is non-monotone from phase 1.
pub fn validate_spawn_intervals(base_ms: u32, floor_ms: u32) -> GameResult<()> {
    if floor_ms == 0 || floor_ms > base_ms {
        return Err(GameError::ConfigOutOfRange {
            name: "spawn_interval_floor_ms",
            value: floor_ms as f32,
            safe_range: "[1, spawn_interval_base_ms]",
        });
    }
    Ok(())
}

/// Returns an error if `phase_duration_secs` is not strictly positive.
///
/// A non-positive duration makes every tick cross a phase boundary, which
/// drives the interval to its floor immediately.
pub fn validate_phase_duration(secs: f32) -> GameResult<()> {
    if secs <= 0.0 {
        return Err(GameError::ConfigOutOfRange {
            name: "phase_duration_secs",
            value: secs,
            safe_range: "(0.0, ∞)",
        });
    }
    Ok(())
}

/// Returns an error if either arena dimension is not strictly positive.
pub fn validate_arena(width: f32, height: f32) -> GameResult<()> {
    if width <= 0.0 {
        return Err(GameError::ConfigOutOfRange {
            name: "arena_width",
            value: width,
            safe_range: "(0.0, ∞)",
        });
    }
    if height <= 0.0 {
        return Err(GameError::ConfigOutOfRange {
            name: "arena_height",
            value: height,
            safe_range: "(0.0, ∞)",
        });
    }
    Ok(())
}
