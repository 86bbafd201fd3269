//! Error types for move dispatch, layer addressing and configuration.

use thiserror::Error;

/// Reasons a move request is turned into a no-op.
///
/// None of these leave the puzzle partially rotated: a rejected request
/// never touches cube state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MoveError {
    /// The axis vector did not have exactly one non-zero component.
    #[error("move vector ({0}, {1}, {2}) does not name a single axis")]
    InvalidVector(i32, i32, i32),
    /// The turn amount was not a non-zero whole number of quarter turns,
    /// or exceeded a half turn either way.
    #[error("turn amount {0} rad is not a whole number of quarter turns up to a half turn")]
    InvalidAmount(f32),
    /// The registry has no cubes in the requested layer.
    #[error("layer {layer} on the {axis} axis is empty")]
    EmptyLayer { axis: char, layer: i8 },
    /// A rotation is already in flight.
    #[error("a rotation is already in progress")]
    Busy,
}

/// A layer coordinate outside of {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("layer coordinate {0} is outside -1..=1")]
pub struct LayerError(pub i32);

/// A command-line move token that is not one of the six directions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move '{0}' (expected up, down, left, right, front, back or U/D/L/R/F/B, optionally followed by ')")]
pub struct ParseMoveError(pub String);

/// Invalid run-time settings.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("turn duration must be a finite, non-negative number of seconds (got {0})")]
    TurnDuration(f32),
    #[error("cube spacing must be finite and positive (got {0})")]
    Spacing(f32),
}

/// A broken cube registry invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A cube is in zero or several buckets of one axis index.
    #[error("cube {id} appears in {count} buckets on the {axis} axis")]
    BucketCount { id: u8, axis: char, count: usize },
    /// A cube's bucket disagrees with its logical address.
    #[error("cube {id} is registered in layer {registered} on the {axis} axis but addressed at {addressed}")]
    AddressMismatch {
        id: u8,
        axis: char,
        registered: i8,
        addressed: i8,
    },
    /// An axis index holds a different population than the puzzle.
    #[error("the {axis} axis index holds {count} cubes, expected {expected}")]
    Population {
        axis: char,
        count: usize,
        expected: usize,
    },
}
