//! Slice Rotation Engine Library
//!
//! Provides the puzzle state and layer-turning engine for an interactive
//! 3x3x3 cube puzzle, independent of any renderer.

pub mod config;
pub mod cubes;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod moves;
pub mod registry;
pub mod tween;

pub use cubes::{Address, Axis, CubeId, Layer, Puzzle};
pub use engine::{CubeScene, Phase, RotationEngine};
pub use error::MoveError;
pub use moves::{Move, MoveRequest, Turn};
