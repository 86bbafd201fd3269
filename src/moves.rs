//! Move vocabulary and layer selection.
//!
//! Six fixed moves, each bound to a unit axis vector naming an outer layer.
//! A [`MoveRequest`] pairs that vector with a signed turn amount and a
//! duration; [`select_layer`] resolves it against the registry.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use glam::IVec3;

use crate::cubes::{Axis, CubeId, Layer};
use crate::error::{MoveError, ParseMoveError};
use crate::geometry::quarter_turns;
use crate::registry::CubeRegistry;

/// Angle of a single quarter turn, in radians.
pub const QUARTER_TURN: f32 = FRAC_PI_2;

/// Default time a turn takes to animate.
pub const DEFAULT_TURN_DURATION: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
}

impl Move {
    pub const ALL: [Move; 6] = [
        Move::Up,
        Move::Down,
        Move::Left,
        Move::Right,
        Move::Front,
        Move::Back,
    ];

    /// The axis vector naming the layer this move turns.
    pub const fn vector(self) -> IVec3 {
        match self {
            Move::Up => IVec3::new(0, 1, 0),
            Move::Down => IVec3::new(0, -1, 0),
            Move::Left => IVec3::new(-1, 0, 0),
            Move::Right => IVec3::new(1, 0, 0),
            Move::Front => IVec3::new(0, 0, 1),
            Move::Back => IVec3::new(0, 0, -1),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
            Move::Front => "front",
            Move::Back => "back",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A move plus whether the inversion modifier was held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub movement: Move,
    pub inverted: bool,
}

impl Turn {
    pub const fn new(movement: Move, inverted: bool) -> Self {
        Self { movement, inverted }
    }

    /// Signed turn angle: a positive quarter turn unless inverted.
    pub fn amount(self) -> f32 {
        if self.inverted {
            -QUARTER_TURN
        } else {
            QUARTER_TURN
        }
    }

    pub fn request(self, duration: Duration) -> MoveRequest {
        MoveRequest::new(self.movement.vector(), self.amount(), duration)
    }

    pub fn inverse(self) -> Self {
        Self::new(self.movement, !self.inverted)
    }
}

impl FromStr for Turn {
    type Err = ParseMoveError;

    /// Parses `up`, `down`, `left`, `right`, `front`, `back` or their
    /// initials, case-insensitively, with an optional trailing `'` to invert.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        let (name, inverted) = match trimmed.strip_suffix('\'') {
            Some(name) => (name, true),
            None => (trimmed, false),
        };
        let movement = match name.to_ascii_lowercase().as_str() {
            "u" | "up" => Move::Up,
            "d" | "down" => Move::Down,
            "l" | "left" => Move::Left,
            "r" | "right" => Move::Right,
            "f" | "front" => Move::Front,
            "b" | "back" => Move::Back,
            _ => return Err(ParseMoveError(token.to_string())),
        };
        Ok(Turn::new(movement, inverted))
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.movement, if self.inverted { "'" } else { "" })
    }
}

/// A request to turn one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveRequest {
    /// Exactly one component is expected to be ±1.
    pub vector: IVec3,
    /// Signed turn angle in radians about the positive world axis.
    pub amount: f32,
    pub duration: Duration,
}

impl MoveRequest {
    pub const fn new(vector: IVec3, amount: f32, duration: Duration) -> Self {
        Self {
            vector,
            amount,
            duration,
        }
    }
}

/// The resolved target of a move request.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSelection {
    pub axis: Axis,
    pub layer: Layer,
    pub members: Vec<CubeId>,
    /// Signed number of quarter turns to apply.
    pub quarter_turns: i32,
}

/// Finds the single axis a move vector points along, and the layer it names.
pub fn resolve_axis(vector: IVec3) -> Result<(Axis, Layer), MoveError> {
    let invalid = MoveError::InvalidVector(vector.x, vector.y, vector.z);

    let mut driving = Axis::ALL
        .into_iter()
        .filter(|axis| vector[axis.index()] != 0);
    let axis = driving.next().ok_or(invalid)?;
    if driving.next().is_some() {
        return Err(invalid);
    }

    let layer = Layer::try_from(vector[axis.index()]).map_err(|_| invalid)?;
    Ok((axis, layer))
}

/// Resolves a move request to the cubes currently in the addressed layer.
pub fn select_layer(
    registry: &CubeRegistry,
    request: &MoveRequest,
) -> Result<LayerSelection, MoveError> {
    let (axis, layer) = resolve_axis(request.vector)?;
    let quarter_turns =
        quarter_turns(request.amount).ok_or(MoveError::InvalidAmount(request.amount))?;

    let members = registry.lookup_layer(axis, layer);
    if members.is_empty() {
        return Err(MoveError::EmptyLayer {
            axis: axis.label(),
            layer: layer.value(),
        });
    }

    Ok(LayerSelection {
        axis,
        layer,
        members: members.to_vec(),
        quarter_turns,
    })
}
