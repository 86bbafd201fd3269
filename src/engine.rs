//! Slice rotation engine.
//!
//! Drives one layer turn at a time through `Idle -> Animating -> Idle`.
//! Dispatching a move detaches the selected layer into a [`RotationGroup`]
//! whose members are re-expressed as offsets from the layer's pivot. Each
//! tick advances the group's angle along an eased curve; when the tween
//! completes, every member is reattached to world space at its rotated
//! position and its registry membership on the two orthogonal axes is
//! updated. Requests that arrive mid-turn are dropped, not queued.

use std::time::Duration;

use glam::{Quat, Vec3};
use log::{debug, trace, warn};

use crate::cubes::{Address, Axis, CubeId, Layer, Placement, Puzzle};
use crate::error::MoveError;
use crate::geometry::{pivot, snap_orientation, turn_address};
use crate::moves::{select_layer, LayerSelection, MoveRequest, QUARTER_TURN};
use crate::tween::{Step, Tween};

/// Receives world transforms for the cubes, once per tick.
///
/// This is the seam to whatever draws the puzzle. Implementors map a
/// [`CubeId`] to their own scene node.
pub trait CubeScene {
    fn place(&mut self, id: CubeId, position: Vec3, orientation: Quat);
}

/// Externally visible engine phase.
///
/// Grouping and committing happen inside a single call, so they are never
/// observable between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
}

/// A layer detached from world space for the duration of one turn.
#[derive(Clone, Debug)]
pub struct RotationGroup {
    pub axis: Axis,
    pub layer: Layer,
    pub members: Vec<CubeId>,
    pub pivot: Vec3,
    pub quarter_turns: i32,
    /// Current angle about `axis`, in radians.
    angle: f32,
    /// Angle the turn ends at.
    target: f32,
    tween: Tween,
}

impl RotationGroup {
    /// The group's current rotation about its pivot.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis.unit(), self.angle)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Linear progress of the turn in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }
}

/// Summary of a turn that has just been committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletedTurn {
    pub axis: Axis,
    pub layer: Layer,
    pub quarter_turns: i32,
}

#[derive(Clone, Debug)]
enum EngineState {
    Idle,
    Turning(RotationGroup),
}

/// Owns the puzzle and the single in-flight turn, if any.
#[derive(Clone, Debug)]
pub struct RotationEngine {
    puzzle: Puzzle,
    state: EngineState,
    completed_turns: u64,
}

impl RotationEngine {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            state: EngineState::Idle,
            completed_turns: 0,
        }
    }

    #[inline]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            EngineState::Idle => Phase::Idle,
            EngineState::Turning(_) => Phase::Animating,
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.phase() != Phase::Idle
    }

    /// The in-flight rotation group, if a turn is animating.
    pub fn group(&self) -> Option<&RotationGroup> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Turning(group) => Some(group),
        }
    }

    /// Number of turns committed since the engine was created.
    pub fn completed_turns(&self) -> u64 {
        self.completed_turns
    }

    /// Starts a turn.
    ///
    /// Busy requests are rejected without logging since they are expected
    /// under rapid input. Invalid requests are logged and leave the puzzle
    /// untouched.
    pub fn dispatch(&mut self, request: &MoveRequest) -> Result<(), MoveError> {
        if self.is_busy() {
            trace!("dropping move {:?}: rotation in progress", request.vector);
            return Err(MoveError::Busy);
        }

        let selection = select_layer(self.puzzle.registry(), request).inspect_err(|error| {
            warn!("ignoring move request: {error}");
        })?;

        let group = self.detach(selection, request.duration);
        debug!(
            "turning layer {}={} by {} quarter turn(s) about pivot {}",
            group.axis, group.layer, group.quarter_turns, group.pivot
        );
        self.state = EngineState::Turning(group);
        Ok(())
    }

    /// Computes the layer's pivot and moves each member into the group's
    /// local frame.
    fn detach(&mut self, selection: LayerSelection, duration: Duration) -> RotationGroup {
        let LayerSelection {
            axis,
            layer,
            members,
            quarter_turns,
        } = selection;

        let positions: Vec<Vec3> = members
            .iter()
            .map(|&id| self.world_position(id))
            .collect();
        // the selector never returns an empty layer
        let pivot = pivot(positions.iter().copied()).unwrap_or(Vec3::ZERO);

        for (&id, &position) in members.iter().zip(&positions) {
            self.puzzle.cube_mut(id).placement = Placement::Local {
                offset: position - pivot,
                pivot,
            };
        }

        RotationGroup {
            axis,
            layer,
            members,
            pivot,
            quarter_turns,
            angle: 0.0,
            target: quarter_turns as f32 * QUARTER_TURN,
            tween: Tween::new(duration),
        }
    }

    /// Advances the in-flight turn by `delta`.
    ///
    /// Returns the committed turn on the tick its animation completes.
    pub fn update(&mut self, delta: Duration) -> Option<CompletedTurn> {
        let EngineState::Turning(group) = &mut self.state else {
            return None;
        };

        match group.tween.advance(delta) {
            Step::Running(eased) => {
                group.angle = group.target * eased;
                trace!("turn progress {:.3}, angle {:.3}", group.progress(), group.angle);
                None
            }
            Step::Completed | Step::Spent => {
                group.angle = group.target;
                let EngineState::Turning(group) =
                    std::mem::replace(&mut self.state, EngineState::Idle)
                else {
                    return None;
                };
                Some(self.commit(group))
            }
        }
    }

    /// Dispatches a move and drives it to completion within one call.
    pub fn apply_now(&mut self, request: &MoveRequest) -> Result<CompletedTurn, MoveError> {
        self.dispatch(request)?;
        let mut delta = request.duration;
        loop {
            if let Some(turn) = self.update(delta) {
                return Ok(turn);
            }
            delta = Duration::ZERO;
        }
    }

    /// Reattaches every member at its rotated position, then reindexes it.
    fn commit(&mut self, group: RotationGroup) -> CompletedTurn {
        let rotation = group.rotation();
        let spacing = self.puzzle.spacing();

        for &id in &group.members {
            let cube = self.puzzle.cube_mut(id);
            let (offset, pivot) = match cube.placement {
                Placement::Local { offset, pivot } => (offset, pivot),
                Placement::Absolute(position) => (position - group.pivot, group.pivot),
            };
            let rotated = pivot + rotation * offset;

            let address = turn_address(cube.address, group.axis, group.quarter_turns);
            if Address::from_position(rotated, spacing) != Ok(address) {
                warn!(
                    "cube {} landed at {} but its address turned to {}",
                    id, rotated, address
                );
            }

            cube.placement = Placement::Absolute(address.to_position(spacing));
            cube.orientation = snap_orientation(rotation * cube.orientation);
            cube.address = address;
        }

        self.reindex(&group);
        self.completed_turns += 1;
        debug!(
            "committed turn of layer {}={} ({} total)",
            group.axis, group.layer, self.completed_turns
        );

        CompletedTurn {
            axis: group.axis,
            layer: group.layer,
            quarter_turns: group.quarter_turns,
        }
    }

    /// Updates registry membership along the two axes orthogonal to the turn.
    ///
    /// Membership along the turn axis is unchanged by a turn about it.
    fn reindex(&mut self, group: &RotationGroup) {
        for &id in &group.members {
            let address = self.puzzle.cube(id).address;
            debug_assert_eq!(address.get(group.axis), group.layer);
            for axis in group.axis.orthogonal() {
                self.puzzle
                    .registry_mut()
                    .reindex(id, axis, address.get(axis));
            }
        }
    }

    /// The cube's current world position, resolving the group frame if detached.
    pub fn world_position(&self, id: CubeId) -> Vec3 {
        self.world_transform(id).0
    }

    /// The cube's current world position and orientation.
    pub fn world_transform(&self, id: CubeId) -> (Vec3, Quat) {
        let cube = self.puzzle.cube(id);
        match cube.placement {
            Placement::Absolute(position) => (position, cube.orientation),
            Placement::Local { offset, pivot } => {
                let rotation = self
                    .group()
                    .map(RotationGroup::rotation)
                    .unwrap_or(Quat::IDENTITY);
                (pivot + rotation * offset, rotation * cube.orientation)
            }
        }
    }

    /// Pushes every cube's world transform into `scene`.
    pub fn sync(&self, scene: &mut impl CubeScene) {
        for cube in self.puzzle.cubes() {
            let (position, orientation) = self.world_transform(cube.id);
            scene.place(cube.id, position, orientation);
        }
    }
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new(Puzzle::default())
    }
}
