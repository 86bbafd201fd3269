//! Keyboard input, buffered and drained once per tick.
//!
//! The window layer translates its own key codes into [`Key`] roles and
//! pushes [`KeyEvent`]s as they arrive. Once per tick, [`InputQueue::pump`]
//! replays them in order against the engine. The inversion modifier is a
//! held key: it flips the direction of every move pressed while it is down.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;

use crate::engine::RotationEngine;
use crate::moves::{Move, Turn};

/// What a physical key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Move(Move),
    /// Held to invert turn direction.
    Invert,
    ResetCamera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// What happened while draining one tick's worth of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// The turn started this tick, if any.
    pub started: Option<Turn>,
    /// Whether the camera should return to its initial pose.
    pub reset_camera: bool,
}

#[derive(Clone, Debug)]
pub struct InputQueue {
    events: VecDeque<KeyEvent>,
    /// Number of inversion keys currently held down.
    held_inverts: u8,
    turn_duration: Duration,
}

impl InputQueue {
    pub fn new(turn_duration: Duration) -> Self {
        Self {
            events: VecDeque::new(),
            held_inverts: 0,
            turn_duration,
        }
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.events.push_back(event);
    }

    /// Whether the inversion modifier is currently held.
    pub fn is_inverted(&self) -> bool {
        self.held_inverts > 0
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains every buffered event into the engine.
    ///
    /// At most one turn starts per tick: once a turn is dispatched the
    /// engine is busy, so later move presses in the same tick are dropped.
    /// Move presses while a turn is already animating are dropped too.
    pub fn pump(&mut self, engine: &mut RotationEngine) -> TickInput {
        let mut tick = TickInput::default();

        while let Some(event) = self.events.pop_front() {
            match event {
                KeyEvent::Pressed(Key::Invert) => {
                    self.held_inverts = self.held_inverts.saturating_add(1)
                }
                KeyEvent::Released(Key::Invert) => {
                    self.held_inverts = self.held_inverts.saturating_sub(1)
                }
                KeyEvent::Pressed(Key::ResetCamera) => tick.reset_camera = true,
                KeyEvent::Pressed(Key::Move(movement)) => {
                    let turn = Turn::new(movement, self.is_inverted());
                    if engine.dispatch(&turn.request(self.turn_duration)).is_ok() {
                        debug!("started turn {turn}");
                        tick.started = Some(turn);
                    }
                }
                KeyEvent::Released(_) => {}
            }
        }

        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_move_key_starts_turn() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(SECOND);
        queue.push(KeyEvent::Pressed(Key::Move(Move::Up)));
        queue.push(KeyEvent::Released(Key::Move(Move::Up)));

        let tick = queue.pump(&mut engine);

        assert_eq!(tick.started, Some(Turn::new(Move::Up, false)));
        assert!(!tick.reset_camera);
        assert_eq!(engine.phase(), Phase::Animating);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_held_modifier_inverts_turn() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(SECOND);
        queue.push(KeyEvent::Pressed(Key::Invert));
        queue.push(KeyEvent::Pressed(Key::Move(Move::Left)));

        let tick = queue.pump(&mut engine);

        assert_eq!(tick.started, Some(Turn::new(Move::Left, true)));
        assert!(queue.is_inverted());
        assert_eq!(engine.group().unwrap().quarter_turns, -1);

        queue.push(KeyEvent::Released(Key::Invert));
        queue.pump(&mut engine);
        assert!(!queue.is_inverted());
    }

    #[test]
    fn test_inversion_holds_until_every_modifier_released() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(Duration::ZERO);
        queue.push(KeyEvent::Pressed(Key::Invert));
        queue.push(KeyEvent::Pressed(Key::Invert));
        queue.push(KeyEvent::Released(Key::Invert));
        queue.push(KeyEvent::Pressed(Key::Move(Move::Front)));

        let tick = queue.pump(&mut engine);

        assert!(queue.is_inverted());
        assert_eq!(tick.started, Some(Turn::new(Move::Front, true)));

        engine.update(Duration::ZERO);
        queue.push(KeyEvent::Released(Key::Invert));
        queue.push(KeyEvent::Released(Key::Invert));
        queue.push(KeyEvent::Pressed(Key::Move(Move::Front)));

        let tick = queue.pump(&mut engine);

        assert!(!queue.is_inverted());
        assert_eq!(tick.started, Some(Turn::new(Move::Front, false)));
    }

    #[test]
    fn test_modifier_alone_does_not_turn() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(SECOND);
        queue.push(KeyEvent::Pressed(Key::Invert));

        let tick = queue.pump(&mut engine);

        assert_eq!(tick.started, None);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_only_first_move_per_tick_starts() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(SECOND);
        queue.push(KeyEvent::Pressed(Key::Move(Move::Right)));
        queue.push(KeyEvent::Pressed(Key::Move(Move::Front)));

        let tick = queue.pump(&mut engine);

        assert_eq!(tick.started, Some(Turn::new(Move::Right, false)));
        engine.update(SECOND);
        assert_eq!(engine.completed_turns(), 1);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_reset_camera_leaves_puzzle_alone() {
        let mut engine = RotationEngine::default();
        let mut queue = InputQueue::new(SECOND);
        queue.push(KeyEvent::Pressed(Key::ResetCamera));

        let tick = queue.pump(&mut engine);

        assert!(tick.reset_camera);
        assert_eq!(tick.started, None);
        assert_eq!(engine.phase(), Phase::Idle);
    }
}
