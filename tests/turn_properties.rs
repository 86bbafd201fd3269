//! End-to-end properties of layer turns through the public engine API.

use std::time::Duration;

use cubeturn::cubes::{Placement, CUBE_COUNT};
use cubeturn::geometry::same_orientation;
use cubeturn::input::{InputQueue, Key, KeyEvent};
use cubeturn::{Address, Axis, Layer, Move, MoveError, Phase, RotationEngine, Turn};

const TICK: Duration = Duration::from_millis(16);

fn addr(x: i32, y: i32, z: i32) -> Address {
    Address::from_coords(x, y, z).unwrap()
}

/// Ticks the engine at a fixed frame rate until it returns to idle.
fn run_to_idle(engine: &mut RotationEngine) -> usize {
    let mut ticks = 0;
    while engine.is_busy() {
        engine.update(TICK);
        ticks += 1;
        assert!(ticks < 10_000, "turn never completed");
    }
    ticks
}

fn assert_registry_consistent(engine: &RotationEngine) {
    let puzzle = engine.puzzle();
    assert_eq!(puzzle.registry().check_consistency(puzzle.cubes()), Ok(()));
    for axis in Axis::ALL {
        assert_eq!(puzzle.registry().len(axis), CUBE_COUNT);
    }
}

#[test]
fn test_frame_driven_turn_takes_its_duration() {
    let mut engine = RotationEngine::default();
    engine
        .dispatch(&Turn::new(Move::Back, false).request(Duration::from_millis(160)))
        .unwrap();

    let ticks = run_to_idle(&mut engine);

    assert_eq!(ticks, 10);
    assert_eq!(engine.completed_turns(), 1);
    assert_registry_consistent(&engine);
}

#[test]
fn test_right_layer_corner_scenario() {
    let mut engine = RotationEngine::default();
    let corner = engine.puzzle().cube_at(addr(1, 1, 1)).unwrap();

    engine
        .dispatch(&Turn::new(Move::Right, false).request(Duration::from_millis(500)))
        .unwrap();
    run_to_idle(&mut engine);

    let cube = engine.puzzle().cube(corner);
    assert_eq!(cube.address, addr(1, -1, 1));
    assert_eq!(cube.address.x, Layer::Positive);
    assert_registry_consistent(&engine);
}

#[test]
fn test_up_then_inverse_restores_up_layer() {
    let mut engine = RotationEngine::default();
    let up_layer: Vec<_> = engine
        .puzzle()
        .registry()
        .lookup_layer(Axis::Y, Layer::Positive)
        .to_vec();
    let before: Vec<_> = up_layer
        .iter()
        .map(|&id| engine.puzzle().cube(id).clone())
        .collect();

    let turn = Turn::new(Move::Up, false);
    engine.dispatch(&turn.request(Duration::from_millis(200))).unwrap();
    run_to_idle(&mut engine);
    engine
        .dispatch(&turn.inverse().request(Duration::from_millis(200)))
        .unwrap();
    run_to_idle(&mut engine);

    for original in before {
        let cube = engine.puzzle().cube(original.id);
        assert_eq!(cube.address, original.address);
        assert_eq!(cube.placement, original.placement);
        assert!(same_orientation(cube.orientation, original.orientation, 1e-6));
    }
}

#[test]
fn test_long_sequence_keeps_registry_consistent_and_on_grid() {
    let mut engine = RotationEngine::default();
    let sequence = "R U R' U' F B' L D D' L' B F' U R U' R'";

    for token in sequence.split_whitespace() {
        let turn: Turn = token.parse().unwrap();
        engine.dispatch(&turn.request(Duration::from_millis(50))).unwrap();
        run_to_idle(&mut engine);
        assert_registry_consistent(&engine);

        for cube in engine.puzzle().cubes() {
            assert_eq!(
                cube.placement,
                Placement::Absolute(cube.address.to_position(1.0)),
                "cube {} drifted off the grid after {turn}",
                cube.id
            );
        }
    }

    // the second half undoes the first, so every cube is home
    for cube in engine.puzzle().cubes() {
        assert_eq!(cube.address, cube.home);
    }
}

#[test]
fn test_input_during_turn_is_dropped() {
    let mut engine = RotationEngine::default();
    let mut input = InputQueue::new(Duration::from_millis(100));

    input.push(KeyEvent::Pressed(Key::Move(Move::Front)));
    input.pump(&mut engine);
    engine.update(TICK);

    input.push(KeyEvent::Pressed(Key::Move(Move::Left)));
    let tick = input.pump(&mut engine);
    assert_eq!(tick.started, None);
    assert_eq!(
        engine.dispatch(&Turn::new(Move::Left, false).request(TICK)),
        Err(MoveError::Busy)
    );

    run_to_idle(&mut engine);
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.completed_turns(), 1);

    // the dropped press is not replayed once idle
    let tick = input.pump(&mut engine);
    assert_eq!(tick.started, None);
    assert_eq!(engine.phase(), Phase::Idle);
}
