//! Interactive 3D view of the puzzle using kiss3d.

use std::time::Instant;

use kiss3d::prelude::*;

use cubeturn::config::Settings;
use cubeturn::cubes::{Address, Axis, Layer};
use cubeturn::input::{InputQueue, Key as Control, KeyEvent};
use cubeturn::moves::Move;
use cubeturn::{CubeId, CubeScene, Puzzle, RotationEngine};

/// Size of each rendered cube body (slightly smaller than the spacing for visible gaps).
const CUBE_SIZE: f32 = 0.95;
/// Edge length of a sticker on its face.
const STICKER_SIZE: f32 = 0.8;
/// Thickness of a sticker, along the face normal.
const STICKER_DEPTH: f32 = 0.02;
/// Distance of the orbit camera from the puzzle center.
const CAMERA_DISTANCE: f32 = 8.0;

/// Returns the sticker color for the outward face along `axis` on side `layer`.
///
/// Stays fixed to the face a cube had at creation so colors travel with the cube.
fn face_color(axis: Axis, layer: Layer) -> Color {
    match (axis, layer) {
        (Axis::X, Layer::Positive) => Color::new(0.85, 0.1, 0.1, 1.0), // red
        (Axis::X, _) => Color::new(1.0, 0.5, 0.0, 1.0),                 // orange
        (Axis::Y, Layer::Positive) => Color::new(0.95, 0.95, 0.95, 1.0), // white
        (Axis::Y, _) => Color::new(1.0, 0.85, 0.0, 1.0),                // yellow
        (Axis::Z, Layer::Positive) => Color::new(0.0, 0.6, 0.2, 1.0),   // green
        (Axis::Z, _) => Color::new(0.0, 0.3, 0.85, 1.0),                // blue
    }
}

/// Maps a window key to its puzzle control.
fn control_for(key: kiss3d::event::Key) -> Option<Control> {
    use kiss3d::event::Key;
    let control = match key {
        Key::U => Control::Move(Move::Up),
        Key::D => Control::Move(Move::Down),
        Key::L => Control::Move(Move::Left),
        Key::R => Control::Move(Move::Right),
        Key::F => Control::Move(Move::Front),
        Key::B => Control::Move(Move::Back),
        Key::LShift | Key::RShift => Control::Invert,
        Key::Space => Control::ResetCamera,
        _ => return None,
    };
    Some(control)
}

/// The kiss3d scene nodes standing in for each unit cube, indexed by [`CubeId`].
struct RenderedPuzzle {
    nodes: Vec<SceneNode3d>,
}

impl RenderedPuzzle {
    /// Adds a dark body per cube with a sticker on every outward face.
    fn build(scene: &mut SceneNode3d, puzzle: &Puzzle) -> Self {
        let nodes = puzzle
            .cubes()
            .iter()
            .map(|cube| {
                let mut body = scene
                    .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                    .set_color(Color::new(0.08, 0.08, 0.08, 1.0));
                add_stickers(&mut body, cube.home);
                body
            })
            .collect();
        Self { nodes }
    }
}

/// Attaches stickers as children of `body` so they follow its transform.
fn add_stickers(body: &mut SceneNode3d, home: Address) {
    for axis in Axis::ALL {
        let layer = home.get(axis);
        if layer == Layer::Middle {
            continue;
        }

        let mut extents = [STICKER_SIZE; 3];
        extents[axis.index()] = STICKER_DEPTH;
        let outward = layer.value() as f32 * (CUBE_SIZE + STICKER_DEPTH) / 2.0;
        let mut offset = [0.0f32; 3];
        offset[axis.index()] = outward;

        body.add_cube(extents[0], extents[1], extents[2])
            .set_color(face_color(axis, layer))
            .set_position(Vec3::from_array(offset));
    }
}

impl CubeScene for RenderedPuzzle {
    fn place(&mut self, id: CubeId, position: glam::Vec3, orientation: glam::Quat) {
        let node = &mut self.nodes[id.index()];
        node.set_position(Vec3::from_array(position.to_array()));
        node.set_rotation(Quat::from_array(orientation.to_array()));
    }
}

fn default_camera() -> OrbitCamera3d {
    let mut camera = OrbitCamera3d::default();
    camera.set_dist(CAMERA_DISTANCE);
    camera
}

fn window_title(inverted: bool) -> String {
    format!(
        "Cube - [U/D/L/R/F/B] turn, [Shift] invert{}, [Space] reset camera",
        if inverted { " (held)" } else { "" }
    )
}

/// Opens the interactive viewer and runs until the window closes.
pub fn display(settings: Settings) {
    pollster::block_on(display_async(settings));
}

async fn display_async(settings: Settings) {
    let mut window = Window::new(&window_title(false)).await;
    let mut camera = default_camera();

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut engine = RotationEngine::new(Puzzle::new(settings.spacing));
    let mut rendered = RenderedPuzzle::build(&mut scene, engine.puzzle());
    let mut input = InputQueue::new(settings.turn_duration);
    let mut inverted = false;
    let mut last_frame = Instant::now();

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::Action;
                let Some(control) = control_for(key) else {
                    continue;
                };
                if action == Action::Press {
                    input.push(KeyEvent::Pressed(control));
                } else {
                    input.push(KeyEvent::Released(control));
                }
            }
        }

        let tick = input.pump(&mut engine);
        if tick.reset_camera {
            camera = default_camera();
        }
        if input.is_inverted() != inverted {
            inverted = input.is_inverted();
            window.set_title(&window_title(inverted));
        }

        let now = Instant::now();
        engine.update(now - last_frame);
        last_frame = now;

        engine.sync(&mut rendered);

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
