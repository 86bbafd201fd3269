//! Quarter-turn rotation utilities.
//!
//! Turns follow the right-hand rule about the positive world axis: a
//! positive quarter turn about X carries +Y onto +Z. The turned layer's
//! sign does not change the direction, so turning the x=1 and x=-1 layers
//! by the same amount spins them the same way in world space.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3, Vec4};

use crate::cubes::{Address, Axis};

/// Tolerance when deciding whether an angle is a whole number of quarter turns.
const QUARTER_TURN_TOLERANCE: f32 = 1e-3;

/// Largest accepted turn, in quarter turns either way (a half turn).
pub const MAX_QUARTER_TURNS: i32 = 2;

/// A single positive quarter turn of an address about each axis.
///
/// Indexed by [`Axis::index`]. Each entry permutes the two coordinates
/// orthogonal to the axis and flips one sign, matching
/// `Quat::from_axis_angle(axis, FRAC_PI_2)` applied to the position.
pub const QUARTER_TURNS: [fn(Address) -> Address; 3] = [
    // about X: (x, y, z) -> (x, -z, y)
    |a| Address::new(a.x, -a.z, a.y),
    // about Y: (x, y, z) -> (z, y, -x)
    |a| Address::new(a.z, a.y, -a.x),
    // about Z: (x, y, z) -> (-y, x, z)
    |a| Address::new(-a.y, a.x, a.z),
];

/// Converts a turn angle into a signed number of quarter turns.
///
/// Returns `None` for zero, non-finite angles, angles that are not a
/// whole multiple of 90 degrees, or angles beyond a half turn either way.
pub fn quarter_turns(amount: f32) -> Option<i32> {
    if !amount.is_finite() {
        return None;
    }
    let turns = amount / FRAC_PI_2;
    if turns.abs() > MAX_QUARTER_TURNS as f32 + QUARTER_TURN_TOLERANCE {
        return None;
    }
    let rounded = turns.round();
    if rounded == 0.0 || (turns - rounded).abs() > QUARTER_TURN_TOLERANCE {
        return None;
    }
    Some(rounded as i32)
}

/// Applies `turns` signed quarter turns about `axis` to an address.
///
/// The coordinate along `axis` never changes.
pub fn turn_address(address: Address, axis: Axis, turns: i32) -> Address {
    let rotate = QUARTER_TURNS[axis.index()];
    (0..turns.rem_euclid(4)).fold(address, |current, _| rotate(current))
}

/// Computes the pivot of a set of positions as their arithmetic mean.
///
/// Returns `None` for an empty set.
pub fn pivot(positions: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let (sum, count) = positions
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, count), position| {
            (sum + position, count + 1)
        });
    (count > 0).then(|| sum / count as f32)
}

/// Quaternion component magnitudes that occur in the 24 rotations of a cube.
const CUBE_SYMMETRY_COMPONENTS: [f32; 4] = [0.0, 0.5, std::f32::consts::FRAC_1_SQRT_2, 1.0];

/// Snaps an orientation to the nearest rotation in the cube's symmetry group.
///
/// Every component of such a rotation is 0, ±1/2, ±1/√2 or ±1, and those
/// values are far enough apart that accumulated float error always rounds
/// to the intended one.
pub fn snap_orientation(orientation: Quat) -> Quat {
    let snap = |component: f32| {
        let magnitude = CUBE_SYMMETRY_COMPONENTS
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - component.abs())
                    .abs()
                    .total_cmp(&(b - component.abs()).abs())
            })
            .unwrap_or(0.0);
        magnitude.copysign(component)
    };

    let raw: Vec4 = orientation.into();
    let snapped = Vec4::new(snap(raw.x), snap(raw.y), snap(raw.z), snap(raw.w));
    if snapped.length_squared() == 0.0 {
        return orientation.normalize();
    }
    Quat::from_vec4(snapped).normalize()
}

/// Returns true when two orientations describe the same rotation.
///
/// `q` and `-q` are the same rotation, so the sign of the dot product is ignored.
pub fn same_orientation(a: Quat, b: Quat, tolerance: f32) -> bool {
    (a.dot(b).abs() - 1.0).abs() <= tolerance
}
