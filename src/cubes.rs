//! Unit cube definitions and coordinate types.
//!
//! The puzzle is a 3x3x3 arrangement of unit cubes centered on the origin.
//! Every cube carries a logical address (its layer on each axis, each in
//! {-1, 0, 1}) alongside its floating-point transform. The hidden center
//! cube at (0, 0, 0) is never created, leaving 26 cubes.

use std::fmt;
use std::ops::Neg;

use glam::{IVec3, Quat, Vec3};

use crate::error::LayerError;
use crate::registry::CubeRegistry;

/// Number of unit cubes in the puzzle (27 cells minus the hidden center).
pub const CUBE_COUNT: usize = 26;

/// Default distance between neighbouring cube centres, in world units.
pub const DEFAULT_SPACING: f32 = 1.0;

/// One of the three principal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `(x, y, z)` order.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The positive unit vector along this axis.
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub const fn label(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// The two axes orthogonal to this one, in cyclic order.
    ///
    /// Cyclic order (x -> y -> z -> x) keeps the pair right-handed: a
    /// positive quarter turn about `self` carries the first onto the second.
    pub const fn orthogonal(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A layer coordinate along one axis.
///
/// Out-of-range coordinates are unrepresentable; conversions from raw
/// integers go through `TryFrom` and fail with [`LayerError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum Layer {
    Negative = -1,
    Middle = 0,
    Positive = 1,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Negative, Layer::Middle, Layer::Positive];

    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Bucket index in `0..3`.
    #[inline]
    pub const fn index(self) -> usize {
        (self as i8 + 1) as usize
    }
}

impl Neg for Layer {
    type Output = Layer;

    fn neg(self) -> Layer {
        match self {
            Layer::Negative => Layer::Positive,
            Layer::Middle => Layer::Middle,
            Layer::Positive => Layer::Negative,
        }
    }
}

impl TryFrom<i32> for Layer {
    type Error = LayerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Layer::Negative),
            0 => Ok(Layer::Middle),
            1 => Ok(Layer::Positive),
            other => Err(LayerError(other)),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A cube's logical address: its layer on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    pub x: Layer,
    pub y: Layer,
    pub z: Layer,
}

impl Address {
    /// The hidden center cell, which holds no cube.
    pub const CENTER: Address = Address::new(Layer::Middle, Layer::Middle, Layer::Middle);

    pub const fn new(x: Layer, y: Layer, z: Layer) -> Self {
        Self { x, y, z }
    }

    /// Builds an address from raw coordinates, each of which must be in {-1, 0, 1}.
    pub fn from_coords(x: i32, y: i32, z: i32) -> Result<Self, LayerError> {
        Ok(Self::new(
            Layer::try_from(x)?,
            Layer::try_from(y)?,
            Layer::try_from(z)?,
        ))
    }

    /// Recovers the address of a cube from its absolute position on a grid
    /// with the given spacing.
    pub fn from_position(position: Vec3, spacing: f32) -> Result<Self, LayerError> {
        let cell = (position / spacing).round();
        Self::from_coords(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    #[inline]
    pub const fn get(&self, axis: Axis) -> Layer {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, layer: Layer) {
        match axis {
            Axis::X => self.x = layer,
            Axis::Y => self.y = layer,
            Axis::Z => self.z = layer,
        }
    }

    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(
            self.x.value() as i32,
            self.y.value() as i32,
            self.z.value() as i32,
        )
    }

    /// The absolute position of a cube at this address on a grid with the
    /// given spacing.
    pub fn to_position(self, spacing: f32) -> Vec3 {
        self.to_ivec3().as_vec3() * spacing
    }

    /// All 26 cube addresses in x-major order, skipping the center.
    pub fn all() -> impl Iterator<Item = Address> {
        Layer::ALL.into_iter().flat_map(|x| {
            Layer::ALL.into_iter().flat_map(move |y| {
                Layer::ALL
                    .into_iter()
                    .map(move |z| Address::new(x, y, z))
                    .filter(|address| *address != Address::CENTER)
            })
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Stable identity of a unit cube, assigned once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(pub u8);

impl CubeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Which frame a cube's position is expressed in.
///
/// A cube is either free in world space, or detached into a rotation group
/// where its position is an offset from the group's pivot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    Absolute(Vec3),
    Local { offset: Vec3, pivot: Vec3 },
}

/// A single small cube of the puzzle.
#[derive(Clone, Debug)]
pub struct UnitCube {
    pub id: CubeId,
    /// Address at construction; decides which faces carry stickers.
    pub home: Address,
    /// Current logical address, mirrored by the registry buckets.
    pub address: Address,
    pub placement: Placement,
    pub orientation: Quat,
}

/// The 26 unit cubes and the registry indexing them by layer.
#[derive(Clone, Debug)]
pub struct Puzzle {
    cubes: Vec<UnitCube>,
    registry: CubeRegistry,
    spacing: f32,
}

impl Puzzle {
    /// Creates the solved puzzle on a grid with the given spacing.
    ///
    /// Cube ids are assigned in x-major address order.
    pub fn new(spacing: f32) -> Self {
        let mut registry = CubeRegistry::new();
        let cubes: Vec<UnitCube> = Address::all()
            .enumerate()
            .map(|(index, address)| {
                let id = CubeId(index as u8);
                registry.insert(id, address);
                UnitCube {
                    id,
                    home: address,
                    address,
                    placement: Placement::Absolute(address.to_position(spacing)),
                    orientation: Quat::IDENTITY,
                }
            })
            .collect();
        debug_assert_eq!(cubes.len(), CUBE_COUNT);

        Self {
            cubes,
            registry,
            spacing,
        }
    }

    #[inline]
    pub fn cubes(&self) -> &[UnitCube] {
        &self.cubes
    }

    #[inline]
    pub fn cube(&self, id: CubeId) -> &UnitCube {
        &self.cubes[id.index()]
    }

    #[inline]
    pub(crate) fn cube_mut(&mut self, id: CubeId) -> &mut UnitCube {
        &mut self.cubes[id.index()]
    }

    #[inline]
    pub fn registry(&self) -> &CubeRegistry {
        &self.registry
    }

    #[inline]
    pub(crate) fn registry_mut(&mut self) -> &mut CubeRegistry {
        &mut self.registry
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Finds the cube currently at `address`, if any.
    pub fn cube_at(&self, address: Address) -> Option<CubeId> {
        self.cubes
            .iter()
            .find(|cube| cube.address == address)
            .map(|cube| cube.id)
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(DEFAULT_SPACING)
    }
}
