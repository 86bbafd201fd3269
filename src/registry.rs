//! Layer membership index for the unit cubes.
//!
//! Three parallel indexes, one per axis, each mapping a layer coordinate to
//! the ordered list of cubes currently in that layer. The buckets are the
//! single source of truth for which cubes take part in a turn.

use rustc_hash::FxHashSet;

use crate::cubes::{Address, Axis, CubeId, Layer, UnitCube};
use crate::error::RegistryError;

/// Buckets for one axis, indexed by [`Layer::index`].
type AxisIndex = [Vec<CubeId>; 3];

#[derive(Clone, Debug, Default)]
pub struct CubeRegistry {
    /// Indexed by `[axis][layer]`.
    indexes: [AxisIndex; 3],
}

impl CubeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cube in its bucket on every axis.
    pub fn insert(&mut self, id: CubeId, address: Address) {
        for axis in Axis::ALL {
            self.indexes[axis.index()][address.get(axis).index()].push(id);
        }
    }

    /// Returns the cubes in `layer` along `axis`, in registration order.
    #[inline]
    pub fn lookup_layer(&self, axis: Axis, layer: Layer) -> &[CubeId] {
        &self.indexes[axis.index()][layer.index()]
    }

    /// Finds which layer a cube is registered under on `axis`.
    pub fn layer_of(&self, id: CubeId, axis: Axis) -> Option<Layer> {
        Layer::ALL
            .into_iter()
            .find(|layer| self.lookup_layer(axis, *layer).contains(&id))
    }

    /// Moves a cube out of its current bucket on `axis` into `layer`.
    ///
    /// Reindexing into the bucket the cube already occupies keeps its
    /// position in that bucket.
    pub fn reindex(&mut self, id: CubeId, axis: Axis, layer: Layer) {
        let axis_index = &mut self.indexes[axis.index()];
        if axis_index[layer.index()].contains(&id) {
            return;
        }
        for bucket in axis_index.iter_mut() {
            bucket.retain(|&member| member != id);
        }
        axis_index[layer.index()].push(id);
    }

    /// Number of cubes registered on one axis.
    pub fn len(&self, axis: Axis) -> usize {
        self.indexes[axis.index()].iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        Axis::ALL.into_iter().all(|axis| self.len(axis) == 0)
    }

    /// Checks that every cube sits in exactly one bucket per axis, that the
    /// bucket matches its address, and that each axis index holds exactly
    /// the given population.
    pub fn check_consistency(&self, cubes: &[UnitCube]) -> Result<(), RegistryError> {
        for axis in Axis::ALL {
            let mut seen: FxHashSet<CubeId> = FxHashSet::default();

            for layer in Layer::ALL {
                seen.extend(self.lookup_layer(axis, layer).iter().copied());
            }

            for cube in cubes {
                let count = Layer::ALL
                    .into_iter()
                    .filter(|layer| self.lookup_layer(axis, *layer).contains(&cube.id))
                    .count();
                if count != 1 {
                    return Err(RegistryError::BucketCount {
                        id: cube.id.0,
                        axis: axis.label(),
                        count,
                    });
                }

                // count == 1 guarantees a bucket
                let registered = self.layer_of(cube.id, axis).unwrap_or(Layer::Middle);
                let addressed = cube.address.get(axis);
                if registered != addressed {
                    return Err(RegistryError::AddressMismatch {
                        id: cube.id.0,
                        axis: axis.label(),
                        registered: registered.value(),
                        addressed: addressed.value(),
                    });
                }
            }

            // duplicates within a bucket, or ids the puzzle does not own
            let count = self.len(axis);
            if count != cubes.len() || seen.len() != cubes.len() {
                return Err(RegistryError::Population {
                    axis: axis.label(),
                    count,
                    expected: cubes.len(),
                });
            }
        }

        Ok(())
    }

    /// Finds the cube registered at `address` by intersecting its three buckets.
    pub fn cube_at(&self, address: Address) -> Option<CubeId> {
        self.lookup_layer(Axis::X, address.x)
            .iter()
            .copied()
            .find(|id| {
                self.lookup_layer(Axis::Y, address.y).contains(id)
                    && self.lookup_layer(Axis::Z, address.z).contains(id)
            })
    }

    /// Formats the registry as a human-readable table.
    ///
    /// Displays the three z-slices side by side. Rows run from y=1 (top) to
    /// y=-1, columns from x=-1 to x=1. Each cell holds the two-digit id of
    /// the cube registered there, or `..` when empty.
    pub fn format_layers(&self) -> String {
        /// Width of one slice: three two-character cells and two separators.
        const SLICE_WIDTH: usize = 8;

        let mut output = String::new();
        for (i, z) in Layer::ALL.into_iter().enumerate() {
            if i > 0 {
                output.push_str("  ");
            }
            let label = format!("z={}", z);
            if i + 1 < Layer::ALL.len() {
                output.push_str(&format!("{:<width$}", label, width = SLICE_WIDTH));
            } else {
                output.push_str(&label);
            }
        }
        output.push('\n');

        for y in Layer::ALL.into_iter().rev() {
            for (i, z) in Layer::ALL.into_iter().enumerate() {
                if i > 0 {
                    output.push_str("  ");
                }
                for (j, x) in Layer::ALL.into_iter().enumerate() {
                    if j > 0 {
                        output.push(' ');
                    }
                    match self.cube_at(Address::new(x, y, z)) {
                        Some(id) => output.push_str(&id.to_string()),
                        None => output.push_str(".."),
                    }
                }
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubes::{Puzzle, CUBE_COUNT};

    #[test]
    fn test_each_layer_of_new_puzzle_has_expected_size() {
        let puzzle = Puzzle::default();
        let registry = puzzle.registry();
        for axis in Axis::ALL {
            assert_eq!(registry.lookup_layer(axis, Layer::Negative).len(), 9);
            assert_eq!(registry.lookup_layer(axis, Layer::Middle).len(), 8);
            assert_eq!(registry.lookup_layer(axis, Layer::Positive).len(), 9);
            assert_eq!(registry.len(axis), CUBE_COUNT);
        }
        assert_eq!(registry.check_consistency(puzzle.cubes()), Ok(()));
    }

    #[test]
    fn test_reindex_moves_cube_between_buckets() {
        let mut registry = CubeRegistry::new();
        let address = Address::new(Layer::Positive, Layer::Positive, Layer::Positive);
        registry.insert(CubeId(7), address);

        registry.reindex(CubeId(7), Axis::Y, Layer::Negative);

        assert!(registry.lookup_layer(Axis::Y, Layer::Positive).is_empty());
        assert_eq!(registry.lookup_layer(Axis::Y, Layer::Negative), &[CubeId(7)]);
        // other axes are untouched
        assert_eq!(registry.lookup_layer(Axis::X, Layer::Positive), &[CubeId(7)]);
        assert_eq!(registry.lookup_layer(Axis::Z, Layer::Positive), &[CubeId(7)]);
    }

    #[test]
    fn test_reindex_into_same_bucket_keeps_order() {
        let mut registry = CubeRegistry::new();
        registry.insert(CubeId(0), Address::new(Layer::Positive, Layer::Middle, Layer::Middle));
        registry.insert(CubeId(1), Address::new(Layer::Positive, Layer::Negative, Layer::Middle));

        registry.reindex(CubeId(0), Axis::X, Layer::Positive);

        assert_eq!(
            registry.lookup_layer(Axis::X, Layer::Positive),
            &[CubeId(0), CubeId(1)]
        );
    }

    #[test]
    fn test_consistency_detects_stale_bucket() {
        let mut puzzle = Puzzle::default();
        let id = puzzle.registry().lookup_layer(Axis::X, Layer::Positive)[0];
        puzzle.registry_mut().reindex(id, Axis::X, Layer::Negative);

        assert_eq!(
            puzzle.registry().check_consistency(puzzle.cubes()),
            Err(RegistryError::AddressMismatch {
                id: id.0,
                axis: 'x',
                registered: -1,
                addressed: 1,
            })
        );
    }

    #[test]
    fn test_consistency_detects_missing_cube() {
        let puzzle = Puzzle::default();
        let registry = CubeRegistry::new();
        assert!(matches!(
            registry.check_consistency(puzzle.cubes()),
            Err(RegistryError::BucketCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_format_layers_initial_puzzle() {
        let puzzle = Puzzle::default();
        insta::assert_snapshot!(puzzle.registry().format_layers(), @r"
        z=-1      z=0       z=1
        06 14 23  07 15 24  08 16 25
        03 12 20  04 .. 21  05 13 22
        00 09 17  01 10 18  02 11 19
        ");
    }
}
