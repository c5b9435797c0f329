//! Density-driven object scattering over the finished terrain.
//!
//! Two independent passes read the final native-resolution elevation and moisture grids:
//! - [`foliage::place_foliage`]: coarse stride grid, large prototypes, one bulk commit.
//! - [`detail::place_details`]: every cell, small props, instantiated immediately.
//!
//! Each sample draws from its own seeded stream (see [`crate::sampling::seed_for_cell`]).
use glam::Vec3;

use crate::biome::BiomeCatalog;
use crate::field::Grid;
use crate::terrain::TerrainHost;

pub mod detail;
pub mod foliage;
pub mod record;

pub use detail::{place_details, DETAIL_JITTER, DETAIL_MIN_HEIGHT};
pub use foliage::{place_foliage, FOLIAGE_JITTER, FOLIAGE_STRIDE};
pub use record::{PlacementRecord, PlacementSource};

/// Read-only inputs shared by both passes.
#[derive(Clone, Copy)]
pub struct ScatterContext<'a> {
    pub elevation: &'a Grid,
    pub moisture: &'a Grid,
    pub catalog: &'a BiomeCatalog,
    /// Base seed the per-cell streams are derived from.
    pub seed: u64,
}

impl<'a> ScatterContext<'a> {
    pub fn new(elevation: &'a Grid, moisture: &'a Grid, catalog: &'a BiomeCatalog, seed: u64) -> Self {
        debug_assert_eq!(elevation.size(), moisture.size());
        Self {
            elevation,
            moisture,
            catalog,
            seed,
        }
    }

    /// Maps continuous grid coordinates to world space on the host, with `y` left at the
    /// host's base.
    pub(crate) fn grid_to_world<H: TerrainHost + ?Sized>(&self, host: &H, gx: f32, gz: f32) -> Vec3 {
        let (w, d) = self.elevation.size();
        let size = host.size();
        host.position() + Vec3::new(gx / w as f32 * size.x, 0.0, gz / d as f32 * size.z)
    }
}

/// Counters for one scatter pass.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Sample points visited.
    pub evaluated: usize,
    /// Records produced.
    pub placed: usize,
    /// Sample points skipped because their biome has no definition.
    pub missing_biome: usize,
}

/// Counters for both scatter passes of a run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScatterStats {
    pub foliage: PassStats,
    pub details: PassStats,
}

impl ScatterStats {
    /// Sample points evaluated by both passes.
    pub fn evaluated(&self) -> usize {
        self.foliage.evaluated + self.details.evaluated
    }

    /// Sample points skipped in either pass for lack of a biome definition.
    pub fn missing_biome(&self) -> usize {
        self.foliage.missing_biome + self.details.missing_biome
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::biome::{BiomeCatalog, BiomeDefinition, BiomeId, BiomeRule, BiomeRules};
    use crate::field::Grid;
    use crate::terrain::{HeightfieldTerrain, TerrainHost};
    use glam::Vec3;

    /// Single-biome catalog covering every height and moisture.
    pub(crate) fn single_biome(definition: BiomeDefinition) -> BiomeCatalog {
        BiomeCatalog::new(
            BiomeRules::new(vec![BiomeRule::new(
                definition.id,
                (f32::MIN, f32::MAX),
                (f32::MIN, f32::MAX),
            )]),
            vec![definition],
        )
    }

    pub(crate) fn flat(width: usize, depth: usize, height: f32) -> Grid {
        Grid::from_fn(width, depth, |_, _| height)
    }

    pub(crate) fn host_for(elevation: &Grid) -> HeightfieldTerrain {
        let mut host = HeightfieldTerrain::new(elevation.width(), elevation.depth());
        host.set_resolution(
            elevation.width(),
            elevation.depth(),
            Vec3::new(elevation.width() as f32, 20.0, elevation.depth() as f32),
        );
        host.set_heights(elevation);
        host
    }

    pub(crate) fn forest(foliage_density: f32, detail_density: f32) -> BiomeDefinition {
        BiomeDefinition::new(BiomeId::Forest, "moss")
            .with_foliage(["oak", "pine"], foliage_density)
            .with_details(["rock", "fern"], detail_density)
    }
}
