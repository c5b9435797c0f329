//! The terrain host the pipeline writes into.
//!
//! The host owns the rendered heightmap, surface layers, alphamap and instanced objects.
//! The pipeline only reads back height samples and steepness; everything else flows one
//! way into the host. [`HeightfieldTerrain`] is an in-memory implementation used by the
//! demos and tests.
use glam::Vec3;

use crate::biome::{LayerId, PrefabId};
use crate::field::Grid;
use crate::paint::AlphaMap;
use crate::scatter::PlacementRecord;

pub mod heightfield;

pub use heightfield::HeightfieldTerrain;

/// Operations the generation pipeline performs on a terrain host.
pub trait TerrainHost {
    /// Set the heightmap resolution and the world-space size (`x` width, `y` max height,
    /// `z` depth).
    fn set_resolution(&mut self, width: usize, depth: usize, size: Vec3);

    /// World-space size of the terrain.
    fn size(&self) -> Vec3;

    /// World-space position of the terrain's minimum corner.
    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Write the normalized height array.
    fn set_heights(&mut self, heights: &Grid);

    /// Write the surface layer list.
    fn set_layers(&mut self, layers: &[LayerId]);

    /// Surface layers currently configured, in alphamap channel order.
    fn layers(&self) -> &[LayerId];

    /// Replace the foliage prototype list and refresh dependent state.
    fn set_prototypes(&mut self, prototypes: &[PrefabId]);

    fn prototypes(&self) -> &[PrefabId];

    /// Remove every foliage instance.
    fn clear_tree_instances(&mut self);

    /// Commit a batch of foliage instances and flush them in one go.
    fn add_tree_instances(&mut self, instances: Vec<PlacementRecord>);

    /// Instantiate a single detail prop immediately.
    fn spawn_detail(&mut self, record: PlacementRecord);

    /// Alphamap resolution `(width, height)`.
    fn alphamap_resolution(&self) -> (usize, usize);

    /// Replace the whole alphamap in one write.
    fn set_alphamap(&mut self, alphamap: AlphaMap);

    /// World-space height of the surface below `world_position`.
    fn sample_height(&self, world_position: Vec3) -> f32;

    /// Steepness in degrees at heightmap cell `(x, z)`.
    fn steepness(&self, x: usize, z: usize) -> f32;
}
