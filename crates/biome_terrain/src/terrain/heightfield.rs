//! In-memory terrain host.
//!
//! Heights are clamped to `[0, 1]` on write, mirroring hosts that store normalized
//! heightmaps. Bulk foliage commits are counted so callers can observe flushes.
use glam::Vec3;
use tracing::debug;

use super::TerrainHost;
use crate::biome::{LayerId, PrefabId};
use crate::field::{steepness_degrees, Grid, HeightfieldScale};
use crate::paint::AlphaMap;
use crate::pipeline::GeneratorConfig;
use crate::scatter::PlacementRecord;

/// A terrain held entirely in memory.
#[derive(Clone, Debug)]
pub struct HeightfieldTerrain {
    position: Vec3,
    size: Vec3,
    heights: Grid,
    layers: Vec<LayerId>,
    prototypes: Vec<PrefabId>,
    tree_instances: Vec<PlacementRecord>,
    details: Vec<PlacementRecord>,
    alphamap: Option<AlphaMap>,
    alphamap_resolution: (usize, usize),
    flushes: usize,
}

impl HeightfieldTerrain {
    /// Create an empty terrain with the given alphamap resolution.
    pub fn new(alphamap_width: usize, alphamap_height: usize) -> Self {
        Self {
            position: Vec3::ZERO,
            size: Vec3::ONE,
            heights: Grid::new(0, 0),
            layers: Vec::new(),
            prototypes: Vec::new(),
            tree_instances: Vec::new(),
            details: Vec::new(),
            alphamap: None,
            alphamap_resolution: (alphamap_width, alphamap_height),
            flushes: 0,
        }
    }

    /// Create an empty terrain with the alphamap resolution of `config`.
    pub fn for_config(config: &GeneratorConfig) -> Self {
        Self::new(config.alphamap_resolution, config.alphamap_resolution)
    }

    /// Sets the world-space position of the minimum corner.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Stored normalized heights.
    pub fn heights(&self) -> &Grid {
        &self.heights
    }

    pub fn tree_instances(&self) -> &[PlacementRecord] {
        &self.tree_instances
    }

    pub fn details(&self) -> &[PlacementRecord] {
        &self.details
    }

    pub fn alphamap(&self) -> Option<&AlphaMap> {
        self.alphamap.as_ref()
    }

    /// Number of bulk foliage commits performed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn scale(&self) -> HeightfieldScale {
        let (w, d) = self.heights.size();
        HeightfieldScale::new(
            self.size.x / w.max(1) as f32,
            self.size.z / d.max(1) as f32,
            self.size.y,
        )
    }
}

impl TerrainHost for HeightfieldTerrain {
    fn set_resolution(&mut self, width: usize, depth: usize, size: Vec3) {
        self.heights = Grid::new(width, depth);
        self.size = size;
    }

    fn size(&self) -> Vec3 {
        self.size
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_heights(&mut self, heights: &Grid) {
        let (w, d) = self.heights.size();
        if heights.size() != (w, d) {
            debug!(
                "Resizing heightmap from {}x{} to {}x{}.",
                w,
                d,
                heights.width(),
                heights.depth()
            );
        }
        self.heights = Grid::from_fn(heights.width(), heights.depth(), |x, z| {
            heights.get(x, z).clamp(0.0, 1.0)
        });
    }

    fn set_layers(&mut self, layers: &[LayerId]) {
        self.layers = layers.to_vec();
    }

    fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    fn set_prototypes(&mut self, prototypes: &[PrefabId]) {
        self.prototypes = prototypes.to_vec();
        self.tree_instances
            .retain(|t| t.prototype_index().is_some_and(|i| i < prototypes.len()));
    }

    fn prototypes(&self) -> &[PrefabId] {
        &self.prototypes
    }

    fn clear_tree_instances(&mut self) {
        self.tree_instances.clear();
    }

    fn add_tree_instances(&mut self, instances: Vec<PlacementRecord>) {
        self.tree_instances.extend(instances);
        self.flushes += 1;
    }

    fn spawn_detail(&mut self, record: PlacementRecord) {
        self.details.push(record);
    }

    fn alphamap_resolution(&self) -> (usize, usize) {
        self.alphamap_resolution
    }

    fn set_alphamap(&mut self, alphamap: AlphaMap) {
        self.alphamap = Some(alphamap);
    }

    fn sample_height(&self, world_position: Vec3) -> f32 {
        let (w, d) = self.heights.size();
        if w == 0 || d == 0 || self.size.x <= 0.0 || self.size.z <= 0.0 {
            return self.position.y;
        }
        let local = world_position - self.position;
        let gx = local.x / self.size.x * w as f32;
        let gz = local.z / self.size.z * d as f32;
        self.position.y + self.heights.sample_bilinear(gx, gz) * self.size.y
    }

    fn steepness(&self, x: usize, z: usize) -> f32 {
        let (w, d) = self.heights.size();
        if w == 0 || d == 0 {
            return 0.0;
        }
        steepness_degrees(&self.heights, self.scale(), x.min(w - 1), z.min(d - 1))
    }
}
