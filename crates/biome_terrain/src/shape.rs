//! Elevation shaping: biome-conditioned adjustment and island edge raising.
//!
//! Per cell, the biome is classified from the raw synthesized sample and the same raw
//! sample is then adjusted for that biome. Edge raising runs afterwards as a separate
//! full-grid pass.
use tracing::debug;

use crate::biome::{BiomeId, BiomeRules};
use crate::field::Grid;

/// Baseline that plains and forests are pulled toward.
pub const FLAT_BASELINE: f32 = 0.3;
/// Fraction of the distance to [`FLAT_BASELINE`] removed for flat biomes.
pub const FLATTEN_FACTOR: f32 = 0.6;
/// Exponent lifting mountain mid-range elevations.
pub const MOUNTAIN_EXPONENT: f32 = 0.9;
/// Width of the raised rim as a fraction of the smaller grid dimension.
pub const EDGE_WIDTH_FRACTION: f32 = 0.1;
/// Default height added at the very border.
pub const DEFAULT_EDGE_HEIGHT: f32 = 5.0;

/// Adjust a raw height for the biome it was classified as.
pub fn adjust_for_biome(height: f32, biome: BiomeId) -> f32 {
    match biome {
        BiomeId::Plains | BiomeId::Forest => height + (FLAT_BASELINE - height) * FLATTEN_FACTOR,
        BiomeId::Mountain => height.powf(MOUNTAIN_EXPONENT),
        _ => height,
    }
}

/// Classify every cell of the raw elevation and write back its biome-adjusted height.
pub fn shape_field(elevation: &mut Grid, moisture: &Grid, rules: &BiomeRules) {
    debug_assert_eq!(elevation.size(), moisture.size());
    let (width, depth) = elevation.size();
    let mut adjusted = 0usize;
    for z in 0..depth {
        for x in 0..width {
            let raw = elevation.get(x, z);
            let biome = rules.classify(raw, moisture.get(x, z));
            let height = adjust_for_biome(raw, biome);
            if height != raw {
                adjusted += 1;
            }
            elevation.set(x, z, height);
        }
    }
    debug!("Biome adjustment changed {} of {} cells.", adjusted, width * depth);
}

/// Edge factor in `[0, 1]` for a cell: `0` on the border, `1` once the cell is at least
/// `edge_width` cells away from every edge.
pub fn edge_factor(x: usize, z: usize, width: usize, depth: usize, edge_width: f32) -> f32 {
    if edge_width <= 0.0 {
        return 1.0;
    }
    let dx = x.min(width - x - 1) as f32;
    let dz = z.min(depth - z - 1) as f32;
    let fx = (dx / edge_width).clamp(0.0, 1.0);
    let fz = (dz / edge_width).clamp(0.0, 1.0);
    fx.min(fz)
}

/// Raise elevation linearly toward the map border, producing an island rim.
pub fn raise_edges(elevation: &mut Grid, edge_height: f32) {
    let (width, depth) = elevation.size();
    let edge_width = width.min(depth) as f32 * EDGE_WIDTH_FRACTION;
    for z in 0..depth {
        for x in 0..width {
            let factor = edge_factor(x, z, width, depth, edge_width);
            if factor < 1.0 {
                let h = elevation.get(x, z);
                elevation.set(x, z, h + edge_height * (1.0 - factor));
            }
        }
    }
}
