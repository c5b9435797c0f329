use std::path::Path;

use biome_terrain::prelude::*;
use glam::Vec3;
use image::{Rgb, RgbImage};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const UNPAINTED: [u8; 3] = [255, 0, 255];

/// Installs a console subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Output size and per-layer colors used by the renderers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pixels per grid cell.
    pub pixels_per_cell: u32,
    /// Colors of the alphamap layers, in layer order. Missing entries render gray.
    pub layer_colors: Vec<[u8; 3]>,
    pub tree_color: [u8; 3],
    pub detail_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_cell: 2,
            layer_colors: Vec::new(),
            tree_color: [20, 80, 30],
            detail_color: [240, 240, 200],
        }
    }
}

impl RenderConfig {
    pub fn new(pixels_per_cell: u32) -> Self {
        Self {
            pixels_per_cell: pixels_per_cell.max(1),
            ..Default::default()
        }
    }

    /// Colors each layer by the biome that paints it.
    pub fn with_layer_colors_from(mut self, catalog: &BiomeCatalog, layers: &[LayerId]) -> Self {
        self.layer_colors = layers
            .iter()
            .map(|layer| {
                catalog
                    .biomes
                    .iter()
                    .find(|b| &b.layer == layer)
                    .map(|b| biome_color(b.id))
                    .unwrap_or([128, 128, 128])
            })
            .collect();
        self
    }
}

/// Display color of a biome.
pub fn biome_color(biome: BiomeId) -> [u8; 3] {
    match biome {
        BiomeId::Desert => [222, 196, 132],
        BiomeId::Plains => [128, 186, 84],
        BiomeId::Forest => [46, 120, 58],
        BiomeId::Swamp => [82, 98, 60],
        BiomeId::Mountain => [130, 126, 120],
        BiomeId::SnowyMountain => [238, 242, 248],
    }
}

fn fill_cell(img: &mut RgbImage, x: usize, z: usize, ppc: u32, color: [u8; 3]) {
    let x0 = x as u32 * ppc;
    let y0 = z as u32 * ppc;
    for dy in 0..ppc {
        for dx in 0..ppc {
            img.put_pixel(x0 + dx, y0 + dy, Rgb(color));
        }
    }
}

/// Renders a scalar grid as grayscale, normalized to its own value range.
pub fn render_grid_to_png(
    grid: &Grid,
    config: &RenderConfig,
    out: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let ppc = config.pixels_per_cell;
    let (w, d) = grid.size();
    let mut img = RgbImage::new(w as u32 * ppc, d as u32 * ppc);
    let (lo, hi) = grid.min_max().unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    for (x, z, v) in grid.iter_cells() {
        let g = (((v - lo) / span).clamp(0.0, 1.0) * 255.0) as u8;
        fill_cell(&mut img, x, z, ppc, [g, g, g]);
    }
    img.save(out.as_ref())?;
    println!("Wrote {}", out.as_ref().display());
    Ok(())
}

/// Renders the native-resolution biome map.
pub fn render_biomes_to_png(
    biomes: &BiomeMap,
    config: &RenderConfig,
    out: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let ppc = config.pixels_per_cell;
    let (w, d) = biomes.size();
    let mut img = RgbImage::new(w as u32 * ppc, d as u32 * ppc);
    for z in 0..d {
        for x in 0..w {
            fill_cell(&mut img, x, z, ppc, biome_color(biomes.get(x, z)));
        }
    }
    img.save(out.as_ref())?;
    println!("Wrote {}", out.as_ref().display());
    Ok(())
}

/// Renders the dominant layer of every alphamap cell; unpainted cells are magenta.
pub fn render_alphamap_to_png(
    alphamap: &AlphaMap,
    config: &RenderConfig,
    out: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let ppc = config.pixels_per_cell;
    let (w, h) = alphamap.size();
    let mut img = RgbImage::new(w as u32 * ppc, h as u32 * ppc);
    for z in 0..h {
        for x in 0..w {
            let color = match alphamap.dominant_layer(x, z) {
                Some(layer) => config
                    .layer_colors
                    .get(layer)
                    .copied()
                    .unwrap_or([128, 128, 128]),
                None => UNPAINTED,
            };
            fill_cell(&mut img, x, z, ppc, color);
        }
    }
    img.save(out.as_ref())?;
    println!("Wrote {}", out.as_ref().display());
    Ok(())
}

/// Draws trees and detail props on top of the alphamap.
pub fn render_placements_to_png(
    terrain: &HeightfieldTerrain,
    alphamap: &AlphaMap,
    config: &RenderConfig,
    out: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let ppc = config.pixels_per_cell;
    let (w, h) = alphamap.size();
    let (img_w, img_h) = (w as u32 * ppc, h as u32 * ppc);
    let mut img = RgbImage::new(img_w, img_h);
    for z in 0..h {
        for x in 0..w {
            let color = alphamap
                .dominant_layer(x, z)
                .and_then(|layer| config.layer_colors.get(layer).copied())
                .unwrap_or(UNPAINTED);
            fill_cell(&mut img, x, z, ppc, color.map(|c| c / 2 + 64));
        }
    }

    let size = terrain.size();
    let origin = terrain.position();
    let to_pixel = |normalized: Vec3| {
        let px = (normalized.x * img_w as f32) as i64;
        let py = (normalized.z * img_h as f32) as i64;
        (px, py)
    };
    let mut dot = |px: i64, py: i64, radius: i64, color: [u8; 3]| {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (x, y) = (px + dx, py + dy);
                if x >= 0 && y >= 0 && (x as u32) < img_w && (y as u32) < img_h {
                    img.put_pixel(x as u32, y as u32, Rgb(color));
                }
            }
        }
    };

    for detail in terrain.details() {
        let local = (detail.position - origin) / size;
        let (px, py) = to_pixel(local);
        dot(px, py, 0, config.detail_color);
    }
    let tree_radius = ppc as i64 + 1;
    for tree in terrain.tree_instances() {
        let (px, py) = to_pixel(tree.position);
        dot(px, py, tree_radius, config.tree_color);
    }

    img.save(out.as_ref())?;
    println!("Wrote {}", out.as_ref().display());
    Ok(())
}
