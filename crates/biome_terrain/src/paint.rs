//! Surface layer painting.
//!
//! The painter resamples the native elevation and moisture grids onto the alphamap
//! resolution by nearest-neighbor lookup, reclassifies each alphamap cell and writes a
//! one-hot weight vector. Cells steeper than the cliff threshold are forced onto the
//! Mountain biome's layer when one is configured.
use tracing::debug;

use crate::biome::{BiomeCatalog, BiomeId, LayerId};
use crate::events::{CatalogWarnings, EventSink, Stage};
use crate::field::Grid;

/// Per-cell layer weights at alphamap resolution.
///
/// Weights are stored cell-major: the `layers` weights of cell `(x, z)` are contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMap {
    width: usize,
    height: usize,
    layers: usize,
    data: Vec<f32>,
}

impl AlphaMap {
    /// All-zero alphamap.
    pub fn new(width: usize, height: usize, layers: usize) -> Self {
        Self {
            width,
            height,
            layers,
            data: vec![0.0; width * height * layers],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn layer_count(&self) -> usize {
        self.layers
    }

    #[inline]
    fn offset(&self, x: usize, z: usize) -> usize {
        (z * self.width + x) * self.layers
    }

    /// Layer weights of cell `(x, z)`.
    pub fn weights(&self, x: usize, z: usize) -> &[f32] {
        let start = self.offset(x, z);
        &self.data[start..start + self.layers]
    }

    /// Weight of `layer` at cell `(x, z)`.
    pub fn weight(&self, x: usize, z: usize, layer: usize) -> f32 {
        self.data[self.offset(x, z) + layer]
    }

    /// Put the full weight of cell `(x, z)` on `layer`.
    pub fn set_one_hot(&mut self, x: usize, z: usize, layer: usize) {
        let start = self.offset(x, z);
        let cell = &mut self.data[start..start + self.layers];
        cell.fill(0.0);
        cell[layer] = 1.0;
    }

    /// Index of the layer holding the weight of cell `(x, z)`, or `None` for an unpainted
    /// cell.
    pub fn dominant_layer(&self, x: usize, z: usize) -> Option<usize> {
        self.weights(x, z).iter().position(|w| *w > 0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Counters for one painting run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Cells that received a layer.
    pub painted: usize,
    /// Cells left at zero weight (no biome definition or missing layer).
    pub unclassified: usize,
    /// Cells painted with the cliff layer because of their steepness.
    pub cliff_overrides: usize,
}

/// Paints biome layers onto an alphamap.
pub struct SurfacePainter<'a> {
    catalog: &'a BiomeCatalog,
    layers: &'a [LayerId],
    cliff_threshold: f32,
    cliff_layer: Option<usize>,
}

impl<'a> SurfacePainter<'a> {
    /// `layers` is the host's layer list; its order defines the alphamap channels.
    /// `cliff_threshold` is in degrees.
    pub fn new(catalog: &'a BiomeCatalog, layers: &'a [LayerId], cliff_threshold: f32) -> Self {
        let cliff_layer = catalog
            .find(BiomeId::Mountain)
            .and_then(|m| layers.iter().position(|l| *l == m.layer));
        Self {
            catalog,
            layers,
            cliff_threshold,
            cliff_layer,
        }
    }

    /// Channel used for cliffs, if the Mountain biome and its layer are configured.
    pub fn cliff_layer(&self) -> Option<usize> {
        self.cliff_layer
    }

    /// Paint an `alpha_width` x `alpha_height` alphamap.
    ///
    /// `steepness` returns the slope in degrees at a native grid cell.
    pub fn paint(
        &self,
        elevation: &Grid,
        moisture: &Grid,
        alpha_width: usize,
        alpha_height: usize,
        steepness: impl Fn(usize, usize) -> f32,
        sink: &mut dyn EventSink,
    ) -> (AlphaMap, PaintStats) {
        debug_assert_eq!(elevation.size(), moisture.size());
        let (width, depth) = elevation.size();
        let mut alphamap = AlphaMap::new(alpha_width, alpha_height, self.layers.len());
        let mut stats = PaintStats::default();
        if width == 0 || depth == 0 {
            return (alphamap, stats);
        }
        let mut warnings = CatalogWarnings::new(Stage::Painting);

        for az in 0..alpha_height {
            let z = (az * depth / alpha_height).min(depth - 1);
            for ax in 0..alpha_width {
                let x = (ax * width / alpha_width).min(width - 1);
                let biome = self.catalog.classify(elevation.get(x, z), moisture.get(x, z));
                let Some(definition) = self.catalog.find(biome) else {
                    warnings.missing_biome(biome, sink);
                    stats.unclassified += 1;
                    continue;
                };

                let mut layer = self.layers.iter().position(|l| *l == definition.layer);
                if layer.is_none() {
                    warnings.missing_layer(biome, &definition.layer, sink);
                }
                if let Some(cliff) = self.cliff_layer {
                    if steepness(x, z) > self.cliff_threshold {
                        if layer != Some(cliff) {
                            stats.cliff_overrides += 1;
                        }
                        layer = Some(cliff);
                    }
                }

                match layer {
                    Some(index) => {
                        alphamap.set_one_hot(ax, az, index);
                        stats.painted += 1;
                    }
                    None => stats.unclassified += 1,
                }
            }
        }

        debug!(
            "Painted {}x{} alphamap: {} cells, {} cliffs, {} unclassified.",
            alpha_width, alpha_height, stats.painted, stats.cliff_overrides, stats.unclassified
        );
        (alphamap, stats)
    }
}
