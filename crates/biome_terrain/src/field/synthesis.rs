//! Noise-driven synthesis of the elevation and moisture fields.
//!
//! Elevation is a three-octave fractal sum of Perlin noise, normalized by the weight sum
//! and then reshaped with `(e * 1.4)^2` to favour lowlands with sharper peaks. Moisture is
//! a single octave sampled at an offset coordinate so it is independent of elevation.
//!
//! The noise source is created once per [`FieldSynthesizer`] and holds no mutable state,
//! so identical inputs always reproduce bit-identical grids.
use noise::{NoiseFn, Perlin};
use tracing::debug;

use super::grid::{ElevationGrid, Grid, MoistureGrid};

/// Frequencies of the elevation octaves.
pub const OCTAVE_FREQUENCIES: [f32; 3] = [1.0, 2.0, 4.0];
/// Weights of the elevation octaves, matching [`OCTAVE_FREQUENCIES`].
pub const OCTAVE_WEIGHTS: [f32; 3] = [1.0, 0.5, 0.25];
/// Gain applied to the normalized octave sum before the power curve.
pub const ELEVATION_GAIN: f32 = 1.4;
/// Exponent of the elevation power curve.
pub const ELEVATION_EXPONENT: f32 = 2.0;
/// Default offset between the elevation and moisture sample domains.
pub const DEFAULT_MOISTURE_OFFSET: f32 = 100.0;

/// Produces elevation and moisture grids from seeded coherent noise.
#[derive(Clone, Debug)]
pub struct FieldSynthesizer {
    noise: Perlin,
    seed: i32,
    moisture_offset: f32,
}

impl FieldSynthesizer {
    /// Create a synthesizer for `seed`. The seed selects the noise permutation and is also
    /// added to both sample axes to decorrelate instances.
    pub fn new(seed: i32, moisture_offset: f32) -> Self {
        Self {
            noise: Perlin::new(seed as u32),
            seed,
            moisture_offset,
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn moisture_offset(&self) -> f32 {
        self.moisture_offset
    }

    /// Noise remapped from `[-1, 1]` to `[0, 1]`.
    #[inline]
    fn noise01(&self, x: f32, z: f32) -> f32 {
        let v = self.noise.get([x as f64, z as f64]) as f32;
        (v + 1.0) * 0.5
    }

    /// Raw elevation at continuous coordinates `(xc, zc)`.
    pub fn elevation_at(&self, xc: f32, zc: f32) -> f32 {
        let offset = self.seed as f32;
        let mut sum = 0.0;
        let mut weight_sum = 0.0;
        for (freq, weight) in OCTAVE_FREQUENCIES.iter().zip(OCTAVE_WEIGHTS.iter()) {
            sum += weight * self.noise01(freq * xc + offset, freq * zc + offset);
            weight_sum += weight;
        }
        let e = sum / weight_sum;
        (e * ELEVATION_GAIN).powf(ELEVATION_EXPONENT)
    }

    /// Moisture at continuous coordinates `(xc, zc)`.
    pub fn moisture_at(&self, xc: f32, zc: f32) -> f32 {
        let offset = self.moisture_offset + self.seed as f32;
        self.noise01(xc + offset, zc + offset)
    }

    /// Synthesize both fields for a `width` x `depth` grid at the given noise `scale`.
    pub fn synthesize(
        &self,
        width: usize,
        depth: usize,
        scale: f32,
    ) -> (ElevationGrid, MoistureGrid) {
        let coords = |x: usize, z: usize| {
            (
                x as f32 / width as f32 * scale,
                z as f32 / depth as f32 * scale,
            )
        };
        let elevation = Grid::from_fn(width, depth, |x, z| {
            let (xc, zc) = coords(x, z);
            self.elevation_at(xc, zc)
        });
        let moisture = Grid::from_fn(width, depth, |x, z| {
            let (xc, zc) = coords(x, z);
            self.moisture_at(xc, zc)
        });

        if let (Some((e_lo, e_hi)), Some((m_lo, m_hi))) = (elevation.min_max(), moisture.min_max())
        {
            debug!(
                "Synthesized {}x{} fields | elevation [{:.3}, {:.3}] | moisture [{:.3}, {:.3}].",
                width, depth, e_lo, e_hi, m_lo, m_hi
            );
        }

        (elevation, moisture)
    }
}

/// Synthesize elevation and moisture with the default moisture offset.
pub fn synthesize(width: usize, depth: usize, scale: f32, seed: i32) -> (ElevationGrid, MoistureGrid) {
    FieldSynthesizer::new(seed, DEFAULT_MOISTURE_OFFSET).synthesize(width, depth, scale)
}
