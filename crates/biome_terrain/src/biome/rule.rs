//! Ordered biome rules and classification.
//!
//! Classification is a linear scan over the rule list with inclusive bounds on height and
//! moisture; the first matching rule wins and an exhausted scan yields the fallback. It
//! is a pure function of `(height, moisture)` so it can be evaluated at the native grid
//! resolution and again on resampled alphamap coordinates.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::BiomeId;
use crate::field::Grid;

/// A single classification rule with inclusive height and moisture bounds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeRule {
    pub biome: BiomeId,
    pub min_height: f32,
    pub max_height: f32,
    pub min_moisture: f32,
    pub max_moisture: f32,
}

impl BiomeRule {
    /// Creates a rule from inclusive `(min, max)` height and moisture ranges.
    pub fn new(biome: BiomeId, height: (f32, f32), moisture: (f32, f32)) -> Self {
        Self {
            biome,
            min_height: height.0,
            max_height: height.1,
            min_moisture: moisture.0,
            max_moisture: moisture.1,
        }
    }

    /// Returns `true` if `(height, moisture)` lies within all four bounds.
    #[inline]
    pub fn matches(&self, height: f32, moisture: f32) -> bool {
        height >= self.min_height
            && height <= self.max_height
            && moisture >= self.min_moisture
            && moisture <= self.max_moisture
    }
}

/// Classify `(height, moisture)` against `rules`, returning `fallback` if none match.
pub fn classify(height: f32, moisture: f32, rules: &[BiomeRule], fallback: BiomeId) -> BiomeId {
    rules
        .iter()
        .find(|rule| rule.matches(height, moisture))
        .map(|rule| rule.biome)
        .unwrap_or(fallback)
}

/// An ordered rule table plus the biome used when no rule matches.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeRules {
    pub rules: Vec<BiomeRule>,
    #[cfg_attr(feature = "serde", serde(default = "default_fallback"))]
    pub fallback: BiomeId,
}

#[cfg(feature = "serde")]
fn default_fallback() -> BiomeId {
    BiomeId::Plains
}

impl Default for BiomeRules {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            fallback: BiomeId::Plains,
        }
    }
}

impl BiomeRules {
    pub fn new(rules: Vec<BiomeRule>) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Sets the fallback biome.
    pub fn with_fallback(mut self, fallback: BiomeId) -> Self {
        self.fallback = fallback;
        self
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: BiomeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[inline]
    pub fn classify(&self, height: f32, moisture: f32) -> BiomeId {
        classify(height, moisture, &self.rules, self.fallback)
    }

    /// Classify every cell of a pair of equally sized grids.
    pub fn classify_grid(&self, elevation: &Grid, moisture: &Grid) -> BiomeMap {
        debug_assert_eq!(elevation.size(), moisture.size());
        let (width, depth) = elevation.size();
        let mut cells = Vec::with_capacity(width * depth);
        for z in 0..depth {
            for x in 0..width {
                cells.push(self.classify(elevation.get(x, z), moisture.get(x, z)));
            }
        }
        BiomeMap {
            width,
            depth,
            cells,
        }
    }
}

/// Per-cell biome assignment at a grid's native resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeMap {
    width: usize,
    depth: usize,
    cells: Vec<BiomeId>,
}

impl BiomeMap {
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    pub fn get(&self, x: usize, z: usize) -> BiomeId {
        self.cells[z * self.width + x]
    }

    pub fn as_slice(&self) -> &[BiomeId] {
        &self.cells
    }

    /// Number of cells assigned to `biome`.
    pub fn count(&self, biome: BiomeId) -> usize {
        self.cells.iter().filter(|b| **b == biome).count()
    }
}
