//! Biome definitions and the catalog supplied before generation.
//!
//! The catalog bundles the ordered [`BiomeRules`] with one [`BiomeDefinition`] per biome.
//! It is read-only during generation; [`BiomeCatalog::validate`] rejects catalogs that
//! would produce garbage terrain.
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{BiomeId, BiomeRules};
use crate::error::{Error, Result};

/// Identifier of a surface layer (terrain material) known to the host.
pub type LayerId = String;

/// Identifier of a placeable prefab resource.
pub type PrefabId = String;

/// Surface layer, placeable resources and densities of one biome.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct BiomeDefinition {
    pub id: BiomeId,
    /// Surface layer painted where this biome is classified.
    pub layer: LayerId,
    /// Large foliage (trees, big bushes) placed on the coarse pass.
    #[cfg_attr(feature = "serde", serde(default))]
    pub foliage: Vec<PrefabId>,
    /// Small props (rocks, shrubs) placed on the dense pass.
    #[cfg_attr(feature = "serde", serde(default))]
    pub details: Vec<PrefabId>,
    /// Probability in `[0, 1]` of placing foliage at a coarse sample point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub foliage_density: f32,
    /// Probability in `[0, 1]` of placing a detail prop at a cell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail_density: f32,
}

impl BiomeDefinition {
    pub fn new(id: BiomeId, layer: impl Into<LayerId>) -> Self {
        Self {
            id,
            layer: layer.into(),
            foliage: Vec::new(),
            details: Vec::new(),
            foliage_density: 0.0,
            detail_density: 0.0,
        }
    }

    /// Sets the foliage prefabs and their density.
    pub fn with_foliage<I, S>(mut self, prefabs: I, density: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PrefabId>,
    {
        self.foliage = prefabs.into_iter().map(Into::into).collect();
        self.foliage_density = density;
        self
    }

    /// Sets the detail prefabs and their density.
    pub fn with_details<I, S>(mut self, prefabs: I, density: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PrefabId>,
    {
        self.details = prefabs.into_iter().map(Into::into).collect();
        self.detail_density = density;
        self
    }
}

/// Rule table and biome definitions driving a generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeCatalog {
    pub rules: BiomeRules,
    pub biomes: Vec<BiomeDefinition>,
}

impl BiomeCatalog {
    pub fn new(rules: BiomeRules, biomes: Vec<BiomeDefinition>) -> Self {
        Self { rules, biomes }
    }

    /// Adds a biome definition.
    pub fn with_biome(mut self, biome: BiomeDefinition) -> Self {
        self.biomes.push(biome);
        self
    }

    /// Checks the preconditions of a generation run.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(Error::EmptyRuleTable);
        }
        if self.biomes.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(self.biomes.len());
        for biome in &self.biomes {
            if !seen.insert(biome.id) {
                return Err(Error::DuplicateBiome { id: biome.id });
            }
            for (field, value) in [
                ("foliage_density", biome.foliage_density),
                ("detail_density", biome.detail_density),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(Error::InvalidDensity {
                        id: biome.id,
                        field,
                        value,
                    });
                }
            }
        }

        Ok(())
    }

    /// Finds the definition for `id`.
    pub fn find(&self, id: BiomeId) -> Option<&BiomeDefinition> {
        self.biomes.iter().find(|b| b.id == id)
    }

    /// Classify against the catalog's rule table.
    pub fn classify(&self, height: f32, moisture: f32) -> BiomeId {
        self.rules.classify(height, moisture)
    }

    /// Surface layers in biome order, each listed once.
    pub fn layers(&self) -> Vec<LayerId> {
        let mut layers: Vec<LayerId> = Vec::with_capacity(self.biomes.len());
        for biome in &self.biomes {
            if !layers.contains(&biome.layer) {
                layers.push(biome.layer.clone());
            }
        }
        layers
    }
}
