//! Global foliage prototype table.
//!
//! Prototypes are indexed globally and shared across biomes: a prefab listed by two
//! biomes maps to the same index. The table is an arena of prefab ids; each biome holds a
//! list of indices into it. It is rebuilt from the catalog on every run.
use std::collections::HashMap;

use super::{BiomeCatalog, BiomeId, PrefabId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrototypeTable {
    prototypes: Vec<PrefabId>,
    by_biome: HashMap<BiomeId, Vec<usize>>,
}

impl PrototypeTable {
    /// Build the table from the foliage lists of every biome, in catalog order.
    pub fn build(catalog: &BiomeCatalog) -> Self {
        let mut prototypes: Vec<PrefabId> = Vec::new();
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        let mut by_biome: HashMap<BiomeId, Vec<usize>> = HashMap::new();

        for biome in &catalog.biomes {
            let indices = by_biome.entry(biome.id).or_default();
            indices.clear();
            for prefab in &biome.foliage {
                let index = *index_of.entry(prefab.as_str()).or_insert_with(|| {
                    prototypes.push(prefab.clone());
                    prototypes.len() - 1
                });
                indices.push(index);
            }
        }

        Self {
            prototypes,
            by_biome,
        }
    }

    /// All prototypes in index order.
    pub fn prototypes(&self) -> &[PrefabId] {
        &self.prototypes
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Prototype indices usable by `biome`. Empty if the biome has no foliage.
    pub fn indices_for(&self, biome: BiomeId) -> &[usize] {
        self.by_biome.get(&biome).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, index: usize) -> Option<&PrefabId> {
        self.prototypes.get(index)
    }
}
