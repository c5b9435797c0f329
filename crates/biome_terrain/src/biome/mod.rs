//! Biomes: identifiers, classification rules, catalog definitions and the shared
//! foliage prototype table.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod prototype;
pub mod rule;

pub use catalog::{BiomeCatalog, BiomeDefinition, LayerId, PrefabId};
pub use prototype::PrototypeTable;
pub use rule::{classify, BiomeMap, BiomeRule, BiomeRules};

/// Terrain category assigned to a cell from its height and moisture.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeId {
    Desert,
    Plains,
    Forest,
    Swamp,
    Mountain,
    SnowyMountain,
}

impl BiomeId {
    pub const ALL: [BiomeId; 6] = [
        BiomeId::Desert,
        BiomeId::Plains,
        BiomeId::Forest,
        BiomeId::Swamp,
        BiomeId::Mountain,
        BiomeId::SnowyMountain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BiomeId::Desert => "Desert",
            BiomeId::Plains => "Plains",
            BiomeId::Forest => "Forest",
            BiomeId::Swamp => "Swamp",
            BiomeId::Mountain => "Mountain",
            BiomeId::SnowyMountain => "SnowyMountain",
        }
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
