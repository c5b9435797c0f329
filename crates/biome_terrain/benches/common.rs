use std::time::Duration;

use biome_terrain::prelude::*;
use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Six-biome catalog resembling a typical island setup.
pub fn island_catalog() -> BiomeCatalog {
    BiomeCatalog::new(
        BiomeRules::new(vec![
            BiomeRule::new(BiomeId::Desert, (0.0, 0.25), (0.0, 0.4)),
            BiomeRule::new(BiomeId::Swamp, (0.0, 0.25), (0.6, 1.0)),
            BiomeRule::new(BiomeId::Plains, (0.0, 0.4), (0.0, 1.0)),
            BiomeRule::new(BiomeId::Forest, (0.4, 0.6), (0.0, 1.0)),
            BiomeRule::new(BiomeId::Mountain, (0.6, 0.85), (0.0, 1.0)),
            BiomeRule::new(BiomeId::SnowyMountain, (0.85, 10.0), (0.0, 1.0)),
        ]),
        vec![
            BiomeDefinition::new(BiomeId::Desert, "sand").with_details(["cactus"], 0.02),
            BiomeDefinition::new(BiomeId::Swamp, "mud").with_foliage(["willow"], 0.3),
            BiomeDefinition::new(BiomeId::Plains, "grass")
                .with_foliage(["oak"], 0.1)
                .with_details(["flower", "pebble"], 0.05),
            BiomeDefinition::new(BiomeId::Forest, "moss")
                .with_foliage(["oak", "pine", "birch"], 0.7)
                .with_details(["fern"], 0.08),
            BiomeDefinition::new(BiomeId::Mountain, "rock").with_details(["boulder"], 0.03),
            BiomeDefinition::new(BiomeId::SnowyMountain, "snow").with_foliage(["pine"], 0.05),
        ],
    )
}
