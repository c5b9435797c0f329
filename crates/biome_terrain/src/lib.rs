#![forbid(unsafe_code)]
//! biome_terrain: Seeded island terrain generation with rule-based biomes.
//!
//! Modules:
//! - field: dense grids, layered noise synthesis of elevation and moisture, steepness
//! - biome: biome ids, ordered classification rules, catalog and foliage prototype table
//! - shape: biome-conditioned height adjustment and island edge raising
//! - paint: one-hot surface layer alphamap with cliff override
//! - sampling: per-cell seeded random streams and the coarse stride grid
//! - scatter: foliage and detail placement passes
//! - terrain: the host interface the pipeline writes into, plus an in-memory host
//! - pipeline: configuration and the end-to-end generator
//!
//! For examples and docs, see README and docs.rs.
pub mod biome;
pub mod error;
pub mod events;
pub mod field;
pub mod paint;
pub mod pipeline;
pub mod sampling;
pub mod scatter;
pub mod shape;
pub mod terrain;

/// Convenient re-exports for common types. Import with `use biome_terrain::prelude::*;`.
pub mod prelude {
    pub use crate::biome::{
        classify, BiomeCatalog, BiomeDefinition, BiomeId, BiomeMap, BiomeRule, BiomeRules,
        LayerId, PrefabId, PrototypeTable,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink, Stage, VecSink,
    };
    pub use crate::field::{
        steepness_degrees, synthesize, ElevationGrid, FieldSynthesizer, Grid, HeightfieldScale,
        MoistureGrid,
    };
    pub use crate::paint::{AlphaMap, PaintStats, SurfacePainter};
    pub use crate::pipeline::{GeneratedStats, GeneratedWorld, GeneratorConfig, WorldGenerator};
    pub use crate::sampling::{seed_for_cell, StageTag, StrideGrid};
    pub use crate::scatter::{
        place_details, place_foliage, PassStats, PlacementRecord, PlacementSource,
        ScatterContext, ScatterStats,
    };
    pub use crate::shape::{adjust_for_biome, raise_edges, shape_field};
    pub use crate::terrain::{HeightfieldTerrain, TerrainHost};
}
