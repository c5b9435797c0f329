//! End-to-end generation: configuration, the stage sequence and the run report.
use glam::Vec3;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::biome::{BiomeCatalog, BiomeMap, PrototypeTable};
use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent, GenerationEventKind, Stage};
use crate::field::{ElevationGrid, FieldSynthesizer, MoistureGrid, DEFAULT_MOISTURE_OFFSET};
use crate::paint::{AlphaMap, PaintStats, SurfacePainter};
use crate::scatter::{place_details, place_foliage, ScatterContext, ScatterStats};
use crate::shape::{raise_edges, shape_field, DEFAULT_EDGE_HEIGHT};
use crate::terrain::TerrainHost;

/// Scalar parameters of a generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Seeds the noise fields and every scatter stream.
    pub seed: i32,
    /// Heightmap cells along `x`.
    pub width: usize,
    /// Heightmap cells along `z`.
    pub depth: usize,
    /// World-space height of a normalized elevation of `1.0`.
    pub max_height: f32,
    /// Noise zoom; larger values produce broader features.
    pub scale: f32,
    /// Slope in degrees above which the cliff layer is painted.
    pub cliff_threshold: f32,
    /// Noise-space offset separating the moisture field from elevation.
    pub moisture_offset: f32,
    /// Height added at the map border by edge raising.
    pub edge_height: f32,
    /// Alphamap resolution of terrains created for this config.
    pub alphamap_resolution: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            width: 256,
            depth: 256,
            max_height: 20.0,
            scale: 20.0,
            cliff_threshold: 30.0,
            moisture_offset: DEFAULT_MOISTURE_OFFSET,
            edge_height: DEFAULT_EDGE_HEIGHT,
            alphamap_resolution: 256,
        }
    }
}

impl GeneratorConfig {
    /// Creates a default configuration with the given seed.
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the heightmap resolution.
    pub fn with_size(mut self, width: usize, depth: usize) -> Self {
        self.width = width;
        self.depth = depth;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the cliff threshold in degrees.
    pub fn with_cliff_threshold(mut self, degrees: f32) -> Self {
        self.cliff_threshold = degrees;
        self
    }

    pub fn with_moisture_offset(mut self, offset: f32) -> Self {
        self.moisture_offset = offset;
        self
    }

    pub fn with_edge_height(mut self, edge_height: f32) -> Self {
        self.edge_height = edge_height;
        self
    }

    pub fn with_alphamap_resolution(mut self, resolution: usize) -> Self {
        self.alphamap_resolution = resolution;
        self
    }

    /// World-space size handed to the host (`x` width, `y` max height, `z` depth).
    pub fn world_size(&self) -> Vec3 {
        Vec3::new(self.width as f32, self.max_height, self.depth as f32)
    }

    /// Base seed of the scatter streams.
    pub fn scatter_seed(&self) -> u64 {
        self.seed as i64 as u64
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(Error::InvalidConfig("width and depth must be > 0".into()));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidConfig("scale must be finite and > 0".into()));
        }
        if !self.max_height.is_finite() || self.max_height <= 0.0 {
            return Err(Error::InvalidConfig(
                "max_height must be finite and > 0".into(),
            ));
        }
        if self.alphamap_resolution == 0 {
            return Err(Error::InvalidConfig(
                "alphamap_resolution must be > 0".into(),
            ));
        }
        if self.cliff_threshold.is_nan() || self.cliff_threshold < 0.0 {
            return Err(Error::InvalidConfig("cliff_threshold must be >= 0".into()));
        }
        if !self.moisture_offset.is_finite() || !self.edge_height.is_finite() {
            return Err(Error::InvalidConfig(
                "moisture_offset and edge_height must be finite".into(),
            ));
        }

        Ok(())
    }
}

/// Aggregated counters of a run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratedStats {
    pub paint: PaintStats,
    pub scatter: ScatterStats,
}

/// Everything a run produced, kept for inspection after the host has been written.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    /// Final elevation after shaping; may exceed `1.0` near the border.
    pub elevation: ElevationGrid,
    pub moisture: MoistureGrid,
    /// Biome of every native cell, classified from the final elevation.
    pub biomes: BiomeMap,
    pub alphamap: AlphaMap,
    pub stats: GeneratedStats,
}

/// Runs the full generation sequence against a terrain host.
pub struct WorldGenerator {
    config: GeneratorConfig,
    catalog: BiomeCatalog,
}

impl WorldGenerator {
    /// Creates a generator after checking the configuration and the catalog.
    pub fn try_new(config: GeneratorConfig, catalog: BiomeCatalog) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self { config, catalog })
    }

    /// Creates a generator without validation; [`Self::generate`] still fails fast on
    /// invalid input.
    pub fn new(config: GeneratorConfig, catalog: BiomeCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BiomeCatalog {
        &self.catalog
    }

    /// Generates a world into `host`.
    pub fn generate<H: TerrainHost + ?Sized>(&self, host: &mut H) -> Result<GeneratedWorld> {
        self.generate_with_events(host, &mut ())
    }

    /// Generates a world into `host`, reporting progress and warnings to `sink`.
    pub fn generate_with_events<H: TerrainHost + ?Sized>(
        &self,
        host: &mut H,
        sink: &mut dyn EventSink,
    ) -> Result<GeneratedWorld> {
        let config = &self.config;
        let catalog = &self.catalog;
        config.validate()?;
        catalog.validate()?;
        let (alpha_width, alpha_height) = host.alphamap_resolution();
        if alpha_width == 0 || alpha_height == 0 {
            return Err(Error::InvalidConfig(
                "host alphamap resolution must be > 0".into(),
            ));
        }

        info!(
            "Generating {}x{} terrain with seed {}.",
            config.width, config.depth, config.seed
        );
        if sink.wants(GenerationEventKind::RunStarted) {
            sink.send(GenerationEvent::RunStarted {
                config: config.clone(),
                rule_count: catalog.rules.len(),
                biome_count: catalog.biomes.len(),
            });
        }

        host.clear_tree_instances();
        let layers = catalog.layers();
        host.set_layers(&layers);

        let synthesizer = FieldSynthesizer::new(config.seed, config.moisture_offset);
        let (mut elevation, moisture) =
            synthesizer.synthesize(config.width, config.depth, config.scale);
        stage_finished(Stage::Synthesis, sink);

        shape_field(&mut elevation, &moisture, &catalog.rules);
        raise_edges(&mut elevation, config.edge_height);
        host.set_resolution(config.width, config.depth, config.world_size());
        host.set_heights(&elevation);
        stage_finished(Stage::Shaping, sink);

        let prototypes = PrototypeTable::build(catalog);
        host.set_prototypes(prototypes.prototypes());
        debug!("Registered {} foliage prototypes.", prototypes.len());

        let painter = SurfacePainter::new(catalog, &layers, config.cliff_threshold);
        let (alphamap, paint) = painter.paint(
            &elevation,
            &moisture,
            alpha_width,
            alpha_height,
            |x, z| host.steepness(x, z),
            sink,
        );
        host.set_alphamap(alphamap.clone());
        stage_finished(Stage::Painting, sink);

        let ctx = ScatterContext::new(&elevation, &moisture, catalog, config.scatter_seed());
        let foliage = place_foliage(&ctx, &prototypes, &mut *host, sink);
        stage_finished(Stage::Foliage, sink);
        let details = place_details(&ctx, &mut *host, sink);
        stage_finished(Stage::Details, sink);

        let stats = GeneratedStats {
            paint,
            scatter: ScatterStats { foliage, details },
        };
        info!(
            "Generation finished: {} trees, {} details, {} cliff cells.",
            foliage.placed, details.placed, paint.cliff_overrides
        );
        if sink.wants(GenerationEventKind::RunFinished) {
            sink.send(GenerationEvent::RunFinished { stats });
        }

        let biomes = catalog.rules.classify_grid(&elevation, &moisture);
        Ok(GeneratedWorld {
            elevation,
            moisture,
            biomes,
            alphamap,
            stats,
        })
    }
}

fn stage_finished(stage: Stage, sink: &mut dyn EventSink) {
    debug!("Stage {} finished.", stage);
    if sink.wants(GenerationEventKind::StageFinished) {
        sink.send(GenerationEvent::StageFinished { stage });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeDefinition, BiomeId, BiomeRule, BiomeRules};
    use crate::events::VecSink;
    use crate::field::synthesize;
    use crate::sampling::StrideGrid;
    use crate::scatter::FOLIAGE_STRIDE;
    use crate::terrain::HeightfieldTerrain;

    fn island_catalog() -> BiomeCatalog {
        BiomeCatalog::new(
            BiomeRules::new(vec![
                BiomeRule::new(BiomeId::Desert, (0.0, 0.25), (0.0, 0.4)),
                BiomeRule::new(BiomeId::Swamp, (0.0, 0.25), (0.6, 1.0)),
                BiomeRule::new(BiomeId::Plains, (0.0, 0.4), (0.0, 1.0)),
                BiomeRule::new(BiomeId::Forest, (0.4, 0.6), (0.0, 1.0)),
                BiomeRule::new(BiomeId::Mountain, (0.6, 0.85), (0.0, 1.0)),
                BiomeRule::new(BiomeId::SnowyMountain, (0.85, 100.0), (0.0, 1.0)),
            ]),
            vec![
                BiomeDefinition::new(BiomeId::Desert, "sand").with_details(["cactus"], 0.02),
                BiomeDefinition::new(BiomeId::Swamp, "mud").with_foliage(["willow"], 0.3),
                BiomeDefinition::new(BiomeId::Plains, "grass")
                    .with_foliage(["oak"], 0.1)
                    .with_details(["flower", "rock"], 0.05),
                BiomeDefinition::new(BiomeId::Forest, "moss")
                    .with_foliage(["oak", "pine"], 0.6)
                    .with_details(["fern"], 0.1),
                BiomeDefinition::new(BiomeId::Mountain, "rock").with_details(["boulder"], 0.03),
                BiomeDefinition::new(BiomeId::SnowyMountain, "snow").with_foliage(["pine"], 0.05),
            ],
        )
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(12345)
            .with_size(64, 64)
            .with_alphamap_resolution(32)
    }

    fn run(config: &GeneratorConfig, catalog: BiomeCatalog) -> (GeneratedWorld, HeightfieldTerrain) {
        let mut host = HeightfieldTerrain::for_config(config);
        let world = WorldGenerator::try_new(config.clone(), catalog)
            .and_then(|g| g.generate(&mut host))
            .expect("generation succeeds");
        (world, host)
    }

    #[test]
    fn default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 12345);
        assert_eq!((config.width, config.depth), (256, 256));
        assert_eq!(config.cliff_threshold, 30.0);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        for config in [
            GeneratorConfig::default().with_size(0, 10),
            GeneratorConfig::default().with_scale(0.0),
            GeneratorConfig::default().with_max_height(f32::NAN),
            GeneratorConfig::default().with_alphamap_resolution(0),
            GeneratorConfig::default().with_cliff_threshold(-1.0),
        ] {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn negative_seed_maps_to_distinct_scatter_seed() {
        assert_eq!(GeneratorConfig::new(1).scatter_seed(), 1);
        assert_eq!(GeneratorConfig::new(-1).scatter_seed(), u64::MAX);
    }

    #[test]
    fn empty_rule_table_fails_before_touching_host() {
        let mut catalog = island_catalog();
        catalog.rules = BiomeRules::default();
        let generator = WorldGenerator::new(config(), catalog);
        let mut host = HeightfieldTerrain::for_config(generator.config());
        let err = generator.generate(&mut host).unwrap_err();
        assert!(matches!(err, Error::EmptyRuleTable));
        assert!(host.layers().is_empty());
        assert!(host.heights().is_empty());
    }

    #[test]
    fn empty_catalog_and_zero_size_are_fatal() {
        let catalog = BiomeCatalog::new(island_catalog().rules, Vec::new());
        assert!(matches!(
            WorldGenerator::try_new(config(), catalog),
            Err(Error::EmptyCatalog)
        ));
        assert!(matches!(
            WorldGenerator::try_new(config().with_size(0, 0), island_catalog()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn host_without_alphamap_is_rejected() {
        let generator = WorldGenerator::new(config(), island_catalog());
        let mut host = HeightfieldTerrain::new(0, 0);
        assert!(matches!(
            generator.generate(&mut host),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn runs_are_reproducible() {
        let (a, host_a) = run(&config(), island_catalog());
        let (b, host_b) = run(&config(), island_catalog());
        assert_eq!(a.elevation, b.elevation);
        assert_eq!(a.moisture, b.moisture);
        assert_eq!(a.alphamap, b.alphamap);
        assert_eq!(a.stats, b.stats);
        assert_eq!(host_a.tree_instances(), host_b.tree_instances());
        assert_eq!(host_a.details(), host_b.details());
    }

    #[test]
    fn host_receives_layers_heights_and_prototypes() {
        let config = config();
        let (world, host) = run(&config, island_catalog());
        assert_eq!(host.layers().len(), 6);
        assert_eq!(host.heights().size(), (64, 64));
        assert_eq!(host.size(), Vec3::new(64.0, 20.0, 64.0));
        assert_eq!(host.prototypes(), &["willow", "oak", "pine"]);
        assert_eq!(host.alphamap(), Some(&world.alphamap));
        assert_eq!(host.flushes(), 1);
        assert_eq!(world.biomes.size(), (64, 64));
        assert_eq!(world.stats.scatter.foliage.placed, host.tree_instances().len());
        assert_eq!(world.stats.scatter.details.placed, host.details().len());
    }

    #[test]
    fn border_is_raised_above_the_interior() {
        let (world, _) = run(&config(), island_catalog());
        let corner = world.elevation.get(0, 0);
        assert!(corner >= DEFAULT_EDGE_HEIGHT);
        assert!(world.elevation.get(32, 32) < corner);
    }

    #[test]
    fn fully_painted_alphamap_is_one_hot() {
        let (world, _) = run(&config(), island_catalog());
        let map = &world.alphamap;
        assert_eq!(world.stats.paint.unclassified, 0);
        for z in 0..map.height() {
            for x in 0..map.width() {
                let sum: f32 = map.weights(x, z).iter().sum();
                assert!((sum - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn low_cells_classify_as_plains_with_single_rule() {
        let rules = BiomeRules::new(vec![BiomeRule::new(
            BiomeId::Plains,
            (0.0, 0.3),
            (f32::MIN, f32::MAX),
        )])
        .with_fallback(BiomeId::Desert);
        let (elevation, moisture) = synthesize(256, 256, 20.0, 12345);
        let mut low = 0;
        for (x, z, h) in elevation.iter_cells() {
            if h <= 0.3 {
                low += 1;
                assert_eq!(rules.classify(h, moisture.get(x, z)), BiomeId::Plains);
            }
        }
        assert!(low > 0);
    }

    #[test]
    fn full_foliage_density_fills_every_stride_point() {
        let catalog = BiomeCatalog::new(
            BiomeRules::new(vec![BiomeRule::new(
                BiomeId::Forest,
                (f32::MIN, f32::MAX),
                (f32::MIN, f32::MAX),
            )]),
            vec![BiomeDefinition::new(BiomeId::Forest, "moss").with_foliage(["oak"], 1.0)],
        );
        let (world, host) = run(&config(), catalog);
        let points = StrideGrid::new(FOLIAGE_STRIDE).points(64, 64).len();
        assert_eq!(world.stats.scatter.foliage.placed, points);
        assert_eq!(host.tree_instances().len(), points);
    }

    #[test]
    fn zero_detail_density_places_no_details() {
        let mut catalog = island_catalog();
        for biome in &mut catalog.biomes {
            biome.detail_density = 0.0;
        }
        let (world, host) = run(&config(), catalog);
        assert_eq!(world.stats.scatter.details.placed, 0);
        assert!(host.details().is_empty());
    }

    #[test]
    fn zero_cliff_threshold_paints_sloped_cells_as_mountain() {
        let config = config().with_size(32, 32).with_alphamap_resolution(32);
        let (world, host) = run(&config.clone().with_cliff_threshold(0.0), island_catalog());
        let rock = host.layers().iter().position(|l| l == "rock");
        for z in 0..32 {
            for x in 0..32 {
                if host.steepness(x, z) > 0.0 {
                    assert_eq!(world.alphamap.dominant_layer(x, z), rock);
                }
            }
        }
    }

    #[test]
    fn missing_biome_is_reported_not_fatal() {
        let mut catalog = island_catalog();
        catalog.biomes.retain(|b| b.id != BiomeId::Plains);
        let generator = WorldGenerator::try_new(config(), catalog).expect("valid");
        let mut host = HeightfieldTerrain::for_config(generator.config());
        let mut sink = VecSink::without_placements();
        let world = generator
            .generate_with_events(&mut host, &mut sink)
            .expect("generation succeeds");
        assert!(world.stats.paint.unclassified > 0);
        let events = sink.into_inner();
        assert!(matches!(events.first(), Some(GenerationEvent::RunStarted { .. })));
        assert!(matches!(events.last(), Some(GenerationEvent::RunFinished { .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            GenerationEvent::MissingBiome {
                stage: Stage::Painting,
                biome: BiomeId::Plains
            }
        )));
        let stages = events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::StageFinished { .. }))
            .count();
        assert_eq!(stages, 5);
    }
}
