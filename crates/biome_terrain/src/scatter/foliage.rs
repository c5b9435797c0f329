//! Coarse foliage pass.
use glam::Vec3;
use tracing::debug;

use super::{PassStats, PlacementRecord, ScatterContext};
use crate::biome::PrototypeTable;
use crate::events::{CatalogWarnings, EventSink, GenerationEvent, GenerationEventKind, Stage};
use crate::sampling::{cell_rng, pick_index, rand01, range_i32, StageTag, StrideGrid};
use crate::terrain::TerrainHost;

/// Distance in cells between foliage sample points; also the skipped border.
pub const FOLIAGE_STRIDE: usize = 5;
/// Exclusive upper bound of the per-axis integer jitter in cells.
pub const FOLIAGE_JITTER: i32 = 3;

/// Place large foliage on a coarse grid and commit all instances in one bulk write.
pub fn place_foliage<H: TerrainHost + ?Sized>(
    ctx: &ScatterContext<'_>,
    prototypes: &PrototypeTable,
    host: &mut H,
    sink: &mut dyn EventSink,
) -> PassStats {
    let (width, depth) = ctx.elevation.size();
    let size = host.size();
    let base = host.position();
    let mut warnings = CatalogWarnings::new(Stage::Foliage);
    let mut stats = PassStats::default();
    let mut instances: Vec<PlacementRecord> = Vec::new();

    for (x, z) in StrideGrid::new(FOLIAGE_STRIDE).points(width, depth) {
        stats.evaluated += 1;
        let biome = ctx
            .catalog
            .classify(ctx.elevation.get(x, z), ctx.moisture.get(x, z));
        let Some(definition) = ctx.catalog.find(biome) else {
            warnings.missing_biome(biome, sink);
            stats.missing_biome += 1;
            continue;
        };
        let indices = prototypes.indices_for(biome);
        if definition.foliage.is_empty() || indices.is_empty() {
            continue;
        }

        let mut rng = cell_rng(ctx.seed, x, z, StageTag::Foliage);
        if rand01(&mut rng) >= definition.foliage_density {
            continue;
        }

        let gx = x as f32 + range_i32(&mut rng, 0, FOLIAGE_JITTER) as f32;
        let gz = z as f32 + range_i32(&mut rng, 0, FOLIAGE_JITTER) as f32;
        let world = ctx.grid_to_world(host, gx, gz);
        let height = host.sample_height(world) - base.y;
        let normalized = Vec3::new(
            gx / width as f32,
            if size.y > 0.0 { height / size.y } else { 0.0 },
            gz / depth as f32,
        );

        let Some(pick) = pick_index(&mut rng, indices.len()) else {
            continue;
        };
        let record = PlacementRecord::tree(indices[pick], normalized);
        if sink.wants(GenerationEventKind::PlacementMade) {
            sink.send(GenerationEvent::PlacementMade {
                stage: Stage::Foliage,
                record: record.clone(),
            });
        }
        instances.push(record);
    }

    stats.placed = instances.len();
    host.add_tree_instances(instances);
    debug!(
        "Foliage pass: {} points, {} placed, {} without biome definition.",
        stats.evaluated, stats.placed, stats.missing_biome
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeCatalog, BiomeDefinition, BiomeId};
    use crate::events::VecSink;
    use crate::scatter::test_support::{flat, forest, host_for, single_biome};
    use crate::terrain::HeightfieldTerrain;

    fn run(catalog: &BiomeCatalog, seed: u64) -> (PassStats, HeightfieldTerrain) {
        let elevation = flat(64, 48, 0.5);
        let moisture = flat(64, 48, 0.5);
        let mut host = host_for(&elevation);
        let table = PrototypeTable::build(catalog);
        let ctx = ScatterContext::new(&elevation, &moisture, catalog, seed);
        let stats = place_foliage(&ctx, &table, &mut host, &mut ());
        (stats, host)
    }

    #[test]
    fn full_density_places_one_record_per_sample_point() {
        let catalog = single_biome(forest(1.0, 0.0));
        let (stats, host) = run(&catalog, 12345);
        let expected = StrideGrid::new(FOLIAGE_STRIDE).points(64, 48).len();
        assert_eq!(expected, 11 * 8);
        assert_eq!(stats.evaluated, expected);
        assert_eq!(stats.placed, expected);
        assert_eq!(host.tree_instances().len(), expected);
    }

    #[test]
    fn full_density_never_drops_a_point_whatever_the_seed() {
        let catalog = single_biome(forest(1.0, 0.0));
        let table = PrototypeTable::build(&catalog);
        let elevation = flat(20, 20, 0.5);
        let moisture = flat(20, 20, 0.5);
        // 12091463 starts the (5, 5) stream with a draw in the top 128 values of u32.
        for seed in (0..64).chain([12091463]) {
            let mut host = host_for(&elevation);
            let ctx = ScatterContext::new(&elevation, &moisture, &catalog, seed);
            let stats = place_foliage(&ctx, &table, &mut host, &mut ());
            assert_eq!(stats.placed, stats.evaluated, "seed {seed}");
        }
    }

    #[test]
    fn zero_density_places_nothing_but_still_flushes_once() {
        let catalog = single_biome(forest(0.0, 0.0));
        let (stats, host) = run(&catalog, 1);
        assert_eq!(stats.placed, 0);
        assert_eq!(host.flushes(), 1);
    }

    #[test]
    fn positions_are_normalized_with_bounded_jitter() {
        let catalog = single_biome(forest(1.0, 0.0));
        let (_, host) = run(&catalog, 77);
        for tree in host.tree_instances() {
            let gx = (tree.position.x * 64.0).round();
            let gz = (tree.position.z * 48.0).round();
            let jx = gx - (gx / 5.0).floor() * 5.0;
            let jz = gz - (gz / 5.0).floor() * 5.0;
            assert!(jx < 3.0 && jz < 3.0, "jitter ({jx}, {jz})");
            assert!((tree.position.y - 0.5).abs() < 1e-5);
            assert!(tree.prototype_index().is_some_and(|i| i < 2));
        }
    }

    #[test]
    fn same_seed_reproduces_placements() {
        let catalog = single_biome(forest(0.4, 0.0));
        let (_, a) = run(&catalog, 9);
        let (_, b) = run(&catalog, 9);
        assert_eq!(a.tree_instances(), b.tree_instances());
        let (_, c) = run(&catalog, 10);
        assert_ne!(a.tree_instances(), c.tree_instances());
    }

    #[test]
    fn biome_without_foliage_is_skipped() {
        let catalog = single_biome(BiomeDefinition::new(BiomeId::Desert, "sand"));
        let (stats, host) = run(&catalog, 3);
        assert_eq!(stats.placed, 0);
        assert!(host.tree_instances().is_empty());
    }

    #[test]
    fn missing_biome_definition_warns_once_and_continues() {
        let mut catalog = single_biome(forest(1.0, 0.0));
        catalog.biomes[0].id = BiomeId::Swamp;
        let elevation = flat(32, 32, 0.5);
        let moisture = flat(32, 32, 0.5);
        let mut host = host_for(&elevation);
        let table = PrototypeTable::build(&catalog);
        let ctx = ScatterContext::new(&elevation, &moisture, &catalog, 5);
        let mut sink = VecSink::new();
        let stats = place_foliage(&ctx, &table, &mut host, &mut sink);
        assert_eq!(stats.placed, 0);
        assert_eq!(stats.missing_biome, stats.evaluated);
        let warnings = sink
            .as_slice()
            .iter()
            .filter(|e| matches!(e, GenerationEvent::MissingBiome { biome: BiomeId::Forest, .. }))
            .count();
        assert_eq!(warnings, 1);
    }
}
