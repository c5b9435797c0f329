//! Dense detail-prop pass.
use tracing::debug;

use super::{PassStats, PlacementRecord, ScatterContext};
use crate::events::{CatalogWarnings, EventSink, GenerationEvent, GenerationEventKind, Stage};
use crate::sampling::{cell_rng, pick_index, rand01, range_f32, StageTag};
use crate::terrain::TerrainHost;

/// Cells at or below this normalized elevation never receive detail props.
pub const DETAIL_MIN_HEIGHT: f32 = 0.2;
/// Half-width of the per-axis jitter in cells.
pub const DETAIL_JITTER: f32 = 1.0;

/// Visit every cell and instantiate detail props immediately on the host.
pub fn place_details<H: TerrainHost + ?Sized>(
    ctx: &ScatterContext<'_>,
    host: &mut H,
    sink: &mut dyn EventSink,
) -> PassStats {
    let (width, depth) = ctx.elevation.size();
    let mut warnings = CatalogWarnings::new(Stage::Details);
    let mut stats = PassStats::default();

    for x in 0..width {
        for z in 0..depth {
            stats.evaluated += 1;
            let mut rng = cell_rng(ctx.seed, x, z, StageTag::Detail);
            let jx = range_f32(&mut rng, -DETAIL_JITTER, DETAIL_JITTER);
            let jz = range_f32(&mut rng, -DETAIL_JITTER, DETAIL_JITTER);

            let height = ctx.elevation.get(x, z);
            let biome = ctx.catalog.classify(height, ctx.moisture.get(x, z));
            let Some(definition) = ctx.catalog.find(biome) else {
                warnings.missing_biome(biome, sink);
                stats.missing_biome += 1;
                continue;
            };
            if definition.details.is_empty() || height <= DETAIL_MIN_HEIGHT {
                continue;
            }
            if rand01(&mut rng) >= definition.detail_density {
                continue;
            }
            let Some(pick) = pick_index(&mut rng, definition.details.len()) else {
                continue;
            };
            let yaw = range_f32(&mut rng, 0.0, 360.0);

            let gx = (x as f32 + jx).clamp(0.0, width as f32);
            let gz = (z as f32 + jz).clamp(0.0, depth as f32);
            let mut world = ctx.grid_to_world(host, gx, gz);
            world.y = host.sample_height(world);

            let record = PlacementRecord::prop(definition.details[pick].clone(), world, yaw);
            if sink.wants(GenerationEventKind::PlacementMade) {
                sink.send(GenerationEvent::PlacementMade {
                    stage: Stage::Details,
                    record: record.clone(),
                });
            }
            host.spawn_detail(record);
            stats.placed += 1;
        }
    }

    debug!(
        "Detail pass: {} cells, {} placed, {} without biome definition.",
        stats.evaluated, stats.placed, stats.missing_biome
    );
    stats
}
