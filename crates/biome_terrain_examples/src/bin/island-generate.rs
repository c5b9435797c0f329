use biome_terrain::prelude::*;
use biome_terrain_examples::{
    init_tracing, load_island_setup, render_alphamap_to_png, render_biomes_to_png,
    render_grid_to_png, render_placements_to_png, RenderConfig,
};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/island.ron");
    let setup = load_island_setup(path)?;
    let mut terrain = HeightfieldTerrain::for_config(&setup.config);

    // Report catalog problems and stage progress; placements are ignored.
    let mut sink = FnSink::new(|event| match event {
        GenerationEvent::MissingBiome { stage, biome } => {
            warn!("{} has no definition ({}).", biome, stage)
        }
        GenerationEvent::MissingLayer { biome, layer } => {
            warn!("Layer '{}' of {} is not configured.", layer, biome)
        }
        GenerationEvent::StageFinished { stage } => info!("Finished {}.", stage),
        _ => {}
    });

    let generator = WorldGenerator::try_new(setup.config.clone(), setup.catalog.clone())?;
    let world = generator.generate_with_events(&mut terrain, &mut sink)?;

    let scatter = world.stats.scatter;
    info!(
        "{} trees and {} details from {} evaluated points.",
        scatter.foliage.placed,
        scatter.details.placed,
        scatter.evaluated()
    );
    let cells = world.biomes.as_slice().len().max(1);
    for biome in BiomeId::ALL {
        let count = world.biomes.count(biome);
        if count > 0 {
            info!("{}: {:.1}% of cells.", biome, count as f32 * 100.0 / cells as f32);
        }
    }

    let config = RenderConfig::new(2).with_layer_colors_from(&setup.catalog, terrain.layers());
    render_grid_to_png(&world.elevation, &config, "island-elevation.png")?;
    render_grid_to_png(&world.moisture, &config, "island-moisture.png")?;
    render_biomes_to_png(&world.biomes, &config, "island-biomes.png")?;
    render_alphamap_to_png(&world.alphamap, &config, "island-alphamap.png")?;
    render_placements_to_png(&terrain, &world.alphamap, &config, "island-placements.png")?;

    Ok(())
}
