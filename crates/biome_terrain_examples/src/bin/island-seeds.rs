use biome_terrain::prelude::*;
use biome_terrain_examples::{init_tracing, render_grid_to_png, RenderConfig};

/// Synthesizes and shapes elevation for a few seeds without a terrain host.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let rules = BiomeRules::new(vec![
        BiomeRule::new(BiomeId::Plains, (0.0, 0.4), (0.0, 1.0)),
        BiomeRule::new(BiomeId::Forest, (0.4, 0.6), (0.0, 1.0)),
        BiomeRule::new(BiomeId::Mountain, (0.6, 10.0), (0.0, 1.0)),
    ]);
    let config = RenderConfig::new(2);

    for seed in [1, 42, 12345] {
        let synthesizer = FieldSynthesizer::new(seed, 100.0);
        let (mut elevation, moisture) = synthesizer.synthesize(128, 128, 20.0);
        shape_field(&mut elevation, &moisture, &rules);
        raise_edges(&mut elevation, 1.0);
        render_grid_to_png(&elevation, &config, format!("island-seed-{seed}.png"))?;
    }

    Ok(())
}
