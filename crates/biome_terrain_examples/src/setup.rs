use std::path::Path;

use anyhow::Context;
use biome_terrain::prelude::*;
use serde::Deserialize;

/// Generator configuration and biome catalog loaded from a RON asset.
#[derive(Debug, Clone, Deserialize)]
pub struct IslandSetup {
    #[serde(default)]
    pub config: GeneratorConfig,
    pub catalog: BiomeCatalog,
}

/// Reads and validates an [`IslandSetup`] from `path`.
pub fn load_island_setup(path: impl AsRef<Path>) -> anyhow::Result<IslandSetup> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading island setup {}", path.display()))?;
    let setup: IslandSetup =
        ron::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    setup.config.validate()?;
    setup.catalog.validate()?;
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_asset_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/island.ron");
        let setup = load_island_setup(path).expect("bundled asset is valid");
        assert_eq!(setup.catalog.biomes.len(), 6);
        assert_eq!(setup.catalog.rules.fallback, BiomeId::Plains);
        assert_eq!(setup.config.seed, 12345);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let text = r#"(
            catalog: (
                rules: (rules: [(biome: Plains, min_height: 0.0, max_height: 1.0, min_moisture: 0.0, max_moisture: 1.0)]),
                biomes: [(id: Plains, layer: "grass")],
            ),
        )"#;
        let setup: IslandSetup = ron::from_str(text).expect("valid ron");
        assert_eq!(setup.config, GeneratorConfig::default());
        assert_eq!(setup.catalog.biomes[0].foliage_density, 0.0);
    }
}
