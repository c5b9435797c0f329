#![forbid(unsafe_code)]

mod rendering;
mod setup;

pub use rendering::{
    biome_color, init_tracing, render_alphamap_to_png, render_biomes_to_png,
    render_grid_to_png, render_placements_to_png, RenderConfig,
};
pub use setup::{load_island_setup, IslandSetup};
