//! Scalar fields: dense grids, noise synthesis and slope measurement.
pub mod grid;
pub mod steepness;
pub mod synthesis;

pub use grid::{ElevationGrid, Grid, MoistureGrid};
pub use steepness::{gradient, steepness_degrees, HeightfieldScale};
pub use synthesis::{synthesize, FieldSynthesizer, DEFAULT_MOISTURE_OFFSET};
