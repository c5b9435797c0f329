//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Only
//! whole-pipeline preconditions surface as errors: invalid configuration and malformed
//! catalogs. Per-cell lookup failures (missing biome definitions, missing layers) are
//! reported as warnings through [`crate::events`] and never abort a run.
use thiserror::Error;

use crate::biome::BiomeId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("biome rule table is empty")]
    EmptyRuleTable,

    #[error("biome catalog has no biome definitions")]
    EmptyCatalog,

    #[error("biome '{id}' is defined more than once")]
    DuplicateBiome { id: BiomeId },

    #[error("biome '{id}' has {field} = {value}, expected a value in [0, 1]")]
    InvalidDensity {
        id: BiomeId,
        field: &'static str,
        value: f32,
    },
}
