//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect, or
//! forward events while executing [`crate::pipeline::WorldGenerator::generate`]. Recoverable
//! catalog problems (a classified biome without a definition, a biome layer missing from
//! the host) are reported here as well as through `tracing`.
use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use crate::biome::{BiomeId, LayerId};
use crate::pipeline::{GeneratedStats, GeneratorConfig};
use crate::scatter::PlacementRecord;

/// Pipeline stage that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Synthesis,
    Shaping,
    Painting,
    Foliage,
    Details,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Synthesis => "synthesis",
            Stage::Shaping => "shaping",
            Stage::Painting => "painting",
            Stage::Foliage => "foliage",
            Stage::Details => "details",
        };
        f.write_str(name)
    }
}

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once preconditions passed and grid work is about to start.
    RunStarted {
        /// The configuration used.
        config: GeneratorConfig,
        /// Number of rules in the catalog.
        rule_count: usize,
        /// Number of biome definitions in the catalog.
        biome_count: usize,
    },

    /// Emitted when the whole pipeline finishes.
    RunFinished {
        /// Aggregated counters for the run.
        stats: GeneratedStats,
    },

    /// Emitted after a stage has fully materialized its output.
    StageFinished { stage: Stage },

    /// A cell classified as a biome that has no definition in the catalog.
    /// Emitted once per stage and biome.
    MissingBiome { stage: Stage, biome: BiomeId },

    /// A biome's surface layer is not among the host's layers. Emitted once per layer.
    MissingLayer { biome: BiomeId, layer: LayerId },

    /// Emitted for every foliage or detail placement.
    PlacementMade { stage: Stage, record: PlacementRecord },
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RunStarted { .. } => GenerationEventKind::RunStarted,
            GenerationEvent::RunFinished { .. } => GenerationEventKind::RunFinished,
            GenerationEvent::StageFinished { .. } => GenerationEventKind::StageFinished,
            GenerationEvent::MissingBiome { .. } => GenerationEventKind::MissingBiome,
            GenerationEvent::MissingLayer { .. } => GenerationEventKind::MissingLayer,
            GenerationEvent::PlacementMade { .. } => GenerationEventKind::PlacementMade,
        }
    }
}

/// Discriminant of [`GenerationEvent`], used by sinks to opt out of event classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RunStarted,
    RunFinished,
    StageFinished,
    MissingBiome,
    MissingLayer,
    PlacementMade,
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Returns `false` to skip building events of `kind`.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally ignoring placements.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    skip_placements: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            skip_placements: false,
        }
    }

    /// A sink that drops [`GenerationEvent::PlacementMade`] events.
    pub fn without_placements() -> Self {
        Self {
            events: Vec::new(),
            skip_placements: true,
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.skip_placements && event.kind() == GenerationEventKind::PlacementMade {
            return;
        }
        self.events.push(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        !(self.skip_placements && kind == GenerationEventKind::PlacementMade)
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Reports recoverable catalog problems once per stage and identifier.
pub(crate) struct CatalogWarnings {
    stage: Stage,
    biomes: HashSet<BiomeId>,
    layers: HashSet<LayerId>,
}

impl CatalogWarnings {
    pub(crate) fn new(stage: Stage) -> Self {
        Self {
            stage,
            biomes: HashSet::new(),
            layers: HashSet::new(),
        }
    }

    pub(crate) fn missing_biome(&mut self, biome: BiomeId, sink: &mut dyn EventSink) {
        if !self.biomes.insert(biome) {
            return;
        }
        warn!("Could not find biome {} ({}).", biome, self.stage);
        if sink.wants(GenerationEventKind::MissingBiome) {
            sink.send(GenerationEvent::MissingBiome {
                stage: self.stage,
                biome,
            });
        }
    }

    pub(crate) fn missing_layer(&mut self, biome: BiomeId, layer: &LayerId, sink: &mut dyn EventSink) {
        if !self.layers.insert(layer.clone()) {
            return;
        }
        warn!(
            "Could not find layer '{}' of biome {} among terrain layers.",
            layer, biome
        );
        if sink.wants(GenerationEventKind::MissingLayer) {
            sink.send(GenerationEvent::MissingLayer {
                biome,
                layer: layer.clone(),
            });
        }
    }
}
