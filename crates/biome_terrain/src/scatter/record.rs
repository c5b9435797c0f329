//! Placement records handed to the terrain host.
use glam::{Quat, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::biome::PrefabId;

/// What a placement instantiates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementSource {
    /// Index into the host's foliage prototype list.
    Prototype(usize),
    /// A detail prefab instantiated on its own.
    Prefab(PrefabId),
}

/// A single placed object.
///
/// Foliage records ([`PlacementSource::Prototype`]) use terrain-local normalized
/// coordinates: `x` and `z` in `[0, 1]` of the terrain size and `y` as a fraction of its
/// maximum height. Detail records ([`PlacementSource::Prefab`]) use world coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub source: PlacementSource,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl PlacementRecord {
    /// A foliage instance with unit width and height scale.
    pub fn tree(prototype: usize, normalized_position: Vec3) -> Self {
        Self {
            source: PlacementSource::Prototype(prototype),
            position: normalized_position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// A detail prop rotated `yaw_degrees` around the up axis.
    pub fn prop(prefab: impl Into<PrefabId>, world_position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            source: PlacementSource::Prefab(prefab.into()),
            position: world_position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
            scale: Vec3::ONE,
        }
    }

    pub fn prototype_index(&self) -> Option<usize> {
        match self.source {
            PlacementSource::Prototype(i) => Some(i),
            PlacementSource::Prefab(_) => None,
        }
    }

    pub fn prefab(&self) -> Option<&PrefabId> {
        match &self.source {
            PlacementSource::Prefab(id) => Some(id),
            PlacementSource::Prototype(_) => None,
        }
    }
}
