// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use kestrel_core::math::{Vec3, TAU};
use kestrel_data::level::Level;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::command::SpawnContext;

/// What a placement strategy knows about the entity being spawned.
#[derive(Debug, Clone, Copy)]
pub struct SpawnPlacement<'a> {
    /// The play area.
    pub level: &'a Level,
    /// Hints carried by the spawn command.
    pub context: &'a SpawnContext,
    /// Position of this entity within its request, starting at 0.
    pub index: u32,
    /// How many entities the request asked for.
    pub amount: u32,
}

/// Decides where a freshly acquired entity appears.
pub trait SpawnPlacer {
    /// Returns the spawn position.
    fn place(&self, placement: &SpawnPlacement<'_>, rng: &mut StdRng) -> Vec3;
}

/// Uniformly random inside the level, kept `margin` away from every edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RandomPlacer {
    /// Distance kept from the level edges.
    pub margin: f32,
}

impl RandomPlacer {
    /// A random placer with the given edge margin.
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }
}

impl SpawnPlacer for RandomPlacer {
    fn place(&self, placement: &SpawnPlacement<'_>, rng: &mut StdRng) -> Vec3 {
        let area = placement.level.bounds().inset_xy(self.margin);
        Vec3::new(
            rng.random_range(area.min.x..=area.max.x),
            rng.random_range(area.min.y..=area.max.y),
            area.center().z,
        )
    }
}

/// Always the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPlacer(pub Vec3);

impl SpawnPlacer for FixedPlacer {
    fn place(&self, _placement: &SpawnPlacement<'_>, _rng: &mut StdRng) -> Vec3 {
        self.0
    }
}

/// The origin carried by the command, e.g. a ship's muzzle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OriginPlacer {
    /// Used when the command has no origin.
    pub fallback: Vec3,
}

impl SpawnPlacer for OriginPlacer {
    fn place(&self, placement: &SpawnPlacement<'_>, _rng: &mut StdRng) -> Vec3 {
        placement.context.origin.unwrap_or(self.fallback)
    }
}

/// A side of the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelEdge {
    /// The maximum-y side.
    #[default]
    Top,
    /// The minimum-y side.
    Bottom,
    /// The minimum-x side.
    Left,
    /// The maximum-x side.
    Right,
    /// One of the four, picked at random for every entity.
    Any,
}

/// A random point along one edge of the level, `margin` inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgePlacer {
    /// The edge to spawn on.
    pub edge: LevelEdge,
    /// Distance kept inside the edge.
    pub margin: f32,
}

impl EdgePlacer {
    /// An edge placer for `edge`.
    pub fn new(edge: LevelEdge, margin: f32) -> Self {
        Self { edge, margin }
    }
}

impl SpawnPlacer for EdgePlacer {
    fn place(&self, placement: &SpawnPlacement<'_>, rng: &mut StdRng) -> Vec3 {
        let area = placement.level.bounds().inset_xy(self.margin);
        let edge = match self.edge {
            LevelEdge::Any => match rng.random_range(0..4) {
                0 => LevelEdge::Top,
                1 => LevelEdge::Bottom,
                2 => LevelEdge::Left,
                _ => LevelEdge::Right,
            },
            edge => edge,
        };

        let z = area.center().z;
        match edge {
            LevelEdge::Top | LevelEdge::Bottom => {
                let x = rng.random_range(area.min.x..=area.max.x);
                let y = if edge == LevelEdge::Top { area.max.y } else { area.min.y };
                Vec3::new(x, y, z)
            }
            _ => {
                let y = rng.random_range(area.min.y..=area.max.y);
                let x = if edge == LevelEdge::Right { area.max.x } else { area.min.x };
                Vec3::new(x, y, z)
            }
        }
    }
}

/// Evenly spaced on a circle around the command origin (or `center`).
///
/// Useful for bursts: entity `i` of `n` sits at angle `i / n` of a full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPlacer {
    /// Used when the command has no origin.
    pub center: Vec3,
    /// Distance from the center.
    pub radius: f32,
}

impl SpawnPlacer for RingPlacer {
    fn place(&self, placement: &SpawnPlacement<'_>, _rng: &mut StdRng) -> Vec3 {
        let center = placement.context.origin.unwrap_or(self.center);
        let amount = placement.amount.max(1) as f32;
        let angle = TAU * placement.index as f32 / amount;
        center + Vec3::new(angle.cos(), angle.sin(), 0.0) * self.radius
    }
}
