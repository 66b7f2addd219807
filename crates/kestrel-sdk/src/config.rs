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

//! Serde-backed game configuration.
//!
//! A [`GameConfig`] describes the data side of a game: the level, the pools
//! and how their objects are placed, the spawn schedule and match timings.
//! What pooled objects are made of is code (pool templates) and is supplied
//! to [`crate::GameWorldBuilder`] separately.
//!
//! Spawn rules and match timings are configured with the runtime types
//! themselves, [`SpawnRule`] and [`MatchTimings`], which are serde-ready.

use std::collections::BTreeSet;

use kestrel_agents::spawn::{
    EdgePlacer, FixedPlacer, LevelEdge, OriginPlacer, RandomPlacer, RingPlacer, SpawnPlacement,
    SpawnPlacer, SpawnRule,
};
use kestrel_core::math::Vec3;
use kestrel_data::level::Level;
use kestrel_data::pool::PoolId;
use kestrel_lanes::flow_lane::MatchTimings;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The whole data-driven part of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed of the spawn placement generator.
    pub seed: u64,
    /// The play area.
    pub level: LevelConfig,
    /// The object pools.
    pub pools: Vec<PoolConfig>,
    /// Periodic spawns while a match is being played.
    pub spawn_rules: Vec<SpawnRule>,
    /// Durations of the match phases.
    pub timings: MatchTimings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            level: LevelConfig::default(),
            pools: Vec::new(),
            spawn_rules: Vec::new(),
            timings: MatchTimings::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration of `pool`, if any.
    pub fn pool(&self, pool: PoolId) -> Option<&PoolConfig> {
        self.pools.iter().find(|p| p.id == pool)
    }

    /// Checks everything serde cannot.
    ///
    /// The level must have a positive finite size, pool ids must be unique and
    /// pools non-empty, spawn rules must target a configured pool with a
    /// positive interval and wave size, and match timings must not be negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level.validate()?;

        let mut seen = BTreeSet::new();
        for pool in &self.pools {
            if !seen.insert(pool.id) {
                return Err(invalid(format!("pool {} is configured twice", pool.id)));
            }
            pool.validate()?;
        }

        for rule in &self.spawn_rules {
            if !seen.contains(&rule.pool) {
                return Err(invalid(format!("spawn rule targets unknown pool {}", rule.pool)));
            }
            if !(rule.interval.is_finite() && rule.interval > 0.0) {
                return Err(invalid(format!(
                    "spawn rule for pool {} needs a positive interval, got {}",
                    rule.pool, rule.interval
                )));
            }
            if rule.amount == 0 {
                return Err(invalid(format!("spawn rule for pool {} spawns nothing", rule.pool)));
            }
            if rule.initial_delay < 0.0 {
                return Err(invalid(format!(
                    "spawn rule for pool {} has a negative initial delay",
                    rule.pool
                )));
            }
        }

        let t = &self.timings;
        let durations = [t.warmup, t.countdown, t.respawn_delay, t.restart_delay.unwrap_or(0.0)];
        if durations.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(invalid("match timings must be finite and non-negative".into()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Size of a level centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Extent along x.
    pub width: f32,
    /// Extent along y.
    pub height: f32,
}

impl LevelConfig {
    /// Builds the level.
    pub fn to_level(&self) -> Level {
        Level::centered(self.width, self.height)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(invalid(format!(
                "level must have a positive size, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

/// One pool of recycled objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// The pool id commands refer to.
    pub id: PoolId,
    /// How many objects the pool preallocates.
    pub size: usize,
    /// Where spawned objects appear.
    #[serde(default)]
    pub placement: PlacementConfig,
}

impl PoolConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(invalid(format!("pool {} must have a non-zero size", self.id)));
        }
        let margin = match self.placement {
            PlacementConfig::Random { margin } | PlacementConfig::Edge { margin, .. } => margin,
            PlacementConfig::Ring { radius, .. } => radius,
            PlacementConfig::Origin | PlacementConfig::Fixed(_) => 0.0,
        };
        if !margin.is_finite() || margin < 0.0 {
            return Err(invalid(format!("pool {} has a negative placement distance", self.id)));
        }
        Ok(())
    }
}

/// Where a pool's objects are placed when spawned.
///
/// Each variant maps onto one of the spawn placers of the agents layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PlacementConfig {
    /// At the command's origin, or the level center without one.
    #[default]
    Origin,
    /// Always at the same point.
    Fixed(Vec3),
    /// Uniformly inside the level, `margin` away from the edges.
    Random {
        /// Distance kept from the edges.
        margin: f32,
    },
    /// Along one level edge.
    Edge {
        /// Which edge.
        edge: LevelEdge,
        /// Distance kept from the corners.
        margin: f32,
    },
    /// Evenly spread over a circle, one slot per object of the wave.
    Ring {
        /// Circle center.
        center: Vec3,
        /// Circle radius.
        radius: f32,
    },
}

impl SpawnPlacer for PlacementConfig {
    fn place(&self, placement: &SpawnPlacement<'_>, rng: &mut StdRng) -> Vec3 {
        match *self {
            Self::Origin => OriginPlacer {
                fallback: placement.level.bounds().center(),
            }
            .place(placement, rng),
            Self::Fixed(at) => FixedPlacer(at).place(placement, rng),
            Self::Random { margin } => RandomPlacer::new(margin).place(placement, rng),
            Self::Edge { edge, margin } => EdgePlacer::new(edge, margin).place(placement, rng),
            Self::Ring { center, radius } => RingPlacer { center, radius }.place(placement, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(id: u32, size: usize) -> PoolConfig {
        PoolConfig {
            id: PoolId(id),
            size,
            placement: PlacementConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_pool_is_rejected() {
        let config = GameConfig {
            pools: vec![pool(1, 4), pool(1, 8)],
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rule_needs_a_known_pool_and_positive_interval() {
        let mut config = GameConfig {
            pools: vec![pool(1, 4)],
            spawn_rules: vec![SpawnRule::every(PoolId(2), 1.0)],
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        config.spawn_rules = vec![SpawnRule::every(PoolId(1), 0.0)];
        assert!(config.validate().is_err());

        config.spawn_rules = vec![SpawnRule::every(PoolId(1), 0.5)];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_sized_pool_and_flat_level_are_rejected() {
        let empty_pool = GameConfig {
            pools: vec![pool(1, 0)],
            ..GameConfig::default()
        };
        let flat_level = GameConfig {
            level: LevelConfig {
                width: 10.0,
                height: 0.0,
            },
            ..GameConfig::default()
        };
        assert!(empty_pool.validate().is_err());
        assert!(flat_level.validate().is_err());
    }
}
