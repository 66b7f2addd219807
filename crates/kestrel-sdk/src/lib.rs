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

//! # Kestrel SDK
//!
//! The application-facing layer. A [`GameWorld`] owns everything the
//! simulation mutates, a [`GameLoop`] advances it one frame at a time, and
//! [`GameWorldBuilder`] assembles both from a serde [`GameConfig`].
//!
//! ```rust,ignore
//! let config = GameConfig::from_ron_str(&text)?;
//! let mut game = GameWorldBuilder::new(config.clone(), Logger::default())
//!     .template(ENEMIES, enemy_template)
//!     .build()?;
//! let mut game_loop = GameLoop::from_config(&config);
//!
//! loop {
//!     input = input.advance(stick, aim, buttons);
//!     game_loop.update(&mut game, &input, 1.0 / 60.0);
//! }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod config;
mod error;
mod game_loop;
mod game_world;

pub use builder::GameWorldBuilder;
pub use config::{GameConfig, LevelConfig, PlacementConfig, PoolConfig};
pub use error::ConfigError;
pub use game_loop::{is_running, GameLoop, Pass, Phase, RunCondition};
pub use game_world::GameWorld;

/// Re-exports of the types most applications touch.
pub mod prelude {
    pub use crate::{
        ConfigError, GameConfig, GameLoop, GameWorld, GameWorldBuilder, Pass, Phase,
    };
    pub use kestrel_agents::command::{
        DespawnCommand, SpawnCommand, StateCommand, UpdateScoreCommand,
    };
    pub use kestrel_agents::spawn::{MoveInitializer, SpawnRule};
    pub use kestrel_core::input::{ButtonSet, GamepadButton, InputSnapshot};
    pub use kestrel_core::math::{Vec2, Vec3};
    pub use kestrel_core::{EntityId, Logger};
    pub use kestrel_data::ecs::*;
    pub use kestrel_data::pool::PoolId;
    pub use kestrel_data::score::ScorePoolId;
    pub use kestrel_data::session::Session;
    pub use kestrel_data::state::{
        GameState, GameStateTransitionId, MatchState, MatchStateTransitionId,
    };
    pub use kestrel_data::EcsError;
    pub use kestrel_lanes::{System, UpdateContext};
}
