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

use std::collections::BTreeMap;

use kestrel_agents::score::{ScoreListener, ScoreManager};
use kestrel_agents::spawn::{NoopInitializer, SpawnInitializer, SpawnManager, SpawnProfile};
use kestrel_agents::state::{
    LoggingStateListener, MatchResetListener, StateListener, StateManager, TitleReturnListener,
};
use kestrel_core::Logger;
use kestrel_data::pool::{PoolId, PoolTemplate};
use kestrel_data::state::{GameState, MatchState};
use kestrel_data::EcsError;

use crate::{ConfigError, GameConfig, GameWorld};

/// Assembles a [`GameWorld`] from a config and the code-side pieces it
/// cannot describe: pool templates, spawn initializers and listeners.
///
/// The managers are registered in a fixed order: spawning, game state,
/// match state, scoring. Game-state changes are logged and returning to the
/// title abandons the match; entering warmup resets the match.
pub struct GameWorldBuilder {
    config: GameConfig,
    logger: Logger,
    templates: BTreeMap<PoolId, Box<dyn PoolTemplate>>,
    spawn: SpawnManager,
    game_state: StateManager<GameState>,
    match_state: StateManager<MatchState>,
    score: ScoreManager,
    initialized: Vec<PoolId>,
    link_scene_nodes: bool,
}

impl GameWorldBuilder {
    /// Starts from `config`. `logger` is the root of every scoped logger.
    pub fn new(config: GameConfig, logger: Logger) -> Self {
        let state_logger = logger.scoped("state");
        let game_logger = state_logger.scoped("game");
        let match_logger = state_logger.scoped("match");
        Self {
            spawn: SpawnManager::new(config.seed, logger.scoped("spawn")),
            game_state: StateManager::game(game_logger.clone())
                .with_listener(TitleReturnListener)
                .with_listener(LoggingStateListener::new(game_logger)),
            match_state: StateManager::match_flow(match_logger.clone())
                .with_listener(MatchResetListener)
                .with_listener(LoggingStateListener::new(match_logger)),
            score: ScoreManager::new(logger.scoped("score")),
            templates: BTreeMap::new(),
            initialized: Vec::new(),
            link_scene_nodes: false,
            config,
            logger,
        }
    }

    /// Sets what each object of `pool` is made of.
    #[must_use]
    pub fn template(mut self, pool: PoolId, template: impl PoolTemplate + 'static) -> Self {
        self.templates.insert(pool, Box::new(template));
        self
    }

    /// Sets what happens to each object of `pool` after it is placed.
    ///
    /// Placement itself comes from the pool's config.
    #[must_use]
    pub fn initializer(
        mut self,
        pool: PoolId,
        initializer: impl SpawnInitializer + 'static,
    ) -> Self {
        let placement = self.config.pool(pool).map(|p| p.placement).unwrap_or_default();
        self.spawn
            .set_profile(pool, SpawnProfile::new(placement, initializer));
        self.initialized.push(pool);
        self
    }

    /// Observes game-state changes.
    #[must_use]
    pub fn game_listener(mut self, listener: impl StateListener<GameState> + 'static) -> Self {
        self.game_state.add_listener(listener);
        self
    }

    /// Observes match-state changes.
    #[must_use]
    pub fn match_listener(mut self, listener: impl StateListener<MatchState> + 'static) -> Self {
        self.match_state.add_listener(listener);
        self
    }

    /// Observes score changes.
    #[must_use]
    pub fn score_listener(mut self, listener: impl ScoreListener + 'static) -> Self {
        self.score.add_listener(listener);
        self
    }

    /// Links every pooled object to its own root scene node.
    #[must_use]
    pub fn with_scene_nodes(mut self) -> Self {
        self.link_scene_nodes = true;
        self
    }

    /// Validates the config, fills the pools and registers the managers.
    ///
    /// Every configured pool needs a template.
    pub fn build(self) -> Result<GameWorld, ConfigError> {
        let Self {
            config,
            logger,
            templates,
            mut spawn,
            game_state,
            match_state,
            score,
            initialized,
            link_scene_nodes,
        } = self;
        config.validate()?;
        if let Some(pool) = initialized.iter().find(|id| config.pool(**id).is_none()) {
            return Err(EcsError::UnknownPool(*pool).into());
        }

        let mut game = GameWorld::new(config.level.to_level(), logger);
        for pool in &config.pools {
            let template = templates.get(&pool.id).ok_or_else(|| {
                ConfigError::Invalid(format!("pool {} has no template", pool.id))
            })?;
            game.pools
                .create_pool(&mut game.world, pool.id, pool.size, &**template)?;
            if !spawn.has_profile(pool.id) {
                spawn.set_profile(pool.id, SpawnProfile::new(pool.placement, NoopInitializer));
            }
        }
        for pool in templates.keys().filter(|id| config.pool(**id).is_none()) {
            game.logger
                .warn(format_args!("template for unconfigured pool {pool} ignored"));
        }

        game.dispatcher.register(spawn)?;
        game.dispatcher.register(game_state)?;
        game.dispatcher.register(match_state)?;
        game.dispatcher.register(score)?;

        if link_scene_nodes {
            game.link_pooled_scene_nodes()?;
        }

        game.logger.info(format_args!(
            "game world ready: {} pool(s), {} entities",
            game.pools.len(),
            game.world.len()
        ));
        Ok(game)
    }
}
