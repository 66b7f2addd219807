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

//! The `GameWorld` facade: sole owner of everything a frame mutates.

use std::any::type_name;

use kestrel_agents::command::CommitReport;
use kestrel_agents::{Command, CommandBuffer, CommandDispatcher, ManagerContext};
use kestrel_core::scene::{SceneGraph, SceneNodeId};
use kestrel_core::{EntityId, Logger};
use kestrel_data::ecs::{SceneNodeComponent, World};
use kestrel_data::level::Level;
use kestrel_data::pool::PoolRegistry;
use kestrel_data::score::{ScoreBoard, ScorePoolId};
use kestrel_data::session::Session;
use kestrel_data::EcsError;

use crate::ConfigError;

/// The world, its pools, the session, scores, the scene graph and the
/// command plumbing, owned together.
///
/// Systems only ever see a borrowed slice of it through an update context.
/// Managers see another slice while the dispatcher flushes. Applications
/// usually get one from [`crate::GameWorldBuilder`].
pub struct GameWorld {
    pub(crate) world: World,
    pub(crate) pools: PoolRegistry,
    pub(crate) session: Session,
    pub(crate) scores: ScoreBoard,
    pub(crate) level: Level,
    pub(crate) scene: SceneGraph,
    pub(crate) dispatcher: CommandDispatcher,
    pub(crate) commands: CommandBuffer,
    pub(crate) logger: Logger,
}

impl GameWorld {
    /// An empty game world with no pools and no managers.
    pub fn new(level: Level, logger: Logger) -> Self {
        Self {
            world: World::new(),
            pools: PoolRegistry::new(),
            session: Session::new(),
            scores: ScoreBoard::new(),
            level,
            scene: SceneGraph::new(),
            dispatcher: CommandDispatcher::new(logger.scoped("dispatch")),
            commands: CommandBuffer::new(),
            logger,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────

    /// The entity store.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The object pools.
    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    /// Game and match state, frame counter and clocks.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Score pools.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Current total of one score pool, 0 if nothing was scored yet.
    pub fn score(&self, pool: ScorePoolId) -> i64 {
        self.scores.total(pool)
    }

    /// The play area.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The scene graph rendering reads from.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The dispatcher and its managers.
    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Commands queued for the next commit.
    pub fn pending_commands(&self) -> &CommandBuffer {
        &self.commands
    }

    /// The root logger of this world.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    // ─────────────────────────────────────────────────────────────────────
    // Setup-time mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Direct access to the entity store, e.g. to create non-pooled objects
    /// such as the player.
    ///
    /// Structural changes to pooled objects belong in commands.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Direct access to the scene graph.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Direct access to the dispatcher, e.g. to register extra managers.
    pub fn dispatcher_mut(&mut self) -> &mut CommandDispatcher {
        &mut self.dispatcher
    }

    /// Creates a scene node under `parent` and links `entity` to it.
    pub fn link_scene_node(
        &mut self,
        entity: EntityId,
        parent: Option<SceneNodeId>,
    ) -> Result<SceneNodeId, ConfigError> {
        if !self.world.is_alive(entity) {
            return Err(EcsError::EntityNotFound(entity).into());
        }
        if self.world.has::<SceneNodeComponent>(entity) {
            return Err(EcsError::ComponentAlreadyAttached {
                entity,
                component: type_name::<SceneNodeComponent>(),
            }
            .into());
        }
        let node = self.scene.add_node(parent).ok_or_else(|| {
            ConfigError::Invalid(format!("scene node parent {parent:?} does not exist"))
        })?;
        self.world.attach(entity, SceneNodeComponent::new(node))?;
        Ok(node)
    }

    /// Links every object of every pool to a fresh root scene node.
    ///
    /// Objects that already have a node are skipped. Returns how many were linked.
    pub fn link_pooled_scene_nodes(&mut self) -> Result<usize, ConfigError> {
        let members: Vec<EntityId> = self
            .pools
            .iter()
            .flat_map(|pool| pool.members())
            .filter(|&entity| !self.world.has::<SceneNodeComponent>(entity))
            .collect();
        for &entity in &members {
            self.link_scene_node(entity, None)?;
        }
        Ok(members.len())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────

    /// Queues a command for the next commit.
    pub fn push(&mut self, command: impl Into<Command>) {
        self.commands.add(command);
    }

    /// Routes every queued command to its manager and flushes the managers
    /// in registration order.
    pub fn commit(&mut self) -> CommitReport {
        let mut ctx = ManagerContext {
            world: &mut self.world,
            pools: &mut self.pools,
            session: &mut self.session,
            scores: &mut self.scores,
            level: &self.level,
            logger: &self.logger,
        };
        self.dispatcher.commit(&mut self.commands, &mut ctx)
    }
}
