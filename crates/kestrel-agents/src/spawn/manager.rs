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

use std::any::Any;
use std::collections::HashMap;

use kestrel_core::{EntityId, Logger};
use kestrel_data::ecs::TransformComponent;
use kestrel_data::pool::PoolId;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{NoopInitializer, SpawnInitializer, SpawnPlacement, SpawnPlacer};
use crate::command::{Command, CommandKind, Manager, ManagerContext, SpawnContext};

/// How entities of one pool are placed and initialized when spawned.
pub struct SpawnProfile {
    placer: Box<dyn SpawnPlacer>,
    initializer: Box<dyn SpawnInitializer>,
}

impl SpawnProfile {
    /// A profile with both strategies.
    pub fn new(
        placer: impl SpawnPlacer + 'static,
        initializer: impl SpawnInitializer + 'static,
    ) -> Self {
        Self {
            placer: Box::new(placer),
            initializer: Box::new(initializer),
        }
    }

    /// A profile that only places.
    pub fn placed(placer: impl SpawnPlacer + 'static) -> Self {
        Self::new(placer, NoopInitializer)
    }
}

/// A queued spawn, derived from a [`Command::Spawn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// The pool to draw from.
    pub pool: PoolId,
    /// How many entities to acquire.
    pub amount: u32,
    /// Placement hints.
    pub context: SpawnContext,
}

/// A queued despawn, derived from a [`Command::Despawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DespawnRequest {
    /// The entity to release.
    pub entity: EntityId,
    /// Explicit pool, if known.
    pub pool: Option<PoolId>,
}

/// Counters of the last [`SpawnManager`] flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnFlushStats {
    /// Entities acquired.
    pub spawned: u32,
    /// Entities released.
    pub despawned: u32,
    /// Spawns dropped because the pool was exhausted.
    pub truncated: u32,
    /// Requests that referenced an unknown pool or an entity that was not active.
    pub dropped: u32,
}

/// Applies spawn and despawn commands to the object pools.
///
/// Every flush releases all queued despawns before acquiring anything, so an
/// entity freed this frame can be reused by a spawn of the same frame.
pub struct SpawnManager {
    spawns: Vec<SpawnRequest>,
    despawns: Vec<DespawnRequest>,
    profiles: HashMap<PoolId, SpawnProfile>,
    rng: StdRng,
    logger: Logger,
    last_stats: SpawnFlushStats,
}

impl SpawnManager {
    /// Creates a manager whose strategies draw from a generator seeded with `seed`.
    pub fn new(seed: u64, logger: Logger) -> Self {
        Self {
            spawns: Vec::new(),
            despawns: Vec::new(),
            profiles: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            logger,
            last_stats: SpawnFlushStats::default(),
        }
    }

    /// Sets the profile used for `pool`, replacing any previous one.
    pub fn set_profile(&mut self, pool: PoolId, profile: SpawnProfile) {
        self.profiles.insert(pool, profile);
    }

    /// Builder form of [`SpawnManager::set_profile`].
    #[must_use]
    pub fn with_profile(mut self, pool: PoolId, profile: SpawnProfile) -> Self {
        self.set_profile(pool, profile);
        self
    }

    /// Whether `pool` has a profile.
    #[must_use]
    pub fn has_profile(&self, pool: PoolId) -> bool {
        self.profiles.contains_key(&pool)
    }

    /// Queued spawns, in arrival order.
    pub fn pending_spawns(&self) -> &[SpawnRequest] {
        &self.spawns
    }

    /// Queued despawns, in arrival order.
    pub fn pending_despawns(&self) -> &[DespawnRequest] {
        &self.despawns
    }

    /// Counters of the last flush.
    #[must_use]
    pub fn last_flush_stats(&self) -> SpawnFlushStats {
        self.last_stats
    }
}

impl Manager for SpawnManager {
    fn name(&self) -> &'static str {
        "SpawnManager"
    }

    fn accepts(&self) -> &'static [CommandKind] {
        &[CommandKind::Spawn, CommandKind::Despawn]
    }

    fn submit(&mut self, command: Command) {
        match command {
            Command::Spawn(spawn) => self.spawns.push(SpawnRequest {
                pool: spawn.pool,
                amount: spawn.amount,
                context: spawn.context,
            }),
            Command::Despawn(despawn) => self.despawns.push(DespawnRequest {
                entity: despawn.entity,
                pool: despawn.pool,
            }),
            other => self
                .logger
                .trace(format_args!("Ignoring {:?} command", other.kind())),
        }
    }

    fn flush(&mut self, ctx: &mut ManagerContext<'_>) {
        let mut stats = SpawnFlushStats::default();

        // --- Despawns first ---
        for request in self.despawns.drain(..) {
            let Some(pool_id) = ctx.pools.resolve(ctx.world, request.entity, request.pool) else {
                self.logger.trace(format_args!(
                    "Despawn of {} dropped: no pool owns it",
                    request.entity
                ));
                stats.dropped += 1;
                continue;
            };

            let released = match ctx.pools.get_mut(pool_id) {
                Some(pool) => pool.release(ctx.world, request.entity),
                None => false,
            };
            if released {
                stats.despawned += 1;
            } else {
                self.logger.trace(format_args!(
                    "Despawn of {} ignored: not active in {}",
                    request.entity, pool_id
                ));
                stats.dropped += 1;
            }
        }

        // --- Then spawns ---
        for request in self.spawns.drain(..) {
            let Some(pool) = ctx.pools.get_mut(request.pool) else {
                self.logger
                    .debug(format_args!("Spawn dropped: {} is not registered", request.pool));
                stats.dropped += 1;
                continue;
            };
            let profile = self.profiles.get(&request.pool);

            for index in 0..request.amount {
                let Some(entity) = pool.acquire(ctx.world) else {
                    let missing = request.amount - index;
                    self.logger.trace(format_args!(
                        "{} exhausted, {} spawn(s) truncated",
                        request.pool, missing
                    ));
                    stats.truncated += missing;
                    break;
                };
                stats.spawned += 1;

                let placement = SpawnPlacement {
                    level: ctx.level,
                    context: &request.context,
                    index,
                    amount: request.amount,
                };
                let position = match profile {
                    Some(profile) => Some(profile.placer.place(&placement, &mut self.rng)),
                    None => request.context.origin,
                };
                if let Some(position) = position {
                    if let Some(transform) = ctx.world.get_mut::<TransformComponent>(entity) {
                        transform.set_translation(position);
                    }
                }
                if let Some(profile) = profile {
                    if let Some(mut object) = ctx.world.game_object_mut(entity) {
                        profile
                            .initializer
                            .initialize(&mut object, &placement, &mut self.rng);
                    }
                }
            }
        }

        if stats != SpawnFlushStats::default() {
            self.logger.debug(format_args!(
                "Flushed: {} spawned, {} despawned, {} truncated, {} dropped",
                stats.spawned, stats.despawned, stats.truncated, stats.dropped
            ));
        }
        self.last_stats = stats;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DespawnCommand, SpawnCommand};
    use crate::spawn::FixedPlacer;
    use kestrel_core::math::Vec3;
    use kestrel_data::ecs::{GameObjectMut, World};
    use kestrel_data::level::Level;
    use kestrel_data::pool::PoolRegistry;
    use kestrel_data::score::ScoreBoard;
    use kestrel_data::session::Session;
    use kestrel_data::EcsError;

    fn transform_template(object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
        object.attach(TransformComponent::default())?;
        Ok(())
    }

    struct Fixture {
        world: World,
        pools: PoolRegistry,
        session: Session,
        scores: ScoreBoard,
        level: Level,
        logger: Logger,
    }

    impl Fixture {
        fn new(pool_size: usize) -> Self {
            let mut world = World::new();
            let mut pools = PoolRegistry::new();
            pools
                .create_pool(&mut world, PoolId(0), pool_size, &transform_template)
                .expect("create pool");
            Self {
                world,
                pools,
                session: Session::new(),
                scores: ScoreBoard::new(),
                level: Level::default(),
                logger: Logger::disabled(),
            }
        }

        fn flush(&mut self, manager: &mut SpawnManager) {
            let mut ctx = ManagerContext {
                world: &mut self.world,
                pools: &mut self.pools,
                session: &mut self.session,
                scores: &mut self.scores,
                level: &self.level,
                logger: &self.logger,
            };
            manager.flush(&mut ctx);
        }
    }

    #[test]
    fn test_spawn_beyond_capacity_is_truncated() {
        // --- 1. ARRANGE ---
        let mut fixture = Fixture::new(2);
        let mut manager = SpawnManager::new(0, Logger::disabled());
        manager.submit(SpawnCommand::new(PoolId(0), 5).into());

        // --- 2. ACT ---
        fixture.flush(&mut manager);

        // --- 3. ASSERT ---
        let stats = manager.last_flush_stats();
        assert_eq!(stats.spawned, 2);
        assert_eq!(stats.truncated, 3);
        assert_eq!(fixture.pools.get(PoolId(0)).map(|p| p.active_count()), Some(2));
        assert!(manager.pending_spawns().is_empty());
    }

    #[test]
    fn test_profile_places_spawned_entities() {
        let mut fixture = Fixture::new(1);
        let mut manager = SpawnManager::new(0, Logger::disabled()).with_profile(
            PoolId(0),
            SpawnProfile::placed(FixedPlacer(Vec3::new(4.0, -2.0, 0.0))),
        );
        manager.submit(SpawnCommand::new(PoolId(0), 1).into());

        fixture.flush(&mut manager);

        let entity = fixture.pools.get(PoolId(0)).expect("pool").active()[0];
        let transform = fixture
            .world
            .get::<TransformComponent>(entity)
            .expect("transform");
        assert_eq!(transform.translation(), Vec3::new(4.0, -2.0, 0.0));
    }

    #[test]
    fn test_origin_is_used_without_profile() {
        let mut fixture = Fixture::new(1);
        let mut manager = SpawnManager::new(0, Logger::disabled());
        manager.submit(
            SpawnCommand::new(PoolId(0), 1)
                .at(Vec3::new(1.0, 1.0, 0.0))
                .into(),
        );

        fixture.flush(&mut manager);

        let entity = fixture.pools.get(PoolId(0)).expect("pool").active()[0];
        assert_eq!(
            fixture.world.get::<TransformComponent>(entity).map(|t| t.translation()),
            Some(Vec3::new(1.0, 1.0, 0.0))
        );
    }

    #[test]
    fn test_unknown_pool_and_double_despawn_are_dropped() {
        let mut fixture = Fixture::new(1);
        let mut manager = SpawnManager::new(0, Logger::disabled());
        manager.submit(SpawnCommand::new(PoolId(0), 1).into());
        fixture.flush(&mut manager);
        let entity = fixture.pools.get(PoolId(0)).expect("pool").active()[0];

        manager.submit(DespawnCommand::new(entity).into());
        manager.submit(DespawnCommand::new(entity).into());
        manager.submit(SpawnCommand::new(PoolId(9), 1).into());
        fixture.flush(&mut manager);

        let stats = manager.last_flush_stats();
        assert_eq!(stats.despawned, 1);
        assert_eq!(stats.dropped, 2);
        assert!(fixture.pools.get(PoolId(0)).expect("pool").is_inactive(entity));
    }
}
