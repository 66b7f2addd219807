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

use kestrel_core::EntityId;

use crate::ecs::{PoolMembershipComponent, World};
use crate::error::EcsError;
use crate::pool::{GameObjectPool, PoolId, PoolTemplate};

/// All pools of a game world, keyed by [`PoolId`].
///
/// Pools are kept in id order so bulk operations are deterministic.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: BTreeMap<PoolId, GameObjectPool>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates, fills and registers a pool in one step.
    pub fn create_pool(
        &mut self,
        world: &mut World,
        id: PoolId,
        size: usize,
        template: &dyn PoolTemplate,
    ) -> Result<&mut GameObjectPool, EcsError> {
        if self.pools.contains_key(&id) {
            return Err(EcsError::DuplicatePool(id));
        }
        let mut pool = GameObjectPool::new(id, size)?;
        pool.fill(world, template)?;
        Ok(self.pools.entry(id).or_insert(pool))
    }

    /// Registers an existing pool.
    pub fn insert(&mut self, pool: GameObjectPool) -> Result<(), EcsError> {
        let id = pool.id();
        if self.pools.contains_key(&id) {
            return Err(EcsError::DuplicatePool(id));
        }
        self.pools.insert(id, pool);
        Ok(())
    }

    /// Returns a pool.
    pub fn get(&self, id: PoolId) -> Option<&GameObjectPool> {
        self.pools.get(&id)
    }

    /// Returns a pool mutably.
    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut GameObjectPool> {
        self.pools.get_mut(&id)
    }

    /// Whether a pool is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: PoolId) -> bool {
        self.pools.contains_key(&id)
    }

    /// Iterates over all pools in id order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObjectPool> {
        self.pools.values()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Finds the pool owning `entity`, preferring the explicit `hint`.
    ///
    /// Falls back to the entity's [`PoolMembershipComponent`].
    pub fn resolve(&self, world: &World, entity: EntityId, hint: Option<PoolId>) -> Option<PoolId> {
        hint.or_else(|| world.get::<PoolMembershipComponent>(entity).map(|m| m.pool))
            .filter(|id| self.pools.contains_key(id))
    }

    /// Releases every active entity of every pool.
    pub fn release_all(&mut self, world: &mut World) -> usize {
        self.pools
            .values_mut()
            .map(|pool| pool.release_all(world))
            .sum()
    }
}
