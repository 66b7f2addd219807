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

use std::collections::HashMap;

use kestrel_core::EntityId;

use crate::ecs::{Hook, PoolMembershipComponent, World};
use crate::error::EcsError;
use crate::pool::{PoolId, PoolTemplate};

/// Where a pooled entity currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Index into `active`.
    Active(usize),
    Inactive,
}

/// A fixed-capacity set of pre-constructed entities for one spawn category.
///
/// Once filled, `active_count() + inactive_count() == size()` holds after
/// every call. Acquire and release are O(1).
#[derive(Debug)]
pub struct GameObjectPool {
    id: PoolId,
    size: usize,
    active: Vec<EntityId>,
    inactive: Vec<EntityId>,
    slots: HashMap<EntityId, Slot>,
    filled: bool,
}

impl GameObjectPool {
    /// Creates an empty pool. Fails for a zero `size`.
    pub fn new(id: PoolId, size: usize) -> Result<Self, EcsError> {
        if size == 0 {
            return Err(EcsError::InvalidPoolSize(id));
        }
        Ok(Self {
            id,
            size,
            active: Vec::with_capacity(size),
            inactive: Vec::with_capacity(size),
            slots: HashMap::with_capacity(size),
            filled: false,
        })
    }

    /// Pre-constructs every entity of the pool from `template`.
    ///
    /// Entities are left inactive and tagged with their pool. Filling an
    /// already filled pool does nothing. Returns the pool size.
    pub fn fill(
        &mut self,
        world: &mut World,
        template: &dyn PoolTemplate,
    ) -> Result<usize, EcsError> {
        if self.filled {
            return Ok(self.size);
        }
        for _ in 0..self.size {
            let id = world.create();
            let mut object = world
                .game_object_mut(id)
                .ok_or(EcsError::EntityNotFound(id))?;
            template.build(&mut object)?;
            object.attach(PoolMembershipComponent { pool: self.id })?;
            object.set_active(false);

            self.inactive.push(id);
            self.slots.insert(id, Slot::Inactive);
        }
        self.filled = true;
        log::debug!("Filled {} with {} entities", self.id, self.size);
        Ok(self.size)
    }

    /// Takes an entity out of the inactive subset and activates it.
    ///
    /// Runs the `on_acquire` hooks before activation. Returns `None` when the
    /// pool is exhausted; callers treat that as backpressure. Acquiring from a
    /// pool that was never filled is a contract violation.
    pub fn acquire(&mut self, world: &mut World) -> Option<EntityId> {
        debug_assert!(self.filled, "acquire from unfilled {}", self.id);
        let id = self.inactive.pop()?;
        self.slots.insert(id, Slot::Active(self.active.len()));
        self.active.push(id);

        world.run_hooks(id, Hook::Acquire);
        world.set_active(id, true);
        Some(id)
    }

    /// Returns an active entity to the inactive subset.
    ///
    /// Deactivates it and runs the `on_release` hooks so poolable state is
    /// reset. Returns `false` if `id` is not currently active in this pool.
    pub fn release(&mut self, world: &mut World, id: EntityId) -> bool {
        let Some(Slot::Active(position)) = self.slots.get(&id).copied() else {
            return false;
        };

        self.active.swap_remove(position);
        if let Some(&moved) = self.active.get(position) {
            self.slots.insert(moved, Slot::Active(position));
        }
        self.slots.insert(id, Slot::Inactive);
        self.inactive.push(id);

        world.set_active(id, false);
        world.run_hooks(id, Hook::Release);
        true
    }

    /// Releases every active entity. Returns how many were released.
    pub fn release_all(&mut self, world: &mut World) -> usize {
        let mut released = 0;
        while let Some(&id) = self.active.last() {
            if self.release(world, id) {
                released += 1;
            }
        }
        released
    }

    /// The pool's id.
    #[must_use]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// The fixed capacity.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether [`GameObjectPool::fill`] has run.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Every entity owned by the pool, active ones first.
    pub fn members(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.active.iter().chain(&self.inactive).copied()
    }

    /// Number of entities in use.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of entities available.
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    /// The entities in use, in no particular order.
    #[must_use]
    pub fn active(&self) -> &[EntityId] {
        &self.active
    }

    /// Whether `id` belongs to this pool.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Whether `id` is currently in the active subset.
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        matches!(self.slots.get(&id), Some(Slot::Active(_)))
    }

    /// Whether `id` is currently in the inactive subset.
    #[must_use]
    pub fn is_inactive(&self, id: EntityId) -> bool {
        matches!(self.slots.get(&id), Some(Slot::Inactive))
    }
}
