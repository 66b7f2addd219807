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

//! Per-type dense component storage.

use std::any::Any;

use kestrel_core::EntityId;

use crate::ecs::{Component, ComponentHooks, Hook};

const EMPTY: u32 = u32::MAX;

/// A type-erased view over a [`ComponentStorage`].
///
/// The world keeps one boxed storage per registered component type and only
/// downcasts when the concrete type is known at the call site.
pub trait AnyStorage: Send + Sync {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Whether `entity` owns a component in this storage.
    fn contains(&self, entity: EntityId) -> bool;
    /// Drops the component of `entity`, if any.
    fn remove(&mut self, entity: EntityId) -> bool;
    /// The entities owning a component, in dense order.
    fn entities(&self) -> &[EntityId];
    /// The hook capability table of the stored type.
    fn hooks(&self) -> ComponentHooks;
    /// Invokes `hook` on the component of `entity`, if any.
    fn run_hook(&mut self, entity: EntityId, hook: Hook);
}

/// A sparse set: components are packed in `dense`, `sparse` maps an entity
/// index to a dense position.
///
/// Removal swaps the last element into the hole, so dense order is insertion
/// order until the first removal.
pub(crate) struct ComponentStorage<T: Component> {
    dense: Vec<T>,
    entities: Vec<EntityId>,
    sparse: Vec<u32>,
}

impl<T: Component> ComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            sparse: Vec::new(),
        }
    }

    #[inline]
    fn dense_index(&self, entity: EntityId) -> Option<usize> {
        let slot = *self.sparse.get(entity.index as usize)?;
        if slot == EMPTY {
            return None;
        }
        let slot = slot as usize;
        // The slot index may be shared by an older generation.
        (self.entities[slot] == entity).then_some(slot)
    }

    /// Inserts a component. The caller guarantees `entity` has none yet.
    pub fn insert(&mut self, entity: EntityId, value: T) -> &mut T {
        let index = entity.index as usize;
        if self.sparse.len() <= index {
            self.sparse.resize(index + 1, EMPTY);
        }
        let slot = self.dense.len();
        self.sparse[index] = slot as u32;
        self.entities.push(entity);
        self.dense.push(value);
        &mut self.dense[slot]
    }

    #[inline]
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.dense_index(entity).map(|slot| &self.dense[slot])
    }

    #[inline]
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.dense_index(entity).map(move |slot| &mut self.dense[slot])
    }

    /// Removes and returns the component of `entity`.
    pub fn take(&mut self, entity: EntityId) -> Option<T> {
        let slot = self.dense_index(entity)?;
        let last = self.dense.len() - 1;
        if slot != last {
            let moved = self.entities[last];
            self.sparse[moved.index as usize] = slot as u32;
        }
        self.sparse[entity.index as usize] = EMPTY;
        self.entities.swap_remove(slot);
        Some(self.dense.swap_remove(slot))
    }
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.dense_index(entity).is_some()
    }

    fn remove(&mut self, entity: EntityId) -> bool {
        self.take(entity).is_some()
    }

    fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    fn hooks(&self) -> ComponentHooks {
        T::HOOKS
    }

    fn run_hook(&mut self, entity: EntityId, hook: Hook) {
        if !T::HOOKS.contains(hook) {
            return;
        }
        if let Some(component) = self.get_mut(entity) {
            match hook {
                Hook::Acquire => component.on_acquire(),
                Hook::Release => component.on_release(),
                Hook::Activate => component.on_activate(),
                Hook::Deactivate => component.on_deactivate(),
            }
        }
    }
}
