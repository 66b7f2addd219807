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

//! Borrowed views over a single entity.

use kestrel_core::EntityId;

use crate::ecs::{Component, World};
use crate::error::EcsError;

/// A read-only view of one live entity.
#[derive(Clone, Copy)]
pub struct GameObject<'w> {
    world: &'w World,
    id: EntityId,
}

impl<'w> GameObject<'w> {
    pub(crate) fn new(world: &'w World, id: EntityId) -> Self {
        Self { world, id }
    }

    /// The entity handle.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether the entity carries the `Active` tag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.world.is_active(self.id)
    }

    /// Returns the `T` of this entity.
    pub fn get<T: Component>(&self) -> Option<&'w T> {
        self.world.get::<T>(self.id)
    }

    /// Whether this entity owns a `T`.
    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.id)
    }
}

/// A mutable view of one live entity, used by factories and pool templates.
pub struct GameObjectMut<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl<'w> GameObjectMut<'w> {
    pub(crate) fn new(world: &'w mut World, id: EntityId) -> Self {
        Self { world, id }
    }

    /// The entity handle.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether the entity carries the `Active` tag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.world.is_active(self.id)
    }

    /// Attaches a component. See [`World::attach`].
    pub fn attach<T: Component>(&mut self, value: T) -> Result<&mut T, EcsError> {
        self.world.attach(self.id, value)
    }

    /// Chaining form of [`GameObjectMut::attach`].
    pub fn with<T: Component>(&mut self, value: T) -> Result<&mut Self, EcsError> {
        self.world.attach(self.id, value)?;
        Ok(self)
    }

    /// Returns the `T` of this entity.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.id)
    }

    /// Returns the `T` of this entity mutably.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut::<T>(self.id)
    }

    /// Whether this entity owns a `T`.
    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.id)
    }

    /// Detaches the `T` of this entity.
    pub fn detach<T: Component>(&mut self) -> Option<T> {
        self.world.detach::<T>(self.id)
    }

    /// Toggles the activity tags. See [`World::set_active`].
    pub fn set_active(&mut self, active: bool) -> bool {
        self.world.set_active(self.id, active)
    }
}
