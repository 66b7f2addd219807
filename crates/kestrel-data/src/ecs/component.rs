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

use kestrel_core::EntityId;

/// A lifecycle hook a component may opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// The entity was taken from a pool.
    Acquire,
    /// The entity was returned to its pool.
    Release,
    /// The entity switched to active.
    Activate,
    /// The entity switched to inactive.
    Deactivate,
}

/// The set of hooks a component type implements.
///
/// Stored per type by the registry so that hook dispatch skips the
/// (majority of) component types that have none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentHooks(u8);

impl ComponentHooks {
    /// No hooks.
    pub const NONE: Self = Self(0);
    /// Only `on_acquire`.
    pub const ACQUIRE: Self = Self(1 << 0);
    /// Only `on_release`.
    pub const RELEASE: Self = Self(1 << 1);
    /// Only `on_activate`.
    pub const ACTIVATE: Self = Self(1 << 2);
    /// Only `on_deactivate`.
    pub const DEACTIVATE: Self = Self(1 << 3);
    /// Both pool hooks, the common case for poolable state.
    pub const POOLED: Self = Self::ACQUIRE.union(Self::RELEASE);

    /// Combines two hook sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `hook` is part of the set.
    #[must_use]
    pub const fn contains(self, hook: Hook) -> bool {
        let bit = match hook {
            Hook::Acquire => Self::ACQUIRE.0,
            Hook::Release => Self::RELEASE.0,
            Hook::Activate => Self::ACTIVATE.0,
            Hook::Deactivate => Self::DEACTIVATE.0,
        };
        self.0 & bit != 0
    }
}

/// A marker trait for types that can be attached to a game object.
///
/// Components are plain data. A few of them carry state that has to be reset
/// when a pooled object is recycled; those override the matching hook and list
/// it in [`Component::HOOKS`]. Hooks not listed there are never called.
///
/// The `'static + Send + Sync` bounds let storages be type-erased and keep the
/// door open for a threaded scheduler.
pub trait Component: 'static + Send + Sync {
    /// The hooks this type implements.
    const HOOKS: ComponentHooks = ComponentHooks::NONE;

    /// Called right after the component is attached to `entity`.
    ///
    /// Always called, regardless of [`Component::HOOKS`].
    fn on_attach(&mut self, _entity: EntityId) {}

    /// Called when the owning entity is acquired from its pool.
    fn on_acquire(&mut self) {}

    /// Called when the owning entity is released back to its pool.
    fn on_release(&mut self) {}

    /// Called when the owning entity becomes active.
    fn on_activate(&mut self) {}

    /// Called when the owning entity becomes inactive.
    fn on_deactivate(&mut self) {}
}
