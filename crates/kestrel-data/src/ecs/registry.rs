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

use std::{any::TypeId, collections::HashMap, fmt};

use crate::ecs::{Component, ComponentHooks};

/// A dense, stable integer id for a registered component type.
///
/// Ids are handed out in registration order starting at zero and never change
/// for the lifetime of the registry. They index the world's storage table
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u32);

impl ComponentTypeId {
    /// The id as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static information recorded for each registered component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentInfo {
    /// The assigned id.
    pub id: ComponentTypeId,
    /// `std::any::type_name` of the component, for diagnostics.
    pub name: &'static str,
    /// The hook capability table of the type.
    pub hooks: ComponentHooks,
}

/// Maps Rust component types to their [`ComponentTypeId`] and capabilities.
///
/// This is the single source of truth for which storage slot a type lives in.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentTypeId>,
    infos: Vec<ComponentInfo>,
}

impl ComponentRegistry {
    /// Registers `T` if needed and returns its id.
    ///
    /// The second element is `true` when the type was registered by this call.
    pub(crate) fn register<T: Component>(&mut self) -> (ComponentTypeId, bool) {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return (id, false);
        }
        let id = ComponentTypeId(self.infos.len() as u32);
        self.ids.insert(TypeId::of::<T>(), id);
        self.infos.push(ComponentInfo {
            id,
            name: std::any::type_name::<T>(),
            hooks: T::HOOKS,
        });
        (id, true)
    }

    /// Looks up the id of `T`, `None` if it was never registered.
    #[inline]
    pub fn id_of<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the recorded information for an id.
    pub fn info(&self, id: ComponentTypeId) -> Option<&ComponentInfo> {
        self.infos.get(id.index())
    }

    /// Iterates over every registered type in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.infos.iter()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Whether no type has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl Component for Plain {}

    struct Hooked;
    impl Component for Hooked {
        const HOOKS: ComponentHooks = ComponentHooks::POOLED;
    }

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut registry = ComponentRegistry::default();

        let (plain, new_plain) = registry.register::<Plain>();
        let (hooked, new_hooked) = registry.register::<Hooked>();
        let (again, new_again) = registry.register::<Plain>();

        assert_eq!(plain, ComponentTypeId(0));
        assert_eq!(hooked, ComponentTypeId(1));
        assert_eq!(again, plain, "Re-registering must return the same id");
        assert!(new_plain && new_hooked && !new_again);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_capability_table_is_recorded() {
        let mut registry = ComponentRegistry::default();
        let (id, _) = registry.register::<Hooked>();

        let info = registry.info(id).expect("registered");
        assert_eq!(info.hooks, ComponentHooks::POOLED);
        assert!(info.name.ends_with("Hooked"));
        assert_eq!(registry.id_of::<Plain>(), None);
    }
}
