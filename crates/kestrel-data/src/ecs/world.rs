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

use crate::ecs::{
    entity_store::EntityStore,
    query::{ComponentQuery, Filter, Find, View},
    registry::{ComponentRegistry, ComponentTypeId},
    storage::{AnyStorage, ComponentStorage},
    Active, Component, GameObject, GameObjectMut, Hook, Inactive,
};
use crate::error::EcsError;

/// Storage slot of the reserved `Active` tag.
const ACTIVE_ID: ComponentTypeId = ComponentTypeId(0);
/// Storage slot of the reserved `Inactive` tag.
const INACTIVE_ID: ComponentTypeId = ComponentTypeId(1);

/// The central container for all game objects and their components.
///
/// The `World` owns the entity store, the component registry and one storage
/// per registered component type. Every live entity carries exactly one of the
/// reserved [`Active`] / [`Inactive`] tags, toggled through
/// [`World::set_active`].
pub struct World {
    entities: EntityStore,
    registry: ComponentRegistry,
    storages: Vec<Box<dyn AnyStorage>>,
}

impl World {
    /// Creates an empty world with the activity tags pre-registered.
    pub fn new() -> Self {
        let mut world = Self {
            entities: EntityStore::default(),
            registry: ComponentRegistry::default(),
            storages: Vec::new(),
        };
        let active = world.register_component::<Active>();
        let inactive = world.register_component::<Inactive>();
        debug_assert_eq!((active, inactive), (ACTIVE_ID, INACTIVE_ID));
        world
    }

    // --- Registration ---

    /// Registers a component type and allocates its storage.
    ///
    /// Registration is idempotent and also happens implicitly on the first
    /// [`World::attach`] of a type.
    pub fn register_component<T: Component>(&mut self) -> ComponentTypeId {
        let (id, is_new) = self.registry.register::<T>();
        if is_new {
            self.storages.push(Box::new(ComponentStorage::<T>::new()));
            log::trace!("Registered component {} as {}", std::any::type_name::<T>(), id);
        }
        id
    }

    /// The component registry.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    // --- Entities ---

    /// Creates a new, active entity with no components.
    pub fn create(&mut self) -> EntityId {
        let id = self.entities.allocate();
        self.storage_of_mut::<Active>().insert(id, Active);
        id
    }

    /// Destroys an entity and drops all its components.
    ///
    /// This is the rare path. Pooled entities are released, not destroyed.
    /// Returns `false` if the handle is stale.
    pub fn destroy(&mut self, entity: EntityId) -> bool {
        if !self.entities.is_alive(entity) {
            return false;
        }
        for storage in &mut self.storages {
            storage.remove(entity);
        }
        self.entities.free(entity)
    }

    /// Whether `entity` is a live handle.
    #[inline]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world holds no live entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.len() == 0
    }

    /// Iterates over every live entity in slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    /// Borrows an entity as a read-only [`GameObject`].
    pub fn game_object(&self, entity: EntityId) -> Option<GameObject<'_>> {
        self.is_alive(entity).then(|| GameObject::new(self, entity))
    }

    /// Borrows an entity as a mutable [`GameObjectMut`].
    pub fn game_object_mut(&mut self, entity: EntityId) -> Option<GameObjectMut<'_>> {
        if self.is_alive(entity) {
            Some(GameObjectMut::new(self, entity))
        } else {
            None
        }
    }

    // --- Components ---

    /// Attaches `value` to `entity` and returns a reference to it.
    ///
    /// Attaching a type that is already present is a contract violation. It
    /// asserts in debug builds and returns
    /// [`EcsError::ComponentAlreadyAttached`] otherwise. Pool reuse never goes
    /// through this path: recycled components reset themselves via hooks.
    ///
    /// The `Active`/`Inactive` tags are owned by [`World::set_active`] and
    /// are refused with [`EcsError::ReservedComponent`].
    pub fn attach<T: Component>(&mut self, entity: EntityId, value: T) -> Result<&mut T, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        let id = self.register_component::<T>();
        if id == ACTIVE_ID || id == INACTIVE_ID {
            return Err(EcsError::ReservedComponent {
                entity,
                component: std::any::type_name::<T>(),
            });
        }
        let storage = self.storage_of_mut::<T>();
        let already_attached = storage.get(entity).is_some();
        debug_assert!(
            !already_attached,
            "component `{}` is already attached to entity {}",
            std::any::type_name::<T>(),
            entity
        );
        if already_attached {
            return Err(EcsError::ComponentAlreadyAttached {
                entity,
                component: std::any::type_name::<T>(),
            });
        }
        let component = storage.insert(entity, value);
        component.on_attach(entity);
        Ok(component)
    }

    /// Detaches and returns the `T` of `entity`, if any.
    pub fn detach<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        let id = self.registry.id_of::<T>()?;
        if id == ACTIVE_ID || id == INACTIVE_ID {
            log::warn!("Refusing to detach an activity tag from {}", entity);
            return None;
        }
        self.storages
            .get_mut(id.index())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .take(entity)
    }

    /// Returns the `T` of `entity`, `None` if absent or if the handle is stale.
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.storage_of::<T>()?.get(entity)
    }

    /// Returns the `T` of `entity` mutably.
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        let id = self.registry.id_of::<T>()?;
        self.storages
            .get_mut(id.index())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .get_mut(entity)
    }

    /// Whether `entity` owns a `T`.
    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Exclusively borrows several components of one entity at once.
    ///
    /// Returns `None` if any of them is missing.
    pub fn get_many_mut<Q: ComponentQuery>(&mut self, entity: EntityId) -> Option<Q::Muts<'_>> {
        let ids = Q::component_ids(&self.registry)?;
        Q::fetch_mut(&mut self.storages, &ids, entity)
    }

    // --- Queries ---

    /// Returns a lazy iterator over the entities owning every type of `Q`.
    ///
    /// `Q` is a single component type or a tuple of them, e.g.
    /// `world.find::<(Transform, Velocity)>()`.
    pub fn find<Q: ComponentQuery>(&self) -> Find<'_, Q> {
        Find::new(self)
    }

    /// Like [`World::find`] but also yields shared references to the components.
    pub fn view<Q: ComponentQuery>(&self) -> View<'_, Q> {
        Find::new(self).with_components()
    }

    /// Calls `f` with exclusive references to the components of every match.
    ///
    /// The closure cannot reach the world, so the set being iterated cannot
    /// change underneath it. Returns the number of visited entities.
    pub fn for_each_mut<Q, F>(&mut self, filter: Filter, mut f: F) -> usize
    where
        Q: ComponentQuery,
        F: for<'a> FnMut(EntityId, Q::Muts<'a>),
    {
        let Some(ids) = Q::component_ids(&self.registry) else {
            return 0;
        };
        let Some(driver) = ids.iter().copied().min_by_key(|id| self.storage_len(*id)) else {
            return 0;
        };

        let mut visited = 0;
        let mut cursor = 0;
        while let Some(&entity) = self.storages[driver.index()].entities().get(cursor) {
            cursor += 1;
            if filter == Filter::Enabled && !self.is_active(entity) {
                continue;
            }
            if let Some(items) = Q::fetch_mut(&mut self.storages, &ids, entity) {
                f(entity, items);
                visited += 1;
            }
        }
        visited
    }

    // --- Activity ---

    /// Whether `entity` carries the [`Active`] tag.
    #[inline]
    pub fn is_active(&self, entity: EntityId) -> bool {
        self.storages[ACTIVE_ID.index()].contains(entity)
    }

    /// Swaps the activity tags of `entity` and runs the activation hooks.
    ///
    /// Returns `true` if the state changed. Setting the current state again is
    /// a no-op and runs no hook.
    pub fn set_active(&mut self, entity: EntityId, active: bool) -> bool {
        if !self.entities.is_alive(entity) || self.is_active(entity) == active {
            return false;
        }
        if active {
            self.storages[INACTIVE_ID.index()].remove(entity);
            self.storage_of_mut::<Active>().insert(entity, Active);
            self.run_hooks(entity, Hook::Activate);
        } else {
            self.storages[ACTIVE_ID.index()].remove(entity);
            self.storage_of_mut::<Inactive>().insert(entity, Inactive);
            self.run_hooks(entity, Hook::Deactivate);
        }
        true
    }

    /// Runs `hook` on every component of `entity` whose type implements it.
    pub(crate) fn run_hooks(&mut self, entity: EntityId, hook: Hook) {
        for storage in &mut self.storages {
            if storage.hooks().contains(hook) {
                storage.run_hook(entity, hook);
            }
        }
    }

    // --- Internal storage access ---

    pub(crate) fn storages(&self) -> &[Box<dyn AnyStorage>] {
        &self.storages
    }

    pub(crate) fn storage(&self, id: ComponentTypeId) -> Option<&dyn AnyStorage> {
        self.storages.get(id.index()).map(|s| &**s)
    }

    pub(crate) fn storage_len(&self, id: ComponentTypeId) -> usize {
        self.storages
            .get(id.index())
            .map_or(0, |s| s.entities().len())
    }

    pub(crate) fn has_all(&self, ids: &[ComponentTypeId], entity: EntityId) -> bool {
        ids.iter().all(|id| {
            self.storages
                .get(id.index())
                .is_some_and(|s| s.contains(entity))
        })
    }

    fn storage_of<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        let id = self.registry.id_of::<T>()?;
        self.storages
            .get(id.index())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_of_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let id = self.register_component::<T>();
        match self.storages[id.index()]
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
        {
            Some(storage) => storage,
            None => unreachable!("storage {id} does not hold {}", std::any::type_name::<T>()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
