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

use std::marker::PhantomData;

use kestrel_core::EntityId;

use crate::ecs::{
    registry::{ComponentRegistry, ComponentTypeId},
    storage::{AnyStorage, ComponentStorage},
    Component, World,
};

// ------------------------------ //
// ---- ComponentQuery Part ---- //
// ------------------------------ //

/// A set of component types that can be matched against an entity.
///
/// Implemented for every [`Component`] and for tuples of up to six components.
/// `Refs` and `Muts` are the borrowed forms yielded by views and mutable
/// iteration.
pub trait ComponentQuery: sealed::Sealed + 'static {
    /// Shared references to every component of the set.
    type Refs<'w>;
    /// Exclusive references to every component of the set.
    type Muts<'w>;

    /// Resolves the storage ids of the set.
    ///
    /// Returns `None` if any type was never registered, in which case no entity
    /// can match.
    fn component_ids(registry: &ComponentRegistry) -> Option<Vec<ComponentTypeId>>;

    /// Borrows every component of `entity`, `None` if one is missing.
    #[doc(hidden)]
    fn fetch<'w>(
        storages: &'w [Box<dyn AnyStorage>],
        ids: &[ComponentTypeId],
        entity: EntityId,
    ) -> Option<Self::Refs<'w>>;

    /// Exclusively borrows every component of `entity`.
    ///
    /// Returns `None` if one is missing or if the set names the same type twice.
    #[doc(hidden)]
    fn fetch_mut<'w>(
        storages: &'w mut [Box<dyn AnyStorage>],
        ids: &[ComponentTypeId],
        entity: EntityId,
    ) -> Option<Self::Muts<'w>>;
}

mod sealed {
    /// Keeps [`super::ComponentQuery`] closed to components and their tuples.
    pub trait Sealed {}
}

#[inline]
fn typed<'a, T: Component>(
    storage: &'a (dyn AnyStorage + 'static),
) -> Option<&'a ComponentStorage<T>> {
    storage.as_any().downcast_ref::<ComponentStorage<T>>()
}

#[inline]
fn typed_mut<'a, T: Component>(
    storage: &'a mut (dyn AnyStorage + 'static),
) -> Option<&'a mut ComponentStorage<T>> {
    storage.as_any_mut().downcast_mut::<ComponentStorage<T>>()
}

impl<T: Component> sealed::Sealed for T {}

impl<T: Component> ComponentQuery for T {
    type Refs<'w> = &'w T;
    type Muts<'w> = &'w mut T;

    fn component_ids(registry: &ComponentRegistry) -> Option<Vec<ComponentTypeId>> {
        Some(vec![registry.id_of::<T>()?])
    }

    fn fetch<'w>(
        storages: &'w [Box<dyn AnyStorage>],
        ids: &[ComponentTypeId],
        entity: EntityId,
    ) -> Option<Self::Refs<'w>> {
        typed::<T>(&**storages.get(ids[0].index())?)?.get(entity)
    }

    fn fetch_mut<'w>(
        storages: &'w mut [Box<dyn AnyStorage>],
        ids: &[ComponentTypeId],
        entity: EntityId,
    ) -> Option<Self::Muts<'w>> {
        typed_mut::<T>(&mut **storages.get_mut(ids[0].index())?)?.get_mut(entity)
    }
}

macro_rules! impl_component_query_for_tuple {
    ($(($name:ident, $slot:ident, $idx:tt)),+) => {
        impl<$($name: Component),+> sealed::Sealed for ($($name,)+) {}

        impl<$($name: Component),+> ComponentQuery for ($($name,)+) {
            type Refs<'w> = ($(&'w $name,)+);
            type Muts<'w> = ($(&'w mut $name,)+);

            fn component_ids(registry: &ComponentRegistry) -> Option<Vec<ComponentTypeId>> {
                Some(vec![$(registry.id_of::<$name>()?),+])
            }

            fn fetch<'w>(
                storages: &'w [Box<dyn AnyStorage>],
                ids: &[ComponentTypeId],
                entity: EntityId,
            ) -> Option<Self::Refs<'w>> {
                Some(($(
                    typed::<$name>(&**storages.get(ids[$idx].index())?)?.get(entity)?,
                )+))
            }

            fn fetch_mut<'w>(
                storages: &'w mut [Box<dyn AnyStorage>],
                ids: &[ComponentTypeId],
                entity: EntityId,
            ) -> Option<Self::Muts<'w>> {
                let [$($slot),+] = storages.get_disjoint_mut([$(ids[$idx].index()),+]).ok()?;
                Some(($(
                    typed_mut::<$name>(&mut **$slot)?.get_mut(entity)?,
                )+))
            }
        }
    };
}

impl_component_query_for_tuple!((A, a, 0), (B, b, 1));
impl_component_query_for_tuple!((A, a, 0), (B, b, 1), (C, c, 2));
impl_component_query_for_tuple!((A, a, 0), (B, b, 1), (C, c, 2), (D, d, 3));
impl_component_query_for_tuple!((A, a, 0), (B, b, 1), (C, c, 2), (D, d, 3), (E, e, 4));
impl_component_query_for_tuple!(
    (A, a, 0),
    (B, b, 1),
    (C, c, 2),
    (D, d, 3),
    (E, e, 4),
    (F, f, 5)
);

// --------------------- //
// ---- Filter Part ---- //
// --------------------- //

/// Restricts which entities a query visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every entity owning the components.
    #[default]
    All,
    /// Only entities carrying the `Active` tag.
    Enabled,
}

// ------------------- //
// ---- Find Part ---- //
// ------------------- //

/// A lazy, restartable iterator over the entities matching `Q`.
///
/// Created by [`World::find`]. Cloning a `Find` restarts the walk from the
/// beginning. It visits the dense list of the smallest storage in `Q`, so the
/// order is that storage's insertion order, perturbed by removals. Callers
/// must not rely on an entity's position across frames.
pub struct Find<'w, Q: ComponentQuery> {
    world: &'w World,
    ids: Option<Vec<ComponentTypeId>>,
    driver: Option<ComponentTypeId>,
    cursor: usize,
    filter: Filter,
    _marker: PhantomData<fn() -> Q>,
}

impl<'w, Q: ComponentQuery> Find<'w, Q> {
    pub(crate) fn new(world: &'w World) -> Self {
        let ids = Q::component_ids(world.registry());
        let driver = ids
            .as_ref()
            .and_then(|ids| ids.iter().copied().min_by_key(|id| world.storage_len(*id)));
        Self {
            world,
            ids,
            driver,
            cursor: 0,
            filter: Filter::All,
            _marker: PhantomData,
        }
    }

    /// Keeps only active entities.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.filter = Filter::Enabled;
        self
    }

    /// Applies an explicit filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Turns the walk into a view that also borrows the components.
    pub fn with_components(self) -> View<'w, Q> {
        View { find: self }
    }
}

impl<Q: ComponentQuery> Clone for Find<'_, Q> {
    fn clone(&self) -> Self {
        Self {
            world: self.world,
            ids: self.ids.clone(),
            driver: self.driver,
            cursor: 0,
            filter: self.filter,
            _marker: PhantomData,
        }
    }
}

impl<Q: ComponentQuery> Iterator for Find<'_, Q> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        let world = self.world;
        let ids = self.ids.as_ref()?;
        let driver = world.storage(self.driver?)?;
        let entities = driver.entities();

        while let Some(&entity) = entities.get(self.cursor) {
            self.cursor += 1;
            if self.filter == Filter::Enabled && !world.is_active(entity) {
                continue;
            }
            if world.has_all(ids, entity) {
                return Some(entity);
            }
        }
        None
    }
}

// ------------------- //
// ---- View Part ---- //
// ------------------- //

/// A [`Find`] that yields `(EntityId, components)` pairs.
pub struct View<'w, Q: ComponentQuery> {
    find: Find<'w, Q>,
}

impl<'w, Q: ComponentQuery> View<'w, Q> {
    /// Keeps only active entities.
    #[must_use]
    pub fn enabled(self) -> Self {
        Self {
            find: self.find.enabled(),
        }
    }
}

impl<'w, Q: ComponentQuery> Iterator for View<'w, Q> {
    type Item = (EntityId, Q::Refs<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        let world = self.find.world;
        loop {
            let entity = self.find.next()?;
            let ids = self.find.ids.as_deref()?;
            if let Some(items) = Q::fetch(world.storages(), ids, entity) {
                return Some((entity, items));
            }
        }
    }
}
