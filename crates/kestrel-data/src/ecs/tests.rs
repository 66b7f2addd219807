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
use proptest::prelude::*;

use super::{Component, ComponentHooks, Filter, World};
use crate::error::EcsError;

// --- DUMMY COMPONENTS FOR TESTING ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position(i32);
impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Velocity(i32);
impl Component for Velocity {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tag;
impl Component for Tag {}

/// Counts activation hooks.
#[derive(Debug, Default)]
struct Lamp {
    on: bool,
    toggles: u32,
    attached_to: Option<EntityId>,
}

impl Component for Lamp {
    const HOOKS: ComponentHooks = ComponentHooks::ACTIVATE.union(ComponentHooks::DEACTIVATE);

    fn on_attach(&mut self, entity: EntityId) {
        self.attached_to = Some(entity);
    }

    fn on_activate(&mut self) {
        self.on = true;
        self.toggles += 1;
    }

    fn on_deactivate(&mut self) {
        self.on = false;
        self.toggles += 1;
    }
}

// --- TESTS ---

#[test]
fn test_find_yields_only_entities_with_all_components() {
    // --- 1. ARRANGE ---
    let mut world = World::new();
    let both_a = world.create();
    let only_a = world.create();
    let both_b = world.create();
    world.attach(both_a, Position(1)).expect("attach");
    world.attach(both_a, Velocity(1)).expect("attach");
    world.attach(only_a, Position(2)).expect("attach");
    world.attach(both_b, Position(3)).expect("attach");
    world.attach(both_b, Velocity(3)).expect("attach");

    // --- 2. ACT ---
    let found: Vec<EntityId> = world.find::<(Position, Velocity)>().collect();

    // --- 3. ASSERT ---
    assert_eq!(found.len(), 2);
    assert!(found.contains(&both_a) && found.contains(&both_b));
    assert!(!found.contains(&only_a), "The Position-only entity must be excluded");
}

#[test]
fn test_find_is_restartable() {
    let mut world = World::new();
    for i in 0..3 {
        let e = world.create();
        world.attach(e, Position(i)).expect("attach");
    }

    let find = world.find::<Position>();
    let first: Vec<_> = find.clone().collect();
    let second: Vec<_> = find.collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second, "Two walks over an unchanged world agree");
}

#[test]
fn test_find_follows_insertion_order_of_driver() {
    let mut world = World::new();
    let ids: Vec<_> = (0..4)
        .map(|i| {
            let e = world.create();
            world.attach(e, Position(i)).expect("attach");
            e
        })
        .collect();

    let found: Vec<_> = world.find::<Position>().collect();

    assert_eq!(found, ids);
}

#[test]
fn test_find_of_unregistered_type_is_empty() {
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Position(0)).expect("attach");

    assert_eq!(world.find::<(Position, Tag)>().count(), 0);
    assert_eq!(world.find::<Tag>().count(), 0);
}

#[test]
fn test_enabled_filter_skips_inactive_entities() {
    let mut world = World::new();
    let on = world.create();
    let off = world.create();
    world.attach(on, Position(1)).expect("attach");
    world.attach(off, Position(2)).expect("attach");
    world.set_active(off, false);

    let enabled: Vec<_> = world.find::<Position>().enabled().collect();
    let all = world.find::<Position>().filter(Filter::All).count();

    assert_eq!(enabled, vec![on]);
    assert_eq!(all, 2);
}

#[test]
fn test_view_borrows_components() {
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Position(5)).expect("attach");
    world.attach(e, Velocity(-1)).expect("attach");

    let items: Vec<_> = world.view::<(Position, Velocity)>().collect();

    assert_eq!(items, vec![(e, (&Position(5), &Velocity(-1)))]);
}

#[test]
fn test_for_each_mut_updates_matching_components() {
    let mut world = World::new();
    let moving = world.create();
    let idle = world.create();
    let sleeping = world.create();
    for (e, v) in [(moving, 2), (sleeping, 7)] {
        world.attach(e, Position(0)).expect("attach");
        world.attach(e, Velocity(v)).expect("attach");
    }
    world.attach(idle, Position(10)).expect("attach");
    world.set_active(sleeping, false);

    let visited = world.for_each_mut::<(Position, Velocity), _>(Filter::Enabled, |_, (pos, vel)| {
        pos.0 += vel.0;
    });

    assert_eq!(visited, 1);
    assert_eq!(world.get::<Position>(moving), Some(&Position(2)));
    assert_eq!(world.get::<Position>(idle), Some(&Position(10)));
    assert_eq!(world.get::<Position>(sleeping), Some(&Position(0)));
}

#[test]
fn test_get_many_mut_rejects_aliasing() {
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Position(1)).expect("attach");
    world.attach(e, Velocity(2)).expect("attach");

    if let Some((pos, vel)) = world.get_many_mut::<(Position, Velocity)>(e) {
        std::mem::swap(&mut pos.0, &mut vel.0);
    }

    assert_eq!(world.get::<Position>(e), Some(&Position(2)));
    assert!(world.get_many_mut::<(Position, Position)>(e).is_none());
}

#[test]
fn test_get_of_missing_component_is_none() {
    let mut world = World::new();
    let e = world.create();

    assert!(world.get::<Position>(e).is_none());
    assert!(!world.has::<Position>(e));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "already attached"))]
fn test_double_attach_is_a_contract_violation() {
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Position(1)).expect("first attach");

    let second = world.attach(e, Position(2));

    assert!(matches!(second, Err(EcsError::ComponentAlreadyAttached { .. })));
    assert_eq!(world.get::<Position>(e), Some(&Position(1)));
}

#[test]
fn test_attach_to_destroyed_entity_fails() {
    let mut world = World::new();
    let e = world.create();
    assert!(world.destroy(e));

    assert_eq!(world.attach(e, Tag).err(), Some(EcsError::EntityNotFound(e)));
    assert!(!world.destroy(e));
}

#[test]
fn test_destroy_drops_components_and_invalidates_handle() {
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Position(1)).expect("attach");

    world.destroy(e);
    let recycled = world.create();

    assert_eq!(recycled.index, e.index);
    assert!(world.get::<Position>(e).is_none());
    assert!(world.get::<Position>(recycled).is_none(), "Components must not leak");
    assert_eq!(world.find::<Position>().count(), 0);
}

#[test]
fn test_set_active_toggles_tags_and_runs_hooks_once() {
    // --- 1. ARRANGE ---
    let mut world = World::new();
    let e = world.create();
    world.attach(e, Lamp::default()).expect("attach");

    // --- 2. ACT ---
    let changed_off = world.set_active(e, false);
    let repeated = world.set_active(e, false);
    let changed_on = world.set_active(e, true);

    // --- 3. ASSERT ---
    assert!(changed_off && changed_on);
    assert!(!repeated, "Setting the current state again is a no-op");
    let lamp = world.get::<Lamp>(e).expect("lamp");
    assert!(lamp.on);
    assert_eq!(lamp.toggles, 2);
    assert_eq!(lamp.attached_to, Some(e), "on_attach receives the owner");
    assert!(world.is_active(e));
}

#[test]
fn test_activity_tags_cannot_be_detached() {
    let mut world = World::new();
    let e = world.create();

    assert!(world.detach::<super::Active>(e).is_none());
    assert!(world.is_active(e));
}

#[test]
fn test_activity_tags_cannot_be_attached() {
    // --- 1. ARRANGE ---
    let mut world = World::new();
    let e = world.create();

    // --- 2. ACT ---
    let inactive = world.attach(e, super::Inactive).err();
    let active = world.attach(e, super::Active).err();

    // --- 3. ASSERT ---
    assert!(matches!(inactive, Some(EcsError::ReservedComponent { entity, .. }) if entity == e));
    assert!(matches!(active, Some(EcsError::ReservedComponent { .. })));
    assert!(world.is_active(e));
    assert_eq!(world.find::<super::Inactive>().count(), 0);
}

#[test]
fn test_game_object_views() {
    let mut world = World::new();
    let e = world.create();
    {
        let mut object = world.game_object_mut(e).expect("alive");
        object
            .with(Position(3))
            .and_then(|o| o.with(Velocity(4)))
            .expect("attach chain");
        object.set_active(false);
        assert_eq!(object.detach::<Velocity>(), Some(Velocity(4)));
    }

    let view = world.game_object(e).expect("alive");
    assert_eq!(view.get::<Position>(), Some(&Position(3)));
    assert!(!view.has::<Velocity>());
    assert!(!view.is_active());
}

proptest! {
    #[test]
    fn prop_find_matches_exactly_the_full_set(layout in proptest::collection::vec(0u8..4, 0..48)) {
        let mut world = World::new();
        let mut expected = Vec::new();
        for bits in layout {
            let e = world.create();
            if bits & 1 != 0 {
                world.attach(e, Position(0)).expect("attach");
            }
            if bits & 2 != 0 {
                world.attach(e, Velocity(0)).expect("attach");
            }
            if bits == 3 {
                expected.push(e);
            }
        }

        let mut found: Vec<_> = world.find::<(Position, Velocity)>().collect();
        found.sort();
        prop_assert_eq!(found, expected);
    }
}
