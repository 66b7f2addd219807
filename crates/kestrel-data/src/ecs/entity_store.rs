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

//! Entity slot allocation and handle validation.

use kestrel_core::EntityId;

/// One slot of the store. `alive` is false for slots waiting in the free list.
#[derive(Debug, Clone, Copy)]
struct EntitySlot {
    generation: u32,
    alive: bool,
}

/// Allocates entity handles and recycles destroyed slots.
///
/// Slots are recycled LIFO through a free list. A recycled slot gets its
/// generation bumped, which invalidates every outstanding handle to it.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntityStore {
    slots: Vec<EntitySlot>,
    free: Vec<u32>,
    alive_count: usize,
}

impl EntityStore {
    /// Allocates a new or recycled `EntityId`.
    pub fn allocate(&mut self) -> EntityId {
        self.alive_count += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.alive = true;
            EntityId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(EntitySlot {
                generation: 0,
                alive: true,
            });
            EntityId::new(index, 0)
        }
    }

    /// Frees the slot behind `id`. Returns `false` for stale handles.
    pub fn free(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.slots[id.index as usize].alive = false;
        self.free.push(id.index);
        self.alive_count -= 1;
        true
    }

    /// Checks that `id` refers to the current occupant of a live slot.
    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.alive && slot.generation == id.generation)
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive_count
    }

    /// Iterates over every live handle in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| EntityId::new(index as u32, slot.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recycled_slot_bumps_generation() {
        let mut store = EntityStore::default();
        let a = store.allocate();
        let b = store.allocate();

        assert!(store.free(a));
        let c = store.allocate();

        assert_eq!(c.index, a.index, "The freed slot should be reused");
        assert_eq!(c.generation, a.generation + 1);
        assert!(!store.is_alive(a), "The stale handle must not resolve");
        assert!(store.is_alive(b) && store.is_alive(c));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut store = EntityStore::default();
        let a = store.allocate();

        assert!(store.free(a));
        assert!(!store.free(a));
        assert_eq!(store.len(), 0);
        assert_eq!(store.iter().count(), 0);
    }
}
