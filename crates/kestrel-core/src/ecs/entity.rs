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

//! Defines the handle used to address game objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a game object.
///
/// It combines a slot index with a generation count. When a game object is
/// destroyed its slot can be recycled, but the generation is bumped, so stale
/// handles to the old occupant never resolve to the new one.
///
/// Pooled objects are never destroyed during gameplay, so their handles stay
/// valid for the lifetime of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    /// The slot index inside the entity store.
    pub index: u32,
    /// Incremented every time the slot is recycled.
    pub generation: u32,
}

impl EntityId {
    /// Creates a handle from its raw parts.
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Packs the handle into a single 64-bit guid.
    ///
    /// The generation occupies the high 32 bits and the index the low 32 bits.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    /// Rebuilds a handle from a guid produced by [`EntityId::to_bits`].
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_packing_keeps_both_parts() {
        let id = EntityId::new(42, 7);
        let bits = id.to_bits();

        assert_eq!(bits, (7u64 << 32) | 42);
        assert_eq!(EntityId::from_bits(bits), id);
    }

    #[test]
    fn test_different_generations_are_different_guids() {
        let first = EntityId::new(3, 0);
        let recycled = EntityId::new(3, 1);

        assert_ne!(first.to_bits(), recycled.to_bits());
        assert_eq!(format!("{recycled}"), "3v1");
    }
}
