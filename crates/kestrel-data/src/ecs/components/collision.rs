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

use kestrel_core::math::{Aabb, Vec3};
use kestrel_core::EntityId;

use crate::ecs::{Component, ComponentHooks};

/// Collision layer bits used by the built-in content.
pub mod layers {
    /// The player ship.
    pub const PLAYER: u32 = 1 << 0;
    /// Hostile objects.
    pub const ENEMY: u32 = 1 << 1;
    /// Projectiles fired by the player.
    pub const PLAYER_PROJECTILE: u32 = 1 << 2;
}

/// An axis-aligned collision volume in local space.
///
/// Two colliders `a` and `b` are tested when `a.mask & b.layer != 0` or
/// `b.mask & a.layer != 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbColliderComponent {
    /// The box around the object's origin, before scale.
    pub local: Aabb,
    /// The layer bits this collider lives on.
    pub layer: u32,
    /// The layers this collider reacts to.
    pub mask: u32,
}

impl AabbColliderComponent {
    /// A centered box with the given half-extents.
    pub fn from_half_extents(half_extents: Vec3, layer: u32, mask: u32) -> Self {
        Self {
            local: Aabb::from_center_half_extents(Vec3::ZERO, half_extents),
            layer,
            mask,
        }
    }

    /// The collider placed at `translation` and scaled by `scale`.
    #[must_use]
    pub fn world_aabb(&self, translation: Vec3, scale: Vec3) -> Aabb {
        Aabb::from_min_max(self.local.min.mul_elem(scale), self.local.max.mul_elem(scale))
            .translated(translation)
    }

    /// Whether this collider reacts to `other`.
    #[must_use]
    pub fn interacts_with(&self, other: &Self) -> bool {
        self.mask & other.layer != 0 || other.mask & self.layer != 0
    }
}

impl Default for AabbColliderComponent {
    fn default() -> Self {
        Self {
            local: Aabb::default(),
            layer: 0,
            mask: 0,
        }
    }
}

impl Component for AabbColliderComponent {}

/// The other objects this one overlapped during the current frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionStateComponent {
    hits: Vec<EntityId>,
}

impl CollisionStateComponent {
    /// Records an overlap with `other`.
    pub fn record(&mut self, other: EntityId) {
        if !self.hits.contains(&other) {
            self.hits.push(other);
        }
    }

    /// The objects hit this frame.
    #[must_use]
    pub fn hits(&self) -> &[EntityId] {
        &self.hits
    }

    /// Whether anything was hit this frame.
    #[must_use]
    pub fn is_colliding(&self) -> bool {
        !self.hits.is_empty()
    }

    /// Forgets every hit.
    pub fn clear(&mut self) {
        self.hits.clear();
    }
}

impl Component for CollisionStateComponent {
    const HOOKS: ComponentHooks = ComponentHooks::RELEASE;

    fn on_release(&mut self) {
        self.hits.clear();
    }
}

/// Marks objects that are returned to their pool as soon as they hit something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DespawnOnCollisionComponent;
impl Component for DespawnOnCollisionComponent {}
