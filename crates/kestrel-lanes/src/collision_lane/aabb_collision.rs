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

use kestrel_core::math::Aabb;
use kestrel_core::EntityId;
use kestrel_data::ecs::{AabbColliderComponent, CollisionStateComponent, TransformComponent};

use crate::{System, UpdateContext};

struct Candidate {
    entity: EntityId,
    aabb: Aabb,
    collider: AabbColliderComponent,
}

/// Finds overlapping colliders and records the hits.
///
/// Every pair of active colliders is tested once. A pair is considered when
/// one collider's mask contains the other's layer; both sides then record the
/// hit in their [`CollisionStateComponent`], if they have one.
#[derive(Default)]
pub struct AabbCollisionSystem {
    candidates: Vec<Candidate>,
    hits: Vec<(EntityId, EntityId)>,
}

impl AabbCollisionSystem {
    /// Creates the system.
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for AabbCollisionSystem {
    fn name(&self) -> &'static str {
        "AabbCollisionSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.candidates.clear();
        self.hits.clear();

        self.candidates.extend(
            ctx.world
                .view::<(AabbColliderComponent, TransformComponent)>()
                .enabled()
                .map(|(entity, (collider, transform))| Candidate {
                    entity,
                    aabb: collider.world_aabb(transform.translation(), transform.scale()),
                    collider: *collider,
                }),
        );

        for (i, a) in self.candidates.iter().enumerate() {
            for b in &self.candidates[i + 1..] {
                if a.collider.interacts_with(&b.collider) && a.aabb.intersects_aabb(&b.aabb) {
                    self.hits.push((a.entity, b.entity));
                }
            }
        }

        for &(a, b) in &self.hits {
            if let Some(state) = ctx.world.get_mut::<CollisionStateComponent>(a) {
                state.record(b);
            }
            if let Some(state) = ctx.world.get_mut::<CollisionStateComponent>(b) {
                state.record(a);
            }
        }

        if !self.hits.is_empty() {
            ctx.logger
                .trace(format_args!("{} overlapping pair(s)", self.hits.len()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use kestrel_core::math::Vec3;
    use kestrel_data::ecs::layers;
    use kestrel_data::state::MatchState;

    fn body(frame: &mut Frame, x: f32, layer: u32, mask: u32) -> EntityId {
        let entity = frame.world.create();
        let mut object = frame.world.game_object_mut(entity).expect("alive");
        object
            .with(TransformComponent::from_translation(Vec3::new(x, 0.0, 0.0)))
            .and_then(|o| {
                o.with(AabbColliderComponent::from_half_extents(
                    Vec3::splat(1.0),
                    layer,
                    mask,
                ))
            })
            .and_then(|o| o.with(CollisionStateComponent::default()))
            .expect("attach components");
        entity
    }

    #[test]
    fn test_overlapping_pair_records_both_sides() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let bullet = body(&mut frame, 0.0, layers::PLAYER_PROJECTILE, layers::ENEMY);
        let enemy = body(&mut frame, 1.5, layers::ENEMY, layers::PLAYER);
        let far = body(&mut frame, 10.0, layers::ENEMY, layers::PLAYER);

        // --- 2. ACT ---
        frame.run(&mut AabbCollisionSystem::new(), 0.016);

        // --- 3. ASSERT ---
        let hits = |e| {
            frame
                .world
                .get::<CollisionStateComponent>(e)
                .map(|c| c.hits().to_vec())
                .unwrap_or_default()
        };
        assert_eq!(hits(bullet), vec![enemy]);
        assert_eq!(hits(enemy), vec![bullet]);
        assert!(hits(far).is_empty());
    }

    #[test]
    fn test_layers_that_ignore_each_other_do_not_collide() {
        let mut frame = Frame::playing(MatchState::Playing);
        let a = body(&mut frame, 0.0, layers::ENEMY, layers::PLAYER);
        let b = body(&mut frame, 0.5, layers::ENEMY, layers::PLAYER);

        frame.run(&mut AabbCollisionSystem::new(), 0.016);

        for entity in [a, b] {
            let state = frame.world.get::<CollisionStateComponent>(entity).expect("state");
            assert!(!state.is_colliding());
        }
    }
}
