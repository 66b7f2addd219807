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

use kestrel_agents::command::DespawnCommand;
use kestrel_core::math::{Aabb, Vec2};
use kestrel_core::EntityId;
use kestrel_data::ecs::{
    AabbColliderComponent, BoundsBehavior, LevelBoundsBehaviorComponent, Move2DComponent,
    TransformComponent,
};

use crate::{System, UpdateContext};

/// How a box crosses the level bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsContact {
    /// The translation that moves the box back inside.
    pub correction: Vec2,
    /// Per axis, the inward direction of the crossed edge, or zero.
    pub normal: Vec2,
}

/// Tests `aabb` against the inside of `bounds`.
///
/// Returns `None` while the box is fully inside. A box wider than the bounds
/// is aligned with the minimum edge.
pub fn bounds_contact(aabb: &Aabb, bounds: &Aabb) -> Option<BoundsContact> {
    let mut correction = Vec2::ZERO;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        if aabb.min[axis] < bounds.min[axis] {
            correction[axis] = bounds.min[axis] - aabb.min[axis];
            normal[axis] = 1.0;
        } else if aabb.max[axis] > bounds.max[axis] {
            correction[axis] = bounds.max[axis] - aabb.max[axis];
            normal[axis] = -1.0;
        }
    }

    (normal != Vec2::ZERO).then_some(BoundsContact { correction, normal })
}

/// Keeps objects inside the level according to their [`BoundsBehavior`].
///
/// The object's extent is its collider placed by its transform, or a point
/// without a collider.
///
/// - `Bounce` pushes the object back by the overshoot and reflects the
///   crossing velocity component, scaled by the restitution.
/// - `Clamp` pushes it back and zeroes that component.
/// - `Despawn` queues a despawn.
#[derive(Debug, Clone, Default)]
pub struct LevelBoundsBehaviorSystem {
    scratch: Vec<EntityId>,
}

impl System for LevelBoundsBehaviorSystem {
    fn name(&self) -> &'static str {
        "LevelBoundsBehaviorSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let bounds = ctx.level.bounds();

        self.scratch.clear();
        self.scratch.extend(
            ctx.world
                .find::<(LevelBoundsBehaviorComponent, TransformComponent)>()
                .enabled(),
        );

        for &entity in &self.scratch {
            let Some(transform) = ctx.world.get::<TransformComponent>(entity) else {
                continue;
            };
            let extent = match ctx.world.get::<AabbColliderComponent>(entity) {
                Some(collider) => {
                    collider.world_aabb(transform.translation(), transform.scale())
                }
                None => Aabb::from_min_max(transform.translation(), transform.translation()),
            };
            let Some(contact) = bounds_contact(&extent, &bounds) else {
                continue;
            };
            let Some(behavior) = ctx.world.get::<LevelBoundsBehaviorComponent>(entity).copied()
            else {
                continue;
            };

            match behavior.behavior {
                BoundsBehavior::Despawn => {
                    ctx.commands.add(DespawnCommand::new(entity));
                    continue;
                }
                BoundsBehavior::Bounce | BoundsBehavior::Clamp => {}
            }

            if let Some(transform) = ctx.world.get_mut::<TransformComponent>(entity) {
                transform.translate(contact.correction.extend(0.0));
            }
            if let Some(movement) = ctx.world.get_mut::<Move2DComponent>(entity) {
                for axis in 0..2 {
                    if contact.normal[axis] == 0.0 {
                        continue;
                    }
                    movement.velocity[axis] = match behavior.behavior {
                        BoundsBehavior::Bounce => {
                            let speed = movement.velocity[axis].abs();
                            contact.normal[axis] * speed * behavior.restitution
                        }
                        _ => 0.0,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use approx::assert_relative_eq;
    use kestrel_agents::Command;
    use kestrel_core::math::Vec3;
    use kestrel_data::state::MatchState;

    fn bouncing_box(
        frame: &mut Frame,
        x: f32,
        velocity: Vec2,
        behavior: LevelBoundsBehaviorComponent,
    ) -> EntityId {
        let entity = frame.world.create();
        frame
            .world
            .attach(entity, TransformComponent::from_translation(Vec3::new(x, 0.0, 0.0)))
            .expect("attach transform");
        frame
            .world
            .attach(entity, Move2DComponent::with_velocity(velocity))
            .expect("attach movement");
        frame
            .world
            .attach(
                entity,
                AabbColliderComponent::from_half_extents(Vec3::new(1.0, 1.0, 0.0), 0, 0),
            )
            .expect("attach collider");
        frame.world.attach(entity, behavior).expect("attach behavior");
        entity
    }

    #[test]
    fn test_bounce_corrects_overshoot_and_reflects_velocity() {
        // --- 1. ARRANGE ---
        // The level spans [-50, 50]; the box spans [x - 1, x + 1].
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = bouncing_box(
            &mut frame,
            50.0,
            Vec2::new(5.0, 0.0),
            LevelBoundsBehaviorComponent::bounce(0.5),
        );

        // --- 2. ACT ---
        frame.run(&mut LevelBoundsBehaviorSystem::default(), 0.016);

        // --- 3. ASSERT ---
        let transform = frame.world.get::<TransformComponent>(entity).expect("transform");
        assert_relative_eq!(transform.translation().x, 49.0);
        let movement = frame.world.get::<Move2DComponent>(entity).expect("movement");
        assert_relative_eq!(movement.velocity.x, -2.5);
        assert_relative_eq!(movement.velocity.y, 0.0);
    }

    #[test]
    fn test_clamp_zeroes_crossing_component() {
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = bouncing_box(
            &mut frame,
            -50.5,
            Vec2::new(-3.0, 2.0),
            LevelBoundsBehaviorComponent::clamp(),
        );

        frame.run(&mut LevelBoundsBehaviorSystem::default(), 0.016);

        let transform = frame.world.get::<TransformComponent>(entity).expect("transform");
        assert_relative_eq!(transform.translation().x, -49.0);
        let movement = frame.world.get::<Move2DComponent>(entity).expect("movement");
        assert_eq!(movement.velocity, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_despawn_behavior_emits_command_and_keeps_position() {
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = bouncing_box(
            &mut frame,
            60.0,
            Vec2::X,
            LevelBoundsBehaviorComponent::despawn(),
        );

        frame.run(&mut LevelBoundsBehaviorSystem::default(), 0.016);

        assert_eq!(
            frame.take_commands(),
            vec![Command::Despawn(DespawnCommand::new(entity))]
        );
        assert_eq!(
            frame.world.get::<TransformComponent>(entity).map(|t| t.translation().x),
            Some(60.0)
        );
    }

    #[test]
    fn test_contact_is_none_inside() {
        let bounds = Aabb::from_min_max(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let inside = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        assert!(bounds_contact(&inside, &bounds).is_none());
    }
}
