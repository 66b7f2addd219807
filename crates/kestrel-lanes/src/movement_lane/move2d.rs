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

use kestrel_core::math::Vec2;
use kestrel_data::ecs::{Filter, Move2DComponent, TransformComponent};

use crate::{System, UpdateContext};

/// Advances a movement component's velocity by `dt` seconds.
///
/// Steerable components accelerate toward `input * speed` and slow down by
/// `dampening` per second once the input is released. Every component is
/// then capped to its `max_speed`.
pub fn integrate_velocity(movement: &mut Move2DComponent, dt: f32) {
    if movement.is_steerable() {
        let input = movement.input.clamp_length(1.0);
        if input.length_squared() > 0.0 {
            let target = input * movement.speed;
            let step = (target - movement.velocity).clamp_length(movement.acceleration * dt);
            movement.velocity += step;
        } else if movement.dampening > 0.0 {
            let factor = (1.0 - movement.dampening * dt).max(0.0);
            movement.velocity = movement.velocity * factor;
        }
    }
    movement.velocity = movement.velocity.clamp_length(movement.max_speed);
}

/// Integrates 2D movement and translates transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Move2DSystem;

impl System for Move2DSystem {
    fn name(&self) -> &'static str {
        "Move2DSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let dt = ctx.delta_time;
        ctx.world.for_each_mut::<(Move2DComponent, TransformComponent), _>(
            Filter::Enabled,
            |_, (movement, transform)| {
                integrate_velocity(movement, dt);
                if movement.velocity != Vec2::ZERO {
                    transform.translate((movement.velocity * dt).extend(0.0));
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use approx::assert_relative_eq;
    use kestrel_core::math::Vec3;
    use kestrel_data::state::MatchState;

    #[test]
    fn test_constant_velocity_translates_and_marks_dirty() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = frame.world.create();
        frame
            .world
            .attach(entity, Move2DComponent::with_velocity(Vec2::new(2.0, -4.0)))
            .expect("attach movement");
        let mut transform = TransformComponent::default();
        transform.clear_dirty();
        frame.world.attach(entity, transform).expect("attach transform");

        // --- 2. ACT ---
        frame.run(&mut Move2DSystem, 0.5);

        // --- 3. ASSERT ---
        let transform = frame.world.get::<TransformComponent>(entity).expect("transform");
        assert_eq!(transform.translation(), Vec3::new(1.0, -2.0, 0.0));
        assert!(transform.is_dirty());
    }

    #[test]
    fn test_steering_accelerates_then_caps() {
        let mut movement = Move2DComponent::steerable(4.0, 10.0, 0.0);
        movement.input = Vec2::X;

        integrate_velocity(&mut movement, 0.1);
        assert_relative_eq!(movement.velocity.x, 1.0, epsilon = 1e-5);

        integrate_velocity(&mut movement, 1.0);
        assert_relative_eq!(movement.velocity.x, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_released_input_dampens() {
        let mut movement = Move2DComponent::steerable(4.0, 10.0, 2.0);
        movement.velocity = Vec2::new(4.0, 0.0);

        integrate_velocity(&mut movement, 0.25);

        assert_relative_eq!(movement.velocity.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_inactive_entities_do_not_move() {
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = frame.world.create();
        frame
            .world
            .attach(entity, Move2DComponent::with_velocity(Vec2::X))
            .expect("attach movement");
        frame
            .world
            .attach(entity, TransformComponent::default())
            .expect("attach transform");
        frame.world.set_active(entity, false);

        frame.run(&mut Move2DSystem, 1.0);

        assert_eq!(
            frame.world.get::<TransformComponent>(entity).map(|t| t.translation()),
            Some(Vec3::ZERO)
        );
    }
}
