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
use serde::{Deserialize, Serialize};

use crate::ecs::{Component, ComponentHooks};

/// Planar movement state.
///
/// `velocity` is integrated into the transform every frame. When `input` is
/// non-zero the velocity accelerates toward `input * speed`; otherwise it is
/// damped toward zero. A zero `acceleration` makes the object keep whatever
/// velocity it was given, which is how projectiles and bouncing enemies move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move2DComponent {
    /// Current velocity in units per second.
    pub velocity: Vec2,
    /// Steering input, typically a stick direction with length `<= 1`.
    pub input: Vec2,
    /// Target speed reached at full input.
    pub speed: f32,
    /// How fast the velocity converges to the target, in units per second squared.
    pub acceleration: f32,
    /// Fraction of velocity removed per second without input, in `[0, 1]`.
    pub dampening: f32,
    /// Hard speed cap. `f32::INFINITY` disables it.
    pub max_speed: f32,
}

impl Move2DComponent {
    /// A component that keeps a constant velocity.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// A steerable component.
    pub fn steerable(speed: f32, acceleration: f32, dampening: f32) -> Self {
        Self {
            speed,
            acceleration,
            dampening,
            max_speed: speed,
            ..Self::default()
        }
    }

    /// Whether the component reacts to input.
    #[must_use]
    pub fn is_steerable(&self) -> bool {
        self.acceleration > 0.0
    }
}

impl Default for Move2DComponent {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            input: Vec2::ZERO,
            speed: 0.0,
            acceleration: 0.0,
            dampening: 0.0,
            max_speed: f32::INFINITY,
        }
    }
}

impl Component for Move2DComponent {
    const HOOKS: ComponentHooks = ComponentHooks::RELEASE;

    fn on_release(&mut self) {
        self.velocity = Vec2::ZERO;
        self.input = Vec2::ZERO;
    }
}

/// What happens when an object leaves the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundsBehavior {
    /// Pushed back inside, the crossing velocity component is reflected.
    #[default]
    Bounce,
    /// Pushed back inside, the crossing velocity component is zeroed.
    Clamp,
    /// Returned to its pool.
    Despawn,
}

/// Reaction of an object to the level bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBoundsBehaviorComponent {
    /// The reaction.
    pub behavior: BoundsBehavior,
    /// Scales the reflected velocity of [`BoundsBehavior::Bounce`]. `1.0` is a
    /// perfectly elastic bounce.
    pub restitution: f32,
}

impl LevelBoundsBehaviorComponent {
    /// A bouncing reaction.
    pub fn bounce(restitution: f32) -> Self {
        Self {
            behavior: BoundsBehavior::Bounce,
            restitution,
        }
    }

    /// A clamping reaction.
    pub fn clamp() -> Self {
        Self {
            behavior: BoundsBehavior::Clamp,
            restitution: 0.0,
        }
    }

    /// A despawning reaction.
    pub fn despawn() -> Self {
        Self {
            behavior: BoundsBehavior::Despawn,
            restitution: 0.0,
        }
    }
}

impl Default for LevelBoundsBehaviorComponent {
    fn default() -> Self {
        Self::bounce(1.0)
    }
}

impl Component for LevelBoundsBehaviorComponent {}
