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

use kestrel_core::math::{Vec2, TAU};
use kestrel_data::ecs::{GameObjectMut, Move2DComponent, WeaponComponent};
use rand::rngs::StdRng;
use rand::Rng;

use super::SpawnPlacement;

/// Prepares a freshly acquired and placed entity for gameplay.
pub trait SpawnInitializer {
    /// Adjusts the entity's components.
    fn initialize(
        &self,
        object: &mut GameObjectMut<'_>,
        placement: &SpawnPlacement<'_>,
        rng: &mut StdRng,
    );
}

/// Leaves the entity as its `on_acquire` hooks left it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInitializer;

impl SpawnInitializer for NoopInitializer {
    fn initialize(
        &self,
        _object: &mut GameObjectMut<'_>,
        _placement: &SpawnPlacement<'_>,
        _rng: &mut StdRng,
    ) {
    }
}

/// Where a [`MoveInitializer`] takes its heading from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDirection {
    /// The command's direction, or the given one if the command has none.
    FromContextOr(Vec2),
    /// Always this heading.
    Fixed(Vec2),
    /// A uniformly random heading.
    Random,
}

/// Sets the initial velocity of a [`Move2DComponent`].
///
/// A speed carried by the spawn command overrides `speed`. Entities without
/// the component are left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveInitializer {
    /// Initial speed in units per second.
    pub speed: f32,
    /// Heading source.
    pub direction: MoveDirection,
    /// Also point the entity's weapon along the heading.
    pub aim_weapon: bool,
}

impl MoveInitializer {
    /// Moves along the command direction, or `fallback` without one.
    pub fn from_context(speed: f32, fallback: Vec2) -> Self {
        Self {
            speed,
            direction: MoveDirection::FromContextOr(fallback),
            aim_weapon: false,
        }
    }

    /// Moves along a random heading.
    pub fn random(speed: f32) -> Self {
        Self {
            speed,
            direction: MoveDirection::Random,
            aim_weapon: false,
        }
    }

    /// Moves along `direction`.
    pub fn fixed(speed: f32, direction: Vec2) -> Self {
        Self {
            speed,
            direction: MoveDirection::Fixed(direction),
            aim_weapon: false,
        }
    }

    /// Points the weapon along the heading as well.
    #[must_use]
    pub fn aiming(mut self) -> Self {
        self.aim_weapon = true;
        self
    }

    fn heading(&self, placement: &SpawnPlacement<'_>, rng: &mut StdRng) -> Vec2 {
        let heading = match self.direction {
            MoveDirection::FromContextOr(fallback) => {
                placement.context.direction.unwrap_or(fallback)
            }
            MoveDirection::Fixed(direction) => direction,
            MoveDirection::Random => Vec2::from_angle(rng.random_range(0.0..TAU)),
        };
        heading.normalize()
    }
}

impl SpawnInitializer for MoveInitializer {
    fn initialize(
        &self,
        object: &mut GameObjectMut<'_>,
        placement: &SpawnPlacement<'_>,
        rng: &mut StdRng,
    ) {
        let heading = self.heading(placement, rng);
        let speed = placement.context.speed.unwrap_or(self.speed);
        if let Some(movement) = object.get_mut::<Move2DComponent>() {
            movement.velocity = heading * speed;
        }
        if self.aim_weapon {
            if let Some(weapon) = object.get_mut::<WeaponComponent>() {
                weapon.facing = heading;
            }
        }
    }
}

/// Runs several initializers in order.
#[derive(Default)]
pub struct ComposedInitializer {
    steps: Vec<Box<dyn SpawnInitializer>>,
}

impl ComposedInitializer {
    /// An empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, step: impl SpawnInitializer + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl SpawnInitializer for ComposedInitializer {
    fn initialize(
        &self,
        object: &mut GameObjectMut<'_>,
        placement: &SpawnPlacement<'_>,
        rng: &mut StdRng,
    ) {
        for step in &self.steps {
            step.initialize(object, placement, rng);
        }
    }
}
