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

use crate::ecs::{Component, ComponentHooks};
use crate::pool::PoolId;
use crate::score::ScorePoolId;

/// Points awarded when this object is destroyed by a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreValueComponent {
    /// The points awarded.
    pub points: i64,
    /// The score pool that receives them.
    pub pool: ScorePoolId,
}
impl Component for ScoreValueComponent {}

/// Limits how long an object stays alive after being spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeComponent {
    duration: f32,
    remaining: f32,
    expired: bool,
}

impl LifetimeComponent {
    /// A lifetime of `seconds`.
    ///
    /// A zero lifetime expires on the first tick. Negative durations are a
    /// caller bug and are treated as zero.
    pub fn new(seconds: f32) -> Self {
        debug_assert!(seconds >= 0.0, "negative lifetime {seconds}");
        let seconds = seconds.max(0.0);
        Self {
            duration: seconds,
            remaining: seconds,
            expired: false,
        }
    }

    /// Seconds left before expiry.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Counts down by `dt` and returns `true` on the tick the lifetime expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.remaining -= dt;
        self.expired = self.remaining <= 0.0;
        self.expired
    }
}

impl Component for LifetimeComponent {
    const HOOKS: ComponentHooks = ComponentHooks::ACQUIRE;

    fn on_acquire(&mut self) {
        self.remaining = self.duration;
        self.expired = false;
    }
}

/// Marks the player-controlled ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerComponent {
    /// Lives left.
    pub lives: u32,
    /// Lives at the start of a match.
    pub starting_lives: u32,
}

impl PlayerComponent {
    /// A player with `lives` lives.
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            starting_lives: lives,
        }
    }

    /// Restores the starting lives.
    pub fn reset(&mut self) {
        self.lives = self.starting_lives;
    }
}

impl Component for PlayerComponent {
    const HOOKS: ComponentHooks = ComponentHooks::ACQUIRE;

    fn on_acquire(&mut self) {
        self.reset();
    }
}

/// A gun that spawns projectiles from a pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponComponent {
    /// The pool projectiles are taken from.
    pub projectile_pool: PoolId,
    /// Seconds between two shots.
    pub cooldown: f32,
    /// Speed given to each projectile.
    pub muzzle_speed: f32,
    /// Direction of fire, kept normalized.
    pub facing: Vec2,
    remaining_cooldown: f32,
}

impl WeaponComponent {
    /// A weapon firing along +Y.
    pub fn new(projectile_pool: PoolId, cooldown: f32, muzzle_speed: f32) -> Self {
        Self {
            projectile_pool,
            cooldown,
            muzzle_speed,
            facing: Vec2::Y,
            remaining_cooldown: 0.0,
        }
    }

    /// Whether the weapon can fire right now.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown <= 0.0
    }

    /// Advances the cooldown timer.
    pub fn tick(&mut self, dt: f32) {
        self.remaining_cooldown = (self.remaining_cooldown - dt).max(0.0);
    }

    /// Restarts the cooldown after a shot.
    pub fn trigger(&mut self) {
        self.remaining_cooldown = self.cooldown;
    }
}

impl Component for WeaponComponent {
    const HOOKS: ComponentHooks = ComponentHooks::RELEASE;

    fn on_release(&mut self) {
        self.remaining_cooldown = 0.0;
    }
}
