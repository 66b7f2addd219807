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

use kestrel_agents::command::SpawnCommand;
use kestrel_core::input::GamepadButton;
use kestrel_core::math::{Vec2, Vec3};
use kestrel_data::ecs::{Filter, PlayerComponent, TransformComponent, WeaponComponent};
use kestrel_data::pool::PoolId;
use kestrel_data::state::MatchState;

use crate::{System, UpdateContext};

struct Shot {
    pool: PoolId,
    origin: Vec3,
    direction: Vec2,
    speed: f32,
}

/// Cools weapons down and fires the players' weapons while the fire button is held.
///
/// Players only fire while the match is `Playing`.
///
/// A shot is a one-object [`SpawnCommand`] on the weapon's projectile pool,
/// placed at the shooter and aimed along the weapon's facing.
pub struct WeaponSystem {
    fire_button: GamepadButton,
    shots: Vec<Shot>,
}

impl WeaponSystem {
    /// Fires with `fire_button`.
    pub fn new(fire_button: GamepadButton) -> Self {
        Self {
            fire_button,
            shots: Vec::new(),
        }
    }
}

impl Default for WeaponSystem {
    fn default() -> Self {
        Self::new(GamepadButton::A)
    }
}

impl System for WeaponSystem {
    fn name(&self) -> &'static str {
        "WeaponSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let dt = ctx.delta_time;
        ctx.world
            .for_each_mut::<WeaponComponent, _>(Filter::Enabled, |_, weapon| weapon.tick(dt));

        self.shots.clear();
        if ctx.session.match_state() != MatchState::Playing
            || !ctx.input.gamepad.is_down(self.fire_button)
        {
            return;
        }

        let shots = &mut self.shots;
        ctx.world.for_each_mut::<(PlayerComponent, WeaponComponent, TransformComponent), _>(
            Filter::Enabled,
            |_, (_, weapon, transform)| {
                if !weapon.is_ready() {
                    return;
                }
                weapon.trigger();
                shots.push(Shot {
                    pool: weapon.projectile_pool,
                    origin: transform.translation(),
                    direction: weapon.facing,
                    speed: weapon.muzzle_speed,
                });
            },
        );

        for shot in &self.shots {
            ctx.commands.add(
                SpawnCommand::new(shot.pool, 1)
                    .at(shot.origin)
                    .toward(shot.direction)
                    .with_speed(shot.speed),
            );
        }
    }
}
