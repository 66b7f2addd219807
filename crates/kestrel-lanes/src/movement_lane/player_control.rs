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

use kestrel_data::ecs::{Filter, Move2DComponent, PlayerComponent};

use crate::{System, UpdateContext};

/// Feeds the left stick into the steering input of every active player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerControlSystem;

impl System for PlayerControlSystem {
    fn name(&self) -> &'static str {
        "PlayerControlSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let stick = ctx.input.gamepad.left_stick.clamp_length(1.0);
        ctx.world.for_each_mut::<(PlayerComponent, Move2DComponent), _>(
            Filter::Enabled,
            |_, (_, movement)| movement.input = stick,
        );
    }
}
