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
use kestrel_core::EntityId;
use kestrel_data::ecs::{Filter, LifetimeComponent};

use crate::{System, UpdateContext};

/// Counts lifetimes down and despawns what expires.
#[derive(Default)]
pub struct LifetimeSystem {
    expired: Vec<EntityId>,
}

impl LifetimeSystem {
    /// Creates the system.
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for LifetimeSystem {
    fn name(&self) -> &'static str {
        "LifetimeSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let dt = ctx.delta_time;
        let expired = &mut self.expired;
        expired.clear();
        ctx.world
            .for_each_mut::<LifetimeComponent, _>(Filter::Enabled, |entity, lifetime| {
                if lifetime.tick(dt) {
                    expired.push(entity);
                }
            });

        for &entity in expired.iter() {
            ctx.commands.add(DespawnCommand::new(entity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use kestrel_agents::Command;
    use kestrel_data::state::MatchState;

    #[test]
    fn test_expiry_emits_a_single_despawn() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let bullet = frame.world.create();
        frame
            .world
            .attach(bullet, LifetimeComponent::new(0.5))
            .expect("attach lifetime");
        let mut system = LifetimeSystem::new();

        // --- 2. ACT ---
        frame.run(&mut system, 0.3);
        let before = frame.take_commands();
        frame.run(&mut system, 0.3);
        let at_expiry = frame.take_commands();
        frame.run(&mut system, 0.3);
        let after = frame.take_commands();

        // --- 3. ASSERT ---
        assert!(before.is_empty());
        assert_eq!(at_expiry.len(), 1);
        assert!(matches!(&at_expiry[0], Command::Despawn(cmd) if cmd.entity == bullet));
        assert!(after.is_empty(), "An expired lifetime stays silent until reacquired");
    }

    #[test]
    fn test_inactive_objects_do_not_age() {
        let mut frame = Frame::playing(MatchState::Playing);
        let bullet = frame.world.create();
        frame
            .world
            .attach(bullet, LifetimeComponent::new(0.5))
            .expect("attach lifetime");
        frame.world.set_active(bullet, false);

        frame.run(&mut LifetimeSystem::new(), 1.0);

        assert!(frame.take_commands().is_empty());
        let remaining = frame.world.get::<LifetimeComponent>(bullet).map(|l| l.remaining());
        assert_eq!(remaining, Some(0.5));
    }

    #[test]
    fn test_zero_lifetime_expires_on_first_tick() {
        let mut frame = Frame::playing(MatchState::Playing);
        let flash = frame.world.create();
        frame
            .world
            .attach(flash, LifetimeComponent::new(0.0))
            .expect("attach lifetime");
        let mut system = LifetimeSystem::new();

        let mut despawns = 0;
        for _ in 0..10 {
            frame.run(&mut system, 0.1);
            despawns += frame.take_commands().len();
        }

        assert_eq!(despawns, 1);
    }
}
