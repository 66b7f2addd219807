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

use kestrel_agents::spawn::{SpawnRule, SpawnTimer};
use kestrel_data::ecs::PoolMembershipComponent;
use kestrel_data::pool::PoolId;
use kestrel_data::state::MatchState;

use crate::{System, UpdateContext};

/// Emits spawn waves from interval-based [`SpawnRule`]s.
///
/// Timers only advance while the match is `Playing` and restart whenever a
/// new match warms up or counts down. A wave is trimmed so the pool never
/// exceeds its rule's `max_active`.
#[derive(Debug, Clone, Default)]
pub struct SpawnSchedulingSystem {
    timers: Vec<SpawnTimer>,
}

impl SpawnSchedulingSystem {
    /// Creates the system for the given rules.
    pub fn new(rules: impl IntoIterator<Item = SpawnRule>) -> Self {
        Self {
            timers: rules.into_iter().map(SpawnTimer::new).collect(),
        }
    }

    /// Adds a rule.
    pub fn add_rule(&mut self, rule: SpawnRule) {
        self.timers.push(SpawnTimer::new(rule));
    }

    /// The timers in rule order.
    pub fn timers(&self) -> &[SpawnTimer] {
        &self.timers
    }

    fn active_in(ctx: &UpdateContext<'_>, pool: PoolId) -> usize {
        ctx.world
            .view::<PoolMembershipComponent>()
            .enabled()
            .filter(|(_, membership)| membership.pool == pool)
            .count()
    }
}

impl System for SpawnSchedulingSystem {
    fn name(&self) -> &'static str {
        "SpawnSchedulingSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        match ctx.session.match_state() {
            MatchState::Playing => {}
            MatchState::Warmup | MatchState::Countdown => {
                self.timers.iter_mut().for_each(SpawnTimer::reset);
                return;
            }
            _ => return,
        }

        for timer in &mut self.timers {
            let waves = timer.tick(ctx.delta_time);
            if waves == 0 {
                continue;
            }

            let rule = *timer.rule();
            let mut command = rule.command();
            command.amount = command.amount.saturating_mul(waves);
            if let Some(cap) = rule.max_active {
                let active = Self::active_in(ctx, rule.pool);
                let room = cap.saturating_sub(active);
                if room == 0 {
                    ctx.logger.trace(format_args!(
                        "Wave for {} skipped: {} of {} active",
                        rule.pool, active, cap
                    ));
                    continue;
                }
                command.amount = command.amount.min(u32::try_from(room).unwrap_or(u32::MAX));
            }

            ctx.commands.add(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use kestrel_agents::command::SpawnCommand;
    use kestrel_agents::Command;

    #[test]
    fn test_waves_follow_the_interval_while_playing() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let mut system =
            SpawnSchedulingSystem::new([SpawnRule::every(PoolId(2), 0.5).amount(3)]);

        // --- 2. ACT ---
        frame.run(&mut system, 0.2);
        let first = frame.take_commands();
        frame.run(&mut system, 0.2);
        let second = frame.take_commands();

        // --- 3. ASSERT ---
        assert_eq!(first, vec![Command::Spawn(SpawnCommand::new(PoolId(2), 3))]);
        assert!(second.is_empty(), "Next wave is due after a full interval");
    }

    #[test]
    fn test_timers_hold_outside_of_play() {
        let mut frame = Frame::playing(MatchState::PlayerDefeated);
        let mut system =
            SpawnSchedulingSystem::new([SpawnRule::every(PoolId(0), 1.0).after(1.0)]);

        frame.run(&mut system, 5.0);

        assert!(frame.take_commands().is_empty());
        assert_eq!(system.timers()[0].until_next(), 1.0);
    }

    #[test]
    fn test_cap_skips_waves() {
        let mut frame = Frame::playing(MatchState::Playing);
        let entity = frame.world.create();
        frame
            .world
            .attach(entity, PoolMembershipComponent { pool: PoolId(0) })
            .expect("attach membership");
        let mut system =
            SpawnSchedulingSystem::new([SpawnRule::every(PoolId(0), 1.0).max_active(1)]);

        frame.run(&mut system, 0.1);

        assert!(frame.take_commands().is_empty());
    }

    #[test]
    fn test_cap_trims_the_wave() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        for _ in 0..3 {
            let entity = frame.world.create();
            frame
                .world
                .attach(entity, PoolMembershipComponent { pool: PoolId(2) })
                .expect("attach membership");
        }
        let rule = SpawnRule::every(PoolId(2), 0.5).amount(3).max_active(4);
        let mut system = SpawnSchedulingSystem::new([rule]);

        // --- 2. ACT ---
        // The first wave is due at once and a second one at 0.5s.
        frame.run(&mut system, 0.6);

        // --- 3. ASSERT ---
        assert_eq!(
            frame.take_commands(),
            vec![Command::Spawn(SpawnCommand::new(PoolId(2), 1))]
        );
    }
}
