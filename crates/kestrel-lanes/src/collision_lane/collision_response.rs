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

use kestrel_agents::command::{DespawnCommand, StateCommand, UpdateScoreCommand};
use kestrel_core::EntityId;
use kestrel_data::ecs::{
    CollisionStateComponent, DespawnOnCollisionComponent, PlayerComponent, ScoreValueComponent,
    World,
};
use kestrel_data::state::{MatchState, MatchStateTransitionId};

use crate::{System, UpdateContext};

/// Turns this frame's recorded hits into commands.
///
/// - A hit object carrying [`DespawnOnCollisionComponent`] is despawned.
/// - If it also carries a [`ScoreValueComponent`] and was not destroyed by
///   ramming a player, its points go to the score pool while the match is
///   playing.
/// - A hit player loses one life and reports [`MatchStateTransitionId::PlayerDied`]
///   while the match is playing.
#[derive(Default)]
pub struct CollisionResponseSystem {
    scratch: Vec<EntityId>,
}

impl CollisionResponseSystem {
    /// Creates the system.
    pub fn new() -> Self {
        Self::default()
    }

    fn touched_player(world: &World, hits: &[EntityId]) -> bool {
        hits.iter().any(|&other| world.has::<PlayerComponent>(other))
    }
}

impl System for CollisionResponseSystem {
    fn name(&self) -> &'static str {
        "CollisionResponseSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.scratch.clear();
        self.scratch.extend(
            ctx.world
                .view::<CollisionStateComponent>()
                .enabled()
                .filter(|(_, state)| state.is_colliding())
                .map(|(entity, _)| entity),
        );

        let playing = ctx.session.match_state() == MatchState::Playing;
        let mut player_died = false;
        for &entity in &self.scratch {
            let Some(hits) = ctx.world.get::<CollisionStateComponent>(entity) else {
                continue;
            };

            if ctx.world.has::<DespawnOnCollisionComponent>(entity) {
                if let Some(value) = ctx.world.get::<ScoreValueComponent>(entity) {
                    if playing && !Self::touched_player(ctx.world, hits.hits()) {
                        ctx.commands.add(
                            UpdateScoreCommand::new(value.pool, value.points).from_source(entity),
                        );
                    }
                }
                ctx.commands.add(DespawnCommand::new(entity));
            }

            if !playing {
                continue;
            }
            if let Some(player) = ctx.world.get_mut::<PlayerComponent>(entity) {
                player.lives = player.lives.saturating_sub(1);
                ctx.logger
                    .debug(format_args!("{entity:?} was hit, {} lives left", player.lives));
                player_died = true;
            }
        }

        if player_died {
            ctx.commands.add(StateCommand::new(
                MatchState::Playing,
                MatchStateTransitionId::PlayerDied,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Frame;
    use kestrel_agents::Command;
    use kestrel_data::score::ScorePoolId;

    fn hit(frame: &mut Frame, entity: EntityId, other: EntityId) {
        frame
            .world
            .get_mut::<CollisionStateComponent>(entity)
            .expect("collision state")
            .record(other);
    }

    fn spawn_enemy(frame: &mut Frame, points: i64) -> EntityId {
        let enemy = frame.world.create();
        frame
            .world
            .game_object_mut(enemy)
            .expect("alive")
            .with(CollisionStateComponent::default())
            .and_then(|o| o.with(DespawnOnCollisionComponent))
            .and_then(|o| o.with(ScoreValueComponent { points, pool: ScorePoolId(0) }))
            .expect("attach");
        enemy
    }

    fn spawn_player(frame: &mut Frame, lives: u32) -> EntityId {
        let player = frame.world.create();
        frame
            .world
            .game_object_mut(player)
            .expect("alive")
            .with(CollisionStateComponent::default())
            .and_then(|o| o.with(PlayerComponent::new(lives)))
            .expect("attach");
        player
    }

    #[test]
    fn test_shot_enemy_scores_and_despawns() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let enemy = spawn_enemy(&mut frame, 100);
        let bullet = frame.world.create();
        hit(&mut frame, enemy, bullet);

        // --- 2. ACT ---
        frame.run(&mut CollisionResponseSystem::new(), 0.016);

        // --- 3. ASSERT ---
        let commands = frame.take_commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            &commands[0],
            Command::UpdateScore(cmd) if cmd.context.points == 100
                && cmd.context.source == Some(enemy)
        ));
        assert!(matches!(&commands[1], Command::Despawn(cmd) if cmd.entity == enemy));
    }

    #[test]
    fn test_rammed_player_loses_a_life_without_scoring() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::Playing);
        let enemy = spawn_enemy(&mut frame, 100);
        let player = spawn_player(&mut frame, 3);
        hit(&mut frame, enemy, player);
        hit(&mut frame, player, enemy);

        // --- 2. ACT ---
        frame.run(&mut CollisionResponseSystem::new(), 0.016);

        // --- 3. ASSERT ---
        let lives = frame.world.get::<PlayerComponent>(player).map(|p| p.lives);
        assert_eq!(lives, Some(2));
        let commands = frame.take_commands();
        assert!(!commands.iter().any(|c| matches!(c, Command::UpdateScore(_))));
        assert!(commands.iter().any(|c| matches!(c, Command::Despawn(d) if d.entity == enemy)));
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::MatchState(s) if s.transition == MatchStateTransitionId::PlayerDied
        )));
    }

    #[test]
    fn test_player_is_invulnerable_outside_playing() {
        let mut frame = Frame::playing(MatchState::Countdown);
        let player = spawn_player(&mut frame, 3);
        let enemy = frame.world.create();
        hit(&mut frame, player, enemy);

        frame.run(&mut CollisionResponseSystem::new(), 0.016);

        let lives = frame.world.get::<PlayerComponent>(player).map(|p| p.lives);
        assert_eq!(lives, Some(3));
        assert!(frame.take_commands().is_empty());
    }

    #[test]
    fn test_no_score_after_game_over() {
        // --- 1. ARRANGE ---
        let mut frame = Frame::playing(MatchState::GameOver);
        let enemy = spawn_enemy(&mut frame, 100);
        let bullet = frame.world.create();
        hit(&mut frame, enemy, bullet);

        // --- 2. ACT ---
        frame.run(&mut CollisionResponseSystem::new(), 0.016);

        // --- 3. ASSERT ---
        let commands = frame.take_commands();
        assert_eq!(commands.len(), 1, "Only the despawn survives: {commands:?}");
        assert!(matches!(&commands[0], Command::Despawn(cmd) if cmd.entity == enemy));
    }
}
