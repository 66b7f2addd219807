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

// Kestrel Sandbox
// Runs a scripted match headless and logs what happens.

use anyhow::{Context, Result};
use kestrel_agents::command::ManagerContext;
use kestrel_agents::score::ScoreListener;
use kestrel_sdk::prelude::*;

const DRONES: PoolId = PoolId(1);
const BULLETS: PoolId = PoolId(2);
const POINTS: ScorePoolId = ScorePoolId(0);

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 60 * 45;

fn drone_template(object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
    object
        .with(TransformComponent::default())?
        .with(Move2DComponent::default())?
        .with(LevelBoundsBehaviorComponent::despawn())?
        .with(AabbColliderComponent::from_half_extents(
            Vec3::new(1.5, 1.0, 0.5),
            layers::ENEMY,
            layers::PLAYER | layers::PLAYER_PROJECTILE,
        ))?
        .with(CollisionStateComponent::default())?
        .with(DespawnOnCollisionComponent)?
        .with(ScoreValueComponent {
            points: 50,
            pool: POINTS,
        })?;
    Ok(())
}

fn bullet_template(object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
    object
        .with(TransformComponent::default())?
        .with(Move2DComponent::default())?
        .with(LevelBoundsBehaviorComponent::despawn())?
        .with(AabbColliderComponent::from_half_extents(
            Vec3::splat(0.3),
            layers::PLAYER_PROJECTILE,
            layers::ENEMY,
        ))?
        .with(CollisionStateComponent::default())?
        .with(DespawnOnCollisionComponent)?
        .with(LifetimeComponent::new(3.0))?;
    Ok(())
}

fn spawn_player(game: &mut GameWorld) -> Result<EntityId> {
    let player = game.world_mut().create();
    game.world_mut()
        .game_object_mut(player)
        .context("player vanished right after creation")?
        .with(TransformComponent::from_translation(Vec3::new(0.0, -24.0, 0.0)))?
        .with(Move2DComponent::steerable(18.0, 90.0, 10.0))?
        .with(LevelBoundsBehaviorComponent::clamp())?
        .with(PlayerComponent::new(3))?
        .with(WeaponComponent::new(BULLETS, 0.2, 45.0))?
        .with(AabbColliderComponent::from_half_extents(
            Vec3::splat(1.0),
            layers::PLAYER,
            layers::ENEMY,
        ))?
        .with(CollisionStateComponent::default())?;
    game.link_scene_node(player, None)?;
    Ok(player)
}

/// Logs every score change.
struct ScoreLog;

impl ScoreListener for ScoreLog {
    fn on_score_changed(
        &mut self,
        ctx: &mut ManagerContext<'_>,
        pool: ScorePoolId,
        old_total: i64,
        new_total: i64,
    ) {
        ctx.logger
            .info(format_args!("score {pool}: {old_total} -> {new_total}"));
    }
}

/// Scripted input: press Start once on the title, then weave and fire.
fn scripted_input(previous: &InputSnapshot, frame: u32, session: &Session) -> InputSnapshot {
    let mut buttons = ButtonSet::EMPTY;
    if session.game_state() == GameState::Title && frame % 2 == 0 {
        buttons.insert(GamepadButton::Start);
    }
    if session.match_state() == MatchState::Playing {
        buttons.insert(GamepadButton::A);
    }
    let t = frame as f32 * FRAME_TIME;
    let stick = Vec2::new((t * 0.8).sin(), 0.0);
    previous.advance(stick, Vec2::ZERO, buttons)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_ron_str(include_str!("../assets/shooter.ron"))
        .context("loading the sandbox config")?;
    let mut game = GameWorldBuilder::new(config.clone(), Logger::default())
        .template(DRONES, drone_template)
        .template(BULLETS, bullet_template)
        .initializer(DRONES, MoveInitializer::fixed(6.0, Vec2::new(0.0, -1.0)))
        .initializer(BULLETS, MoveInitializer::from_context(45.0, Vec2::Y))
        .score_listener(ScoreLog)
        .with_scene_nodes()
        .build()
        .context("building the sandbox world")?;
    let player = spawn_player(&mut game)?;
    let mut game_loop = GameLoop::from_config(&config);

    let mut input = InputSnapshot::empty();
    for frame in 0..FRAMES {
        input = scripted_input(&input, frame, game.session());
        game_loop.update(&mut game, &input, FRAME_TIME);
    }

    let lives = game
        .world()
        .get::<PlayerComponent>(player)
        .map_or(0, |p| p.lives);
    let high_score = game.scores().get(POINTS).map_or(0, |p| p.high_score);
    log::info!(
        "{} frames, {:.1}s simulated: state {:?}/{:?}, score {}, high score {}, lives {}",
        game.session().frame(),
        game.session().elapsed_seconds(),
        game.session().game_state(),
        game.session().match_state(),
        game.score(POINTS),
        high_score,
        lives
    );
    Ok(())
}
