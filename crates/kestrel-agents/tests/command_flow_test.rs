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

use std::cell::RefCell;
use std::rc::Rc;

use kestrel_agents::command::{DespawnCommand, SpawnCommand, StateCommand};
use kestrel_agents::score::ScoreManager;
use kestrel_agents::spawn::SpawnManager;
use kestrel_agents::state::{StateListener, StateManager};
use kestrel_agents::{CommandBuffer, CommandDispatcher, DispatchError, ManagerContext};
use kestrel_core::Logger;
use kestrel_data::ecs::{GameObjectMut, TransformComponent, World};
use kestrel_data::level::Level;
use kestrel_data::pool::{PoolId, PoolRegistry};
use kestrel_data::score::ScoreBoard;
use kestrel_data::session::Session;
use kestrel_data::state::{GameState, GameStateTransitionId, MatchState, MatchStateTransitionId};
use kestrel_data::EcsError;

const BULLETS: PoolId = PoolId(1);

fn bullet_template(object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
    object.attach(TransformComponent::default())?;
    Ok(())
}

/// Owns everything a commit needs.
struct Harness {
    world: World,
    pools: PoolRegistry,
    session: Session,
    scores: ScoreBoard,
    level: Level,
    logger: Logger,
    dispatcher: CommandDispatcher,
    buffer: CommandBuffer,
}

impl Harness {
    fn new(pool_size: usize) -> anyhow::Result<Self> {
        let mut world = World::new();
        let mut pools = PoolRegistry::new();
        pools.create_pool(&mut world, BULLETS, pool_size, &bullet_template)?;

        let mut dispatcher = CommandDispatcher::new(Logger::disabled());
        dispatcher.register(SpawnManager::new(42, Logger::disabled()))?;

        Ok(Self {
            world,
            pools,
            session: Session::new(),
            scores: ScoreBoard::new(),
            level: Level::default(),
            logger: Logger::disabled(),
            dispatcher,
            buffer: CommandBuffer::new(),
        })
    }

    fn commit(&mut self) -> kestrel_agents::command::CommitReport {
        let mut ctx = ManagerContext {
            world: &mut self.world,
            pools: &mut self.pools,
            session: &mut self.session,
            scores: &mut self.scores,
            level: &self.level,
            logger: &self.logger,
        };
        self.dispatcher.commit(&mut self.buffer, &mut ctx)
    }
}

/// Records every callback it receives.
#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl StateListener<GameState> for Journal {
    fn on_state_exit(&mut self, _ctx: &mut ManagerContext<'_>, from: GameState) {
        self.0.borrow_mut().push(format!("exit {:?}", from));
    }

    fn on_state_transition(
        &mut self,
        ctx: &mut ManagerContext<'_>,
        _from: GameState,
        _to: GameState,
        via: GameStateTransitionId,
    ) {
        // The session is updated only after the transition callback.
        self.0
            .borrow_mut()
            .push(format!("{:?} while {:?}", via, ctx.session.game_state()));
    }

    fn on_state_enter(&mut self, _ctx: &mut ManagerContext<'_>, to: GameState) {
        self.0.borrow_mut().push(format!("enter {:?}", to));
    }
}

/// Boots the game machine into `Title` along the default table.
fn boot_to_title(harness: &mut Harness) {
    harness
        .buffer
        .add(StateCommand::new(GameState::Undefined, GameStateTransitionId::BootRequested));
    harness.commit();
    harness
        .buffer
        .add(StateCommand::new(GameState::Start, GameStateTransitionId::TitleRequested));
    harness.commit();
}

#[test]
fn test_despawn_is_processed_before_spawn() -> anyhow::Result<()> {
    // --- 1. ARRANGE ---
    let mut harness = Harness::new(1)?;
    harness.buffer.add(SpawnCommand::new(BULLETS, 1));
    harness.commit();
    let first = harness.pools.get(BULLETS).expect("pool").active()[0];

    // Spawn is queued before the despawn on purpose.
    harness.buffer.add(SpawnCommand::new(BULLETS, 1));
    harness.buffer.add(DespawnCommand::new(first));

    // --- 2. ACT ---
    harness.commit();

    // --- 3. ASSERT ---
    let pool = harness.pools.get(BULLETS).expect("pool");
    assert_eq!(pool.active_count(), 1, "The freed slot must be reused");
    assert_eq!(pool.inactive_count(), 0);
    let stats = harness
        .dispatcher
        .get::<SpawnManager>()
        .expect("spawn manager")
        .last_flush_stats();
    assert_eq!((stats.despawned, stats.spawned, stats.truncated), (1, 1, 0));
    Ok(())
}

#[test]
fn test_commit_leaves_buffer_empty_and_is_idempotent() -> anyhow::Result<()> {
    let mut harness = Harness::new(4)?;
    harness.buffer.add(SpawnCommand::new(BULLETS, 2));

    let first = harness.commit();
    let second = harness.commit();

    assert!(harness.buffer.is_empty());
    assert_eq!(first.routed, 1);
    assert_eq!(second.routed, 0, "Nothing is dispatched twice");
    assert_eq!(harness.pools.get(BULLETS).map(|p| p.active_count()), Some(2));
    Ok(())
}

#[test]
fn test_unrouted_commands_are_dropped() -> anyhow::Result<()> {
    let mut harness = Harness::new(1)?;
    harness.buffer.add(StateCommand::new(
        MatchState::Undefined,
        MatchStateTransitionId::WarmupRequested,
    ));

    let report = harness.commit();

    assert_eq!(report.dropped, 1);
    assert!(harness.buffer.is_empty());
    assert_eq!(harness.session.match_state(), MatchState::Undefined);
    Ok(())
}

#[test]
fn test_despawn_round_trip_returns_entity_to_pool() -> anyhow::Result<()> {
    let mut harness = Harness::new(1)?;
    harness.buffer.add(SpawnCommand::new(BULLETS, 1));
    harness.commit();
    let entity = harness.pools.get(BULLETS).expect("pool").active()[0];

    harness.buffer.add(DespawnCommand::from_pool(entity, BULLETS));
    harness.commit();

    assert!(!harness.world.is_active(entity));
    assert!(harness.pools.get(BULLETS).expect("pool").is_inactive(entity));

    harness.buffer.add(SpawnCommand::new(BULLETS, 1));
    harness.commit();
    assert_eq!(
        harness.pools.get(BULLETS).expect("pool").active(),
        &[entity],
        "A pool of one hands out the same entity again"
    );
    Ok(())
}

#[test]
fn test_state_transition_is_deterministic() -> anyhow::Result<()> {
    // --- 1. ARRANGE ---
    let mut harness = Harness::new(1)?;
    let journal = Journal::default();
    harness
        .dispatcher
        .register(StateManager::game(Logger::disabled()).with_listener(journal.clone()))?;
    boot_to_title(&mut harness);
    journal.0.borrow_mut().clear();

    // --- 2. ACT ---
    harness
        .buffer
        .add(StateCommand::new(GameState::Title, GameStateTransitionId::StartRequested));
    harness.commit();

    // --- 3. ASSERT ---
    assert_eq!(harness.session.game_state(), GameState::Running);
    assert_eq!(
        *journal.0.borrow(),
        vec![
            "exit Title".to_string(),
            "StartRequested while Title".to_string(),
            "enter Running".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_start_requested_from_paused_changes_nothing() -> anyhow::Result<()> {
    let mut harness = Harness::new(1)?;
    let journal = Journal::default();
    harness
        .dispatcher
        .register(StateManager::game(Logger::disabled()).with_listener(journal.clone()))?;
    boot_to_title(&mut harness);
    harness
        .buffer
        .add(StateCommand::new(GameState::Title, GameStateTransitionId::StartRequested));
    harness.commit();
    harness
        .buffer
        .add(StateCommand::new(GameState::Running, GameStateTransitionId::TogglePause));
    harness.commit();
    assert_eq!(harness.session.game_state(), GameState::Paused);
    journal.0.borrow_mut().clear();

    harness
        .buffer
        .add(StateCommand::new(GameState::Paused, GameStateTransitionId::StartRequested));
    harness.commit();

    assert_eq!(harness.session.game_state(), GameState::Paused);
    assert!(journal.0.borrow().is_empty(), "No listener may be notified");
    Ok(())
}

#[test]
fn test_last_state_command_wins() -> anyhow::Result<()> {
    let mut harness = Harness::new(1)?;
    harness
        .dispatcher
        .register(StateManager::game(Logger::disabled()))?;
    boot_to_title(&mut harness);

    harness
        .buffer
        .add(StateCommand::new(GameState::Title, GameStateTransitionId::TitleRequested));
    harness
        .buffer
        .add(StateCommand::new(GameState::Title, GameStateTransitionId::StartRequested));
    harness.commit();

    assert_eq!(harness.session.game_state(), GameState::Running);
    Ok(())
}

#[test]
fn test_second_manager_for_a_state_kind_is_refused() -> anyhow::Result<()> {
    let mut harness = Harness::new(1)?;
    harness
        .dispatcher
        .register(StateManager::game(Logger::disabled()))?;

    let result = harness
        .dispatcher
        .register(StateManager::game(Logger::disabled()));

    assert!(matches!(
        result,
        Err(DispatchError::DuplicateHandler { existing: "GameStateManager", .. })
    ));
    harness
        .dispatcher
        .register(ScoreManager::new(Logger::disabled()))?;
    assert_eq!(
        harness.dispatcher.manager_names().collect::<Vec<_>>(),
        vec!["SpawnManager", "GameStateManager", "ScoreManager"]
    );
    Ok(())
}
