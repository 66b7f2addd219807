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

use std::marker::PhantomData;

use kestrel_core::Logger;
use kestrel_data::ecs::PlayerComponent;
use kestrel_data::state::{GameState, GameStateTransitionId, MatchState, StateKind};

use super::StateListener;
use crate::command::ManagerContext;

/// Resets a match whenever the match machine enters `Warmup`.
///
/// All pooled entities go back to their pools, score totals are cleared (high
/// scores survive) and every player gets their starting lives back.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchResetListener;

impl StateListener<MatchState> for MatchResetListener {
    fn on_state_enter(&mut self, ctx: &mut ManagerContext<'_>, to: MatchState) {
        if to != MatchState::Warmup {
            return;
        }

        let released = ctx.pools.release_all(ctx.world);
        ctx.scores.reset_totals();

        let players: Vec<_> = ctx.world.find::<PlayerComponent>().collect();
        for player in &players {
            if let Some(component) = ctx.world.get_mut::<PlayerComponent>(*player) {
                component.reset();
            }
        }

        ctx.logger.debug(format_args!(
            "Match reset: {} entities released, {} players restored",
            released,
            players.len()
        ));
    }
}

/// Abandons the current match when the game returns to the title screen.
///
/// The match machine goes back to `Undefined` so the next run starts with a
/// fresh warmup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleReturnListener;

impl StateListener<GameState> for TitleReturnListener {
    fn on_state_transition(
        &mut self,
        ctx: &mut ManagerContext<'_>,
        from: GameState,
        to: GameState,
        _via: GameStateTransitionId,
    ) {
        if to != GameState::Title || from != GameState::Paused {
            return;
        }
        let released = ctx.pools.release_all(ctx.world);
        ctx.session.reset_match();
        ctx.logger
            .debug(format_args!("Match abandoned, {} entities released", released));
    }
}

/// Logs every transition of machine `S` at `info` level.
#[derive(Debug, Clone)]
pub struct LoggingStateListener<S> {
    logger: Logger,
    _kind: PhantomData<fn() -> S>,
}

impl<S: StateKind> LoggingStateListener<S> {
    /// A listener writing to `logger`.
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            _kind: PhantomData,
        }
    }
}

impl<S: StateKind> StateListener<S> for LoggingStateListener<S> {
    fn on_state_transition(
        &mut self,
        ctx: &mut ManagerContext<'_>,
        from: S,
        to: S,
        via: S::Transition,
    ) {
        self.logger.info(format_args!(
            "[{} state] {:?} --{:?}--> {:?} (frame {})",
            S::NAME,
            from,
            via,
            to,
            ctx.session.frame()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Manager, StateCommand};
    use crate::state::StateManager;
    use kestrel_data::ecs::{GameObjectMut, World};
    use kestrel_data::level::Level;
    use kestrel_data::pool::{PoolId, PoolRegistry};
    use kestrel_data::score::{ScoreBoard, ScorePoolId};
    use kestrel_data::session::Session;
    use kestrel_data::state::{MatchStateTransitionId, StateTransitionRule};
    use kestrel_data::EcsError;

    fn empty_template(_object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
        Ok(())
    }

    #[test]
    fn test_entering_warmup_resets_match_data() {
        // --- 1. ARRANGE ---
        let mut world = World::new();
        let mut pools = PoolRegistry::new();
        let pool = pools
            .create_pool(&mut world, PoolId(0), 3, &empty_template)
            .expect("pool");
        assert!(pool.acquire(&mut world).is_some());
        assert!(pool.acquire(&mut world).is_some());

        let player = world.create();
        world.attach(player, PlayerComponent::new(3)).expect("player");
        if let Some(p) = world.get_mut::<PlayerComponent>(player) {
            p.lives = 0;
        }

        let mut scores = ScoreBoard::new();
        scores.add(ScorePoolId(0), 500);
        let mut session = Session::new();
        let level = Level::default();
        let logger = Logger::disabled();

        let mut manager = StateManager::<MatchState>::new(
            vec![StateTransitionRule::new(
                MatchState::Undefined,
                MatchStateTransitionId::WarmupRequested,
                MatchState::Warmup,
            )],
            Logger::disabled(),
        )
        .with_listener(MatchResetListener);
        manager.submit(
            StateCommand::new(MatchState::Undefined, MatchStateTransitionId::WarmupRequested)
                .into(),
        );

        // --- 2. ACT ---
        let mut ctx = ManagerContext {
            world: &mut world,
            pools: &mut pools,
            session: &mut session,
            scores: &mut scores,
            level: &level,
            logger: &logger,
        };
        manager.flush(&mut ctx);

        // --- 3. ASSERT ---
        assert_eq!(session.match_state(), MatchState::Warmup);
        assert_eq!(pools.get(PoolId(0)).map(|p| p.active_count()), Some(0));
        assert_eq!(scores.total(ScorePoolId(0)), 0);
        assert_eq!(scores.get(ScorePoolId(0)).map(|p| p.high_score), Some(500));
        assert_eq!(world.get::<PlayerComponent>(player).map(|p| p.lives), Some(3));
    }
}
