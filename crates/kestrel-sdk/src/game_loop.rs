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

//! The frame loop: ordered phases of ordered passes of ordered systems.
//!
//! Commands produced by systems are committed after every phase and after
//! any pass marked as a commit point, so a phase always observes the
//! structural changes requested by the phases before it.

use kestrel_agents::spawn::SpawnRule;
use kestrel_core::InputSnapshot;
use kestrel_data::session::Session;
use kestrel_data::state::GameState;
use kestrel_lanes::collision_lane::{AabbCollisionSystem, CollisionResponseSystem};
use kestrel_lanes::flow_lane::{
    GameStateInputSystem, MatchFlowSystem, MatchTimings, SpawnSchedulingSystem,
};
use kestrel_lanes::gameplay_lane::{LifetimeSystem, WeaponSystem};
use kestrel_lanes::movement_lane::{LevelBoundsBehaviorSystem, Move2DSystem, PlayerControlSystem};
use kestrel_lanes::scene_lane::{CollisionClearSystem, SceneSyncSystem, TransformClearSystem};
use kestrel_lanes::{System, UpdateContext};

use crate::{GameConfig, GameWorld};

/// A predicate deciding whether a pass runs this frame.
pub type RunCondition = fn(&Session) -> bool;

/// The three phases of a frame, run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Input translation and anything that must settle before simulation.
    Pre,
    /// Gameplay simulation.
    Main,
    /// Scene sync and per-frame cleanup.
    Post,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 3] = [Phase::Pre, Phase::Main, Phase::Post];

    fn index(self) -> usize {
        self as usize
    }
}

/// An ordered group of systems sharing a run condition.
pub struct Pass {
    name: &'static str,
    systems: Vec<Box<dyn System>>,
    run_if: Option<RunCondition>,
    commit: bool,
}

impl Pass {
    /// An empty pass that always runs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            systems: Vec::new(),
            run_if: None,
            commit: false,
        }
    }

    /// Appends a system. Systems run in the order they are added.
    #[must_use]
    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Skips the whole pass on frames where `condition` is false.
    #[must_use]
    pub fn run_if(mut self, condition: RunCondition) -> Self {
        self.run_if = Some(condition);
        self
    }

    /// Commits the command buffer right after this pass.
    #[must_use]
    pub fn commit(mut self) -> Self {
        self.commit = true;
        self
    }

    /// The pass name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this pass is a commit point.
    pub fn is_commit_point(&self) -> bool {
        self.commit
    }

    /// Names of the systems in run order.
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name())
    }

    /// Number of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the pass has no system.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    fn should_run(&self, session: &Session) -> bool {
        self.run_if.map_or(true, |condition| condition(session))
    }
}

/// Runs while the game is in [`GameState::Running`].
pub fn is_running(session: &Session) -> bool {
    session.game_state() == GameState::Running
}

/// The ordered system pipeline of a game.
#[derive(Default)]
pub struct GameLoop {
    phases: [Vec<Pass>; 3],
}

impl GameLoop {
    /// A loop with no pass at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard pipeline with no spawn rules and default match timings.
    pub fn with_default_systems() -> Self {
        Self::standard(Vec::new(), MatchTimings::default())
    }

    /// The standard pipeline with the config's spawn rules and match timings.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::standard(config.spawn_rules.clone(), config.timings)
    }

    fn standard(rules: Vec<SpawnRule>, timings: MatchTimings) -> Self {
        Self::new()
            .with_pass(
                Phase::Pre,
                Pass::new("input").with_system(GameStateInputSystem::new()).commit(),
            )
            .with_pass(
                Phase::Main,
                Pass::new("movement")
                    .run_if(is_running)
                    .with_system(PlayerControlSystem)
                    .with_system(SpawnSchedulingSystem::new(rules))
                    .with_system(MatchFlowSystem::new(timings))
                    .with_system(Move2DSystem)
                    .with_system(LevelBoundsBehaviorSystem::default()),
            )
            .with_pass(
                Phase::Main,
                Pass::new("interaction")
                    .run_if(is_running)
                    .with_system(AabbCollisionSystem::new())
                    .with_system(CollisionResponseSystem::new())
                    .with_system(LifetimeSystem::new())
                    .with_system(WeaponSystem::default()),
            )
            .with_pass(
                Phase::Post,
                Pass::new("scene")
                    .with_system(SceneSyncSystem)
                    .with_system(TransformClearSystem)
                    .with_system(CollisionClearSystem),
            )
    }

    /// Appends a pass to `phase`.
    #[must_use]
    pub fn with_pass(mut self, phase: Phase, pass: Pass) -> Self {
        self.add_pass(phase, pass);
        self
    }

    /// Appends a pass to `phase`.
    pub fn add_pass(&mut self, phase: Phase, pass: Pass) {
        self.phases[phase.index()].push(pass);
    }

    /// The passes of `phase` in run order.
    pub fn passes(&self, phase: Phase) -> &[Pass] {
        &self.phases[phase.index()]
    }

    /// Advances the game by one frame.
    ///
    /// The session clock moves first, then each phase runs its passes and the
    /// command buffer is committed at every commit point and at the end of
    /// every phase. A negative `delta_time` is a caller bug; release builds
    /// treat it as zero.
    pub fn update(&mut self, game: &mut GameWorld, input: &InputSnapshot, delta_time: f32) {
        debug_assert!(delta_time >= 0.0, "negative frame delta {delta_time}");
        let delta_time = delta_time.max(0.0);
        game.session.advance(delta_time);

        for phase in Phase::ALL {
            for pass in &mut self.phases[phase.index()] {
                if !pass.should_run(&game.session) {
                    continue;
                }
                let mut ctx = UpdateContext {
                    delta_time,
                    input,
                    commands: &mut game.commands,
                    world: &mut game.world,
                    session: &game.session,
                    level: &game.level,
                    scene: &mut game.scene,
                    logger: &game.logger,
                };
                for system in &mut pass.systems {
                    system.update(&mut ctx);
                }
                if pass.commit {
                    game.commit();
                }
            }

            let report = game.commit();
            if report.routed + report.dropped > 0 {
                game.logger.trace(format_args!(
                    "frame {} {phase:?}: {} routed, {} dropped",
                    game.session.frame(),
                    report.routed,
                    report.dropped
                ));
            }
        }
    }
}
