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

//! A reusable frame for system unit tests.

use kestrel_agents::{Command, CommandBuffer};
use kestrel_core::scene::SceneGraph;
use kestrel_core::{InputSnapshot, Logger};
use kestrel_data::ecs::World;
use kestrel_data::level::Level;
use kestrel_data::session::Session;
use kestrel_data::state::{
    GameState, GameStateTransitionId, MatchState, MatchStateTransitionId, StateKind,
};

use crate::{System, UpdateContext};

pub(crate) struct Frame {
    pub world: World,
    pub commands: CommandBuffer,
    pub session: Session,
    pub level: Level,
    pub scene: SceneGraph,
    pub input: InputSnapshot,
    pub logger: Logger,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            commands: CommandBuffer::new(),
            session: Session::new(),
            level: Level::default(),
            scene: SceneGraph::new(),
            input: InputSnapshot::empty(),
            logger: Logger::disabled(),
        }
    }

    /// A frame where the game runs and the match is in `state`.
    pub fn playing(state: MatchState) -> Self {
        let mut frame = Self::new();
        GameState::apply(
            &mut frame.session,
            GameState::Running,
            GameStateTransitionId::StartRequested,
        );
        MatchState::apply(&mut frame.session, state, MatchStateTransitionId::StartRequested);
        frame
    }

    pub fn run(&mut self, system: &mut dyn System, delta_time: f32) {
        let mut ctx = UpdateContext {
            delta_time,
            input: &self.input,
            commands: &mut self.commands,
            world: &mut self.world,
            session: &self.session,
            level: &self.level,
            scene: &mut self.scene,
            logger: &self.logger,
        };
        system.update(&mut ctx);
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        self.commands.drain().collect()
    }
}
