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

use kestrel_agents::command::StateCommand;
use kestrel_data::ecs::PlayerComponent;
use kestrel_data::state::{MatchState, MatchStateTransitionId};
use serde::{Deserialize, Serialize};

use crate::{System, UpdateContext};

/// How long the automatic phases of a match last, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTimings {
    /// Time spent in `Warmup` before the countdown starts.
    pub warmup: f32,
    /// Length of the countdown.
    pub countdown: f32,
    /// Pause after the player was hit before respawning or ending the match.
    pub respawn_delay: f32,
    /// Time on the game over screen before a new match warms up. `None` waits forever.
    pub restart_delay: Option<f32>,
}

impl Default for MatchTimings {
    fn default() -> Self {
        Self {
            warmup: 1.0,
            countdown: 3.0,
            respawn_delay: 1.5,
            restart_delay: None,
        }
    }
}

/// Walks the match machine through its timed phases.
///
/// Runs only while the game is running. A fresh session is sent to `Warmup`,
/// then `Countdown` and `Playing` follow after their configured durations.
/// After a defeat the player respawns if any player has lives left, otherwise
/// the match ends.
#[derive(Debug, Clone, Default)]
pub struct MatchFlowSystem {
    timings: MatchTimings,
}

impl MatchFlowSystem {
    /// Creates the system with the given durations.
    pub fn new(timings: MatchTimings) -> Self {
        Self { timings }
    }

    /// The configured durations.
    #[must_use]
    pub fn timings(&self) -> &MatchTimings {
        &self.timings
    }
}

impl System for MatchFlowSystem {
    fn name(&self) -> &'static str {
        "MatchFlowSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        use MatchStateTransitionId::*;

        let state = ctx.session.match_state();
        let elapsed = ctx.session.time_in_match_state();
        let timings = &self.timings;

        let transition = match state {
            MatchState::Undefined => Some(WarmupRequested),
            MatchState::Warmup if elapsed >= timings.warmup => Some(CountdownRequested),
            MatchState::Countdown if elapsed >= timings.countdown => Some(StartRequested),
            MatchState::PlayerDefeated if elapsed >= timings.respawn_delay => {
                let lives_left = ctx
                    .world
                    .view::<PlayerComponent>()
                    .any(|(_, player)| player.lives > 0);
                Some(if lives_left { RespawnRequested } else { GameOverRequested })
            }
            MatchState::GameOver => timings
                .restart_delay
                .filter(|delay| elapsed >= *delay)
                .map(|_| WarmupRequested),
            _ => None,
        };

        if let Some(transition) = transition {
            ctx.commands.add(StateCommand::new(state, transition));
        }
    }
}
