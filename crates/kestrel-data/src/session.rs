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

//! Per-match mutable state shared by all systems.

use crate::state::{GameState, GameStateTransitionId, MatchState, MatchStateTransitionId, StateKind};

/// Current game and match state plus frame timing.
///
/// Owned by the game world. Systems read it through their update context;
/// only the state managers write the state fields and only the game loop
/// advances the clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    game_state: GameState,
    game_transition: Option<GameStateTransitionId>,
    match_state: MatchState,
    match_transition: Option<MatchStateTransitionId>,
    frame: u64,
    elapsed_seconds: f64,
    time_in_game_state: f32,
    time_in_match_state: f32,
}

impl Session {
    /// A session in the `Undefined` states at frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current game state.
    #[inline]
    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// The current match state.
    #[inline]
    #[must_use]
    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    /// The state of machine `S`.
    #[inline]
    pub fn current<S: StateKind>(&self) -> S {
        S::current(self)
    }

    /// The transition that led to the current game state.
    #[must_use]
    pub fn last_game_transition(&self) -> Option<GameStateTransitionId> {
        self.game_transition
    }

    /// The transition that led to the current match state.
    #[must_use]
    pub fn last_match_transition(&self) -> Option<MatchStateTransitionId> {
        self.match_transition
    }

    /// Number of completed frames.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds since the session started.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Simulated seconds spent in the current game state.
    #[must_use]
    pub fn time_in_game_state(&self) -> f32 {
        self.time_in_game_state
    }

    /// Simulated seconds spent in the current match state.
    #[must_use]
    pub fn time_in_match_state(&self) -> f32 {
        self.time_in_match_state
    }

    /// Whether gameplay systems should run this frame.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.game_state == GameState::Running
    }

    /// Advances the clock by one frame of `delta_time` seconds.
    pub fn advance(&mut self, delta_time: f32) {
        self.frame += 1;
        self.elapsed_seconds += f64::from(delta_time);
        self.time_in_game_state += delta_time;
        self.time_in_match_state += delta_time;
    }

    /// Forgets the match progression. Called at match boundaries.
    pub fn reset_match(&mut self) {
        self.match_state = MatchState::Undefined;
        self.match_transition = None;
        self.time_in_match_state = 0.0;
    }

    pub(crate) fn set_game_state(&mut self, to: GameState, via: GameStateTransitionId) {
        self.game_state = to;
        self.game_transition = Some(via);
        self.time_in_game_state = 0.0;
    }

    pub(crate) fn set_match_state(&mut self, to: MatchState, via: MatchStateTransitionId) {
        self.match_state = to;
        self.match_transition = Some(via);
        self.time_in_match_state = 0.0;
    }
}
