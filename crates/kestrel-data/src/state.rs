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

//! State-machine vocabulary: state kinds, transition ids and rule tables.
//!
//! Two independent machines drive a game. [`GameState`] covers the high-level
//! flow (title, running, paused) and [`MatchState`] the progression inside a
//! match. Both are described by ordered tables of [`StateTransitionRule`]s.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::ecs::{PlayerComponent, World};
use crate::session::Session;

/// A state enum that can be driven by a rule table.
pub trait StateKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// The transition ids that may be requested.
    type Transition: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// A short name used in logs.
    const NAME: &'static str;

    /// Reads the current state from the session.
    fn current(session: &Session) -> Self;

    /// Reads the transition that led to the current state.
    fn last_transition(session: &Session) -> Option<Self::Transition>;

    /// Writes a new state and the transition that led to it.
    fn apply(session: &mut Session, to: Self, via: Self::Transition);
}

/// An extra condition a rule must satisfy to fire.
pub type TransitionGuard = fn(&Session, &World) -> bool;

/// One legal edge `(from, transition) -> to` of a state machine.
#[derive(Debug, Clone, Copy)]
pub struct StateTransitionRule<S: StateKind> {
    /// The state the edge leaves.
    pub from: S,
    /// The requested transition.
    pub transition: S::Transition,
    /// The state the edge enters.
    pub to: S,
    /// Optional condition evaluated at flush time.
    pub guard: Option<TransitionGuard>,
}

impl<S: StateKind> StateTransitionRule<S> {
    /// An unguarded rule.
    pub fn new(from: S, transition: S::Transition, to: S) -> Self {
        Self {
            from,
            transition,
            to,
            guard: None,
        }
    }

    /// Adds a guard to the rule.
    #[must_use]
    pub fn with_guard(mut self, guard: TransitionGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Whether the rule covers `(from, transition)`.
    #[inline]
    pub fn matches(&self, from: S, transition: S::Transition) -> bool {
        self.from == from && self.transition == transition
    }

    /// Whether the guard, if any, lets the rule fire.
    #[inline]
    pub fn allows(&self, session: &Session, world: &World) -> bool {
        self.guard.is_none_or(|guard| guard(session, world))
    }
}

// --- Game state ---

/// The high-level flow of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Nothing has happened yet.
    #[default]
    Undefined,
    /// Booted, nothing shown.
    Start,
    /// The title screen.
    Title,
    /// Gameplay is running.
    Running,
    /// Gameplay is frozen.
    Paused,
}

/// Transitions of [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStateTransitionId {
    /// `Undefined -> Start`.
    BootRequested,
    /// Back to the title screen.
    TitleRequested,
    /// `Title -> Running`.
    StartRequested,
    /// Flips between `Running` and `Paused`.
    TogglePause,
}

impl StateKind for GameState {
    type Transition = GameStateTransitionId;
    const NAME: &'static str = "game";

    fn current(session: &Session) -> Self {
        session.game_state()
    }

    fn last_transition(session: &Session) -> Option<Self::Transition> {
        session.last_game_transition()
    }

    fn apply(session: &mut Session, to: Self, via: Self::Transition) {
        session.set_game_state(to, via);
    }
}

/// The stock game flow.
pub fn default_game_state_rules() -> Vec<StateTransitionRule<GameState>> {
    use GameState::*;
    use GameStateTransitionId::*;
    vec![
        StateTransitionRule::new(Undefined, BootRequested, Start),
        StateTransitionRule::new(Start, TitleRequested, Title),
        StateTransitionRule::new(Title, StartRequested, Running),
        StateTransitionRule::new(Running, TogglePause, Paused),
        StateTransitionRule::new(Paused, TogglePause, Running),
        StateTransitionRule::new(Paused, TitleRequested, Title),
    ]
}

// --- Match state ---

/// Progression inside a single match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// No match in progress.
    #[default]
    Undefined,
    /// The arena is being prepared.
    Warmup,
    /// The count-in before play.
    Countdown,
    /// The match is live.
    Playing,
    /// The player was hit and lost a life.
    PlayerDefeated,
    /// The match is over.
    GameOver,
}

/// Transitions of [`MatchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStateTransitionId {
    /// Start (or restart) a match.
    WarmupRequested,
    /// `Warmup -> Countdown`.
    CountdownRequested,
    /// `Countdown -> Playing`.
    StartRequested,
    /// `Playing -> PlayerDefeated`.
    PlayerDied,
    /// Back into play after a defeat, guarded by remaining lives.
    RespawnRequested,
    /// End the match.
    GameOverRequested,
}

impl StateKind for MatchState {
    type Transition = MatchStateTransitionId;
    const NAME: &'static str = "match";

    fn current(session: &Session) -> Self {
        session.match_state()
    }

    fn last_transition(session: &Session) -> Option<Self::Transition> {
        session.last_match_transition()
    }

    fn apply(session: &mut Session, to: Self, via: Self::Transition) {
        session.set_match_state(to, via);
    }
}

/// Guard: at least one player still has a life left.
pub fn player_has_lives(_session: &Session, world: &World) -> bool {
    world
        .view::<PlayerComponent>()
        .any(|(_, player)| player.lives > 0)
}

/// The stock match flow.
pub fn default_match_state_rules() -> Vec<StateTransitionRule<MatchState>> {
    use MatchState::*;
    use MatchStateTransitionId::*;
    vec![
        StateTransitionRule::new(Undefined, WarmupRequested, Warmup),
        StateTransitionRule::new(GameOver, WarmupRequested, Warmup),
        StateTransitionRule::new(Warmup, CountdownRequested, Countdown),
        StateTransitionRule::new(Countdown, StartRequested, Playing),
        StateTransitionRule::new(Playing, PlayerDied, PlayerDefeated),
        StateTransitionRule::new(PlayerDefeated, RespawnRequested, Playing)
            .with_guard(player_has_lives),
        StateTransitionRule::new(PlayerDefeated, GameOverRequested, GameOver),
        StateTransitionRule::new(Playing, GameOverRequested, GameOver),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_no_duplicate_edges<S: StateKind>(rules: &[StateTransitionRule<S>]) {
        let mut seen = HashSet::new();
        for rule in rules {
            assert!(
                seen.insert((rule.from, rule.transition)),
                "Duplicate edge {:?} --{:?}-->",
                rule.from,
                rule.transition
            );
        }
    }

    #[test]
    fn test_default_tables_have_unique_edges() {
        assert_no_duplicate_edges(&default_game_state_rules());
        assert_no_duplicate_edges(&default_match_state_rules());
    }

    #[test]
    fn test_respawn_guard_reads_player_lives() {
        let mut world = World::new();
        let session = Session::new();
        let player = world.create();
        world.attach(player, PlayerComponent::new(0)).expect("attach");

        assert!(!player_has_lives(&session, &world));
        if let Some(p) = world.get_mut::<PlayerComponent>(player) {
            p.lives = 1;
        }
        assert!(player_has_lives(&session, &world));
    }

    #[test]
    fn test_rule_matching_and_guard() {
        let world = World::new();
        let session = Session::new();
        let rule = StateTransitionRule::new(
            GameState::Title,
            GameStateTransitionId::StartRequested,
            GameState::Running,
        );
        let blocked = rule.with_guard(|_, _| false);

        assert!(rule.matches(GameState::Title, GameStateTransitionId::StartRequested));
        assert!(!rule.matches(GameState::Paused, GameStateTransitionId::StartRequested));
        assert!(rule.allows(&session, &world));
        assert!(!blocked.allows(&session, &world));
    }
}
