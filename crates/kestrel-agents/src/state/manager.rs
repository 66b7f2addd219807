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

use std::any::Any;

use kestrel_core::Logger;
use kestrel_data::state::{
    default_game_state_rules, default_match_state_rules, GameState, MatchState, StateKind,
    StateTransitionRule,
};

use crate::command::{Command, CommandKind, Manager, ManagerContext, StateCommand};

/// A state kind that travels through the command pipeline.
pub trait RoutedState: StateKind {
    /// The command kinds carrying this machine's requests.
    const KINDS: &'static [CommandKind];

    /// The manager name used in logs and dispatch errors.
    const MANAGER_NAME: &'static str;

    /// Unwraps a request for this machine.
    fn extract(command: Command) -> Option<StateCommand<Self>>;
}

impl RoutedState for GameState {
    const KINDS: &'static [CommandKind] = &[CommandKind::GameState];
    const MANAGER_NAME: &'static str = "GameStateManager";

    fn extract(command: Command) -> Option<StateCommand<Self>> {
        match command {
            Command::GameState(request) => Some(request),
            _ => None,
        }
    }
}

impl RoutedState for MatchState {
    const KINDS: &'static [CommandKind] = &[CommandKind::MatchState];
    const MANAGER_NAME: &'static str = "MatchStateManager";

    fn extract(command: Command) -> Option<StateCommand<Self>> {
        match command {
            Command::MatchState(request) => Some(request),
            _ => None,
        }
    }
}

/// Observes the transitions of one state machine.
///
/// Callbacks fire in the order exit, transition, enter. The session still
/// holds `from` during the first two and `to` during the last.
pub trait StateListener<S: StateKind> {
    /// The machine is leaving `from`.
    fn on_state_exit(&mut self, _ctx: &mut ManagerContext<'_>, _from: S) {}

    /// The machine moves from `from` to `to` through `via`.
    fn on_state_transition(
        &mut self,
        _ctx: &mut ManagerContext<'_>,
        _from: S,
        _to: S,
        _via: S::Transition,
    ) {
    }

    /// The machine has entered `to`.
    fn on_state_enter(&mut self, _ctx: &mut ManagerContext<'_>, _to: S) {}
}

/// Outcome of the last [`StateManager`] flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome<S: StateKind> {
    /// Nothing was pending.
    Idle,
    /// The request named a state the machine had already left.
    Stale {
        /// What the sender expected.
        expected: S,
        /// Where the machine actually was.
        actual: S,
    },
    /// No rule matched, or every matching guard refused.
    Rejected(StateCommand<S>),
    /// A rule was applied.
    Applied {
        /// The previous state.
        from: S,
        /// The new state.
        to: S,
        /// The transition taken.
        via: S::Transition,
    },
}

/// Drives the state machine of kind `S` from an ordered rule table.
///
/// Only the last request submitted before a flush is considered. When several
/// rules share the same `(from, transition)` pair, the first one in table
/// order whose guard passes wins.
pub struct StateManager<S: RoutedState> {
    rules: Vec<StateTransitionRule<S>>,
    pending: Option<StateCommand<S>>,
    listeners: Vec<Box<dyn StateListener<S>>>,
    logger: Logger,
    last_outcome: FlushOutcome<S>,
}

impl<S: RoutedState> StateManager<S> {
    /// Creates a manager for the given rule table.
    pub fn new(rules: Vec<StateTransitionRule<S>>, logger: Logger) -> Self {
        Self {
            rules,
            pending: None,
            listeners: Vec::new(),
            logger,
            last_outcome: FlushOutcome::Idle,
        }
    }

    /// Appends a listener. Listeners are notified in registration order.
    pub fn add_listener(&mut self, listener: impl StateListener<S> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`StateManager::add_listener`].
    #[must_use]
    pub fn with_listener(mut self, listener: impl StateListener<S> + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[StateTransitionRule<S>] {
        &self.rules
    }

    /// The request that the next flush will evaluate.
    #[must_use]
    pub fn pending(&self) -> Option<StateCommand<S>> {
        self.pending
    }

    /// What the last flush did.
    #[must_use]
    pub fn last_outcome(&self) -> FlushOutcome<S> {
        self.last_outcome
    }

    fn evaluate(&mut self, ctx: &mut ManagerContext<'_>) -> FlushOutcome<S> {
        let Some(request) = self.pending.take() else {
            return FlushOutcome::Idle;
        };

        let actual = S::current(ctx.session);
        if request.from != actual {
            self.logger.debug(format_args!(
                "Dropped stale {:?} request: expected {:?}, machine is in {:?}",
                request.transition, request.from, actual
            ));
            return FlushOutcome::Stale {
                expected: request.from,
                actual,
            };
        }

        let session = &*ctx.session;
        let world = &*ctx.world;
        let rule = self
            .rules
            .iter()
            .find(|rule| {
                rule.matches(request.from, request.transition) && rule.allows(session, world)
            })
            .copied();
        let Some(rule) = rule else {
            self.logger.debug(format_args!(
                "No rule allows {:?} --{:?}-->",
                request.from, request.transition
            ));
            return FlushOutcome::Rejected(request);
        };

        for listener in &mut self.listeners {
            listener.on_state_exit(ctx, rule.from);
        }
        for listener in &mut self.listeners {
            listener.on_state_transition(ctx, rule.from, rule.to, rule.transition);
        }
        S::apply(ctx.session, rule.to, rule.transition);
        for listener in &mut self.listeners {
            listener.on_state_enter(ctx, rule.to);
        }

        self.logger.debug(format_args!(
            "{:?} --{:?}--> {:?}",
            rule.from, rule.transition, rule.to
        ));
        FlushOutcome::Applied {
            from: rule.from,
            to: rule.to,
            via: rule.transition,
        }
    }
}

impl StateManager<GameState> {
    /// A game state manager with the default rule table.
    pub fn game(logger: Logger) -> Self {
        Self::new(default_game_state_rules(), logger)
    }
}

impl StateManager<MatchState> {
    /// A match state manager with the default rule table.
    pub fn match_flow(logger: Logger) -> Self {
        Self::new(default_match_state_rules(), logger)
    }
}

impl<S: RoutedState> Manager for StateManager<S> {
    fn name(&self) -> &'static str {
        S::MANAGER_NAME
    }

    fn accepts(&self) -> &'static [CommandKind] {
        S::KINDS
    }

    fn submit(&mut self, command: Command) {
        let kind = command.kind();
        match S::extract(command) {
            Some(request) => {
                if let Some(previous) = self.pending.replace(request) {
                    self.logger.trace(format_args!(
                        "{:?} superseded by {:?}",
                        previous.transition, request.transition
                    ));
                }
            }
            None => self
                .logger
                .trace(format_args!("Ignoring {:?} command", kind)),
        }
    }

    fn flush(&mut self, ctx: &mut ManagerContext<'_>) {
        self.last_outcome = self.evaluate(ctx);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
