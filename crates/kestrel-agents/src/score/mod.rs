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

//! Score bookkeeping.

use std::any::Any;

use kestrel_core::Logger;
use kestrel_data::score::ScorePoolId;

use crate::command::{Command, CommandKind, Manager, ManagerContext, ScoreContext};

/// Observes score changes.
pub trait ScoreListener {
    /// `pool` went from `old_total` to `new_total`.
    fn on_score_changed(
        &mut self,
        ctx: &mut ManagerContext<'_>,
        pool: ScorePoolId,
        old_total: i64,
        new_total: i64,
    );
}

/// Applies score updates to the score board in arrival order.
pub struct ScoreManager {
    pending: Vec<ScoreContext>,
    listeners: Vec<Box<dyn ScoreListener>>,
    logger: Logger,
}

impl ScoreManager {
    /// Creates a manager without listeners.
    pub fn new(logger: Logger) -> Self {
        Self {
            pending: Vec::new(),
            listeners: Vec::new(),
            logger,
        }
    }

    /// Appends a listener.
    pub fn add_listener(&mut self, listener: impl ScoreListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`ScoreManager::add_listener`].
    #[must_use]
    pub fn with_listener(mut self, listener: impl ScoreListener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    /// Updates waiting for the next flush.
    pub fn pending(&self) -> &[ScoreContext] {
        &self.pending
    }
}

impl Manager for ScoreManager {
    fn name(&self) -> &'static str {
        "ScoreManager"
    }

    fn accepts(&self) -> &'static [CommandKind] {
        &[CommandKind::UpdateScore]
    }

    fn submit(&mut self, command: Command) {
        match command {
            Command::UpdateScore(update) => self.pending.push(update.context),
            other => self
                .logger
                .trace(format_args!("Ignoring {:?} command", other.kind())),
        }
    }

    fn flush(&mut self, ctx: &mut ManagerContext<'_>) {
        for update in self.pending.drain(..) {
            let (old, new) = ctx.scores.add(update.pool, update.points);
            self.logger.trace(format_args!(
                "{}: {} -> {} ({:+} from {:?})",
                update.pool, old, new, update.points, update.source
            ));
            for listener in &mut self.listeners {
                listener.on_score_changed(ctx, update.pool, old, new);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
