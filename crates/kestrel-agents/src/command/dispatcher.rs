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
use std::collections::HashMap;

use kestrel_core::Logger;
use kestrel_data::ecs::World;
use kestrel_data::level::Level;
use kestrel_data::pool::PoolRegistry;
use kestrel_data::score::ScoreBoard;
use kestrel_data::session::Session;

use super::{Command, CommandBuffer, CommandKind};
use crate::error::DispatchError;

/// Everything a manager may mutate during a flush.
///
/// This is the only place where structural changes to the world, the pools
/// and the session happen.
pub struct ManagerContext<'a> {
    /// The entity store.
    pub world: &'a mut World,
    /// The object pools.
    pub pools: &'a mut PoolRegistry,
    /// Game and match state.
    pub session: &'a mut Session,
    /// Score pools.
    pub scores: &'a mut ScoreBoard,
    /// The play area.
    pub level: &'a Level,
    /// Diagnostics sink.
    pub logger: &'a Logger,
}

/// A handler for one or more [`CommandKind`]s.
///
/// Managers queue what they receive in [`Manager::submit`] and apply it in
/// [`Manager::flush`]. They never see a command twice.
pub trait Manager: Any {
    /// A short human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The command kinds this manager wants routed to it.
    fn accepts(&self) -> &'static [CommandKind];

    /// Queues a command. Only kinds listed in [`Manager::accepts`] arrive here.
    fn submit(&mut self, command: Command);

    /// Applies everything queued since the last flush.
    fn flush(&mut self, ctx: &mut ManagerContext<'_>);

    /// Returns a reference to the manager as `Any` for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to the manager as `Any` for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// What a single commit did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Commands handed to a manager.
    pub routed: usize,
    /// Commands dropped because no manager handles their kind.
    pub dropped: usize,
}

/// Owns the managers and routes buffered commands to them.
///
/// Each [`CommandKind`] is routed to at most one manager. Managers are
/// flushed in registration order.
pub struct CommandDispatcher {
    managers: Vec<Box<dyn Manager>>,
    routes: HashMap<CommandKind, usize>,
    logger: Logger,
}

impl CommandDispatcher {
    /// Creates a dispatcher without managers.
    pub fn new(logger: Logger) -> Self {
        Self {
            managers: Vec::new(),
            routes: HashMap::new(),
            logger,
        }
    }

    /// Registers a manager after every manager registered so far.
    ///
    /// Fails without registering anything if one of the kinds it accepts is
    /// already routed.
    pub fn register<M: Manager>(&mut self, manager: M) -> Result<(), DispatchError> {
        for kind in manager.accepts() {
            if let Some(&existing) = self.routes.get(kind) {
                return Err(DispatchError::DuplicateHandler {
                    kind: *kind,
                    existing: self.managers[existing].name(),
                    manager: manager.name(),
                });
            }
        }

        let index = self.managers.len();
        for kind in manager.accepts() {
            self.routes.insert(*kind, index);
        }
        self.logger.debug(format_args!(
            "Registered manager `{}` for {:?}",
            manager.name(),
            manager.accepts()
        ));
        self.managers.push(Box::new(manager));
        Ok(())
    }

    /// Number of registered managers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether no manager is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Whether some manager handles `kind`.
    #[must_use]
    pub fn is_routed(&self, kind: CommandKind) -> bool {
        self.routes.contains_key(&kind)
    }

    /// Manager names in flush order.
    pub fn manager_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.managers.iter().map(|m| m.name())
    }

    /// Finds a registered manager by concrete type.
    pub fn get<M: Manager>(&self) -> Option<&M> {
        self.managers
            .iter()
            .find_map(|m| m.as_any().downcast_ref::<M>())
    }

    /// Finds a registered manager by concrete type, mutably.
    pub fn get_mut<M: Manager>(&mut self) -> Option<&mut M> {
        self.managers
            .iter_mut()
            .find_map(|m| m.as_any_mut().downcast_mut::<M>())
    }

    /// Drains `buffer` and hands every command to its manager.
    ///
    /// Commands without a route are dropped. Nothing is applied until
    /// [`CommandDispatcher::flush`].
    pub fn dispatch(&mut self, buffer: &mut CommandBuffer) -> CommitReport {
        let mut report = CommitReport::default();
        for command in buffer.drain() {
            match self.routes.get(&command.kind()) {
                Some(&index) => {
                    self.managers[index].submit(command);
                    report.routed += 1;
                }
                None => {
                    self.logger
                        .trace(format_args!("No manager for {:?}, dropped", command.kind()));
                    report.dropped += 1;
                }
            }
        }
        report
    }

    /// Flushes every manager in registration order.
    pub fn flush(&mut self, ctx: &mut ManagerContext<'_>) {
        for manager in &mut self.managers {
            manager.flush(ctx);
        }
    }

    /// Dispatches the buffer, then flushes every manager.
    ///
    /// The buffer is empty afterwards whether or not commands were dropped.
    pub fn commit(
        &mut self,
        buffer: &mut CommandBuffer,
        ctx: &mut ManagerContext<'_>,
    ) -> CommitReport {
        let report = self.dispatch(buffer);
        self.flush(ctx);
        report
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(Logger::default().scoped("dispatch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{SpawnCommand, UpdateScoreCommand};
    use kestrel_data::pool::PoolId;
    use kestrel_data::score::ScorePoolId;

    /// Records what it receives and how often it is flushed.
    #[derive(Default)]
    struct Recorder {
        received: Vec<CommandKind>,
        flushes: usize,
    }

    impl Manager for Recorder {
        fn name(&self) -> &'static str {
            "Recorder"
        }

        fn accepts(&self) -> &'static [CommandKind] {
            &[CommandKind::Spawn, CommandKind::Despawn]
        }

        fn submit(&mut self, command: Command) {
            self.received.push(command.kind());
        }

        fn flush(&mut self, _ctx: &mut ManagerContext<'_>) {
            self.flushes += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct SpawnOnly;

    impl Manager for SpawnOnly {
        fn name(&self) -> &'static str {
            "SpawnOnly"
        }

        fn accepts(&self) -> &'static [CommandKind] {
            &[CommandKind::Spawn]
        }

        fn submit(&mut self, _command: Command) {}

        fn flush(&mut self, _ctx: &mut ManagerContext<'_>) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let mut dispatcher = CommandDispatcher::default();
        dispatcher.register(Recorder::default()).expect("first registration");

        let result = dispatcher.register(SpawnOnly);

        assert_eq!(
            result,
            Err(DispatchError::DuplicateHandler {
                kind: CommandKind::Spawn,
                existing: "Recorder",
                manager: "SpawnOnly",
            })
        );
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_dispatch_routes_and_drops_unrouted() {
        let mut dispatcher = CommandDispatcher::default();
        dispatcher.register(Recorder::default()).expect("register");
        let mut buffer = CommandBuffer::new();
        buffer.add(SpawnCommand::new(PoolId(0), 1));
        buffer.add(UpdateScoreCommand::new(ScorePoolId(0), 5));

        let report = dispatcher.dispatch(&mut buffer);

        assert_eq!(report, CommitReport { routed: 1, dropped: 1 });
        assert!(buffer.is_empty());
        let recorder = dispatcher.get::<Recorder>().expect("typed lookup");
        assert_eq!(recorder.received, vec![CommandKind::Spawn]);
    }
}
