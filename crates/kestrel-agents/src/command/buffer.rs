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

use super::Command;

/// A per-frame queue of deferred [`Command`]s.
///
/// Systems append while they iterate. The dispatcher drains the buffer at
/// each commit point, so it is always empty between phases.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn add(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    /// Number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Pending commands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Removes and yields every pending command in insertion order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }

    /// Drops every pending command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandKind, DespawnCommand, SpawnCommand};
    use kestrel_core::EntityId;
    use kestrel_data::pool::PoolId;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut buffer = CommandBuffer::new();
        buffer.add(SpawnCommand::new(PoolId(0), 1));
        buffer.add(DespawnCommand::new(EntityId::new(4, 0)));

        let kinds: Vec<_> = buffer.drain().map(|c| c.kind()).collect();

        assert_eq!(kinds, vec![CommandKind::Spawn, CommandKind::Despawn]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.drain().count(), 0);
    }
}
