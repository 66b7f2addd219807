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

//! The deferred command model.
//!
//! A [`Command`] is an immutable request to change the world. Systems push
//! commands into a [`CommandBuffer`] while they iterate; nothing structural
//! happens until the [`CommandDispatcher`] commits the buffer.

mod buffer;
mod dispatcher;

pub use buffer::CommandBuffer;
pub use dispatcher::{CommandDispatcher, CommitReport, Manager, ManagerContext};

use kestrel_core::math::{Vec2, Vec3};
use kestrel_core::EntityId;
use kestrel_data::pool::PoolId;
use kestrel_data::score::ScorePoolId;
use kestrel_data::state::{GameState, MatchState, StateKind};

/// Discriminant of a [`Command`], used as the routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    /// [`Command::Spawn`].
    Spawn,
    /// [`Command::Despawn`].
    Despawn,
    /// [`Command::GameState`].
    GameState,
    /// [`Command::MatchState`].
    MatchState,
    /// [`Command::UpdateScore`].
    UpdateScore,
}

/// A deferred request, consumed exactly once by the manager it is routed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Acquire entities from a pool.
    Spawn(SpawnCommand),
    /// Return an entity to its pool.
    Despawn(DespawnCommand),
    /// Request a game state transition.
    GameState(StateCommand<GameState>),
    /// Request a match state transition.
    MatchState(StateCommand<MatchState>),
    /// Add points to a score pool.
    UpdateScore(UpdateScoreCommand),
}

impl Command {
    /// The routing key of this command.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Spawn(_) => CommandKind::Spawn,
            Command::Despawn(_) => CommandKind::Despawn,
            Command::GameState(_) => CommandKind::GameState,
            Command::MatchState(_) => CommandKind::MatchState,
            Command::UpdateScore(_) => CommandKind::UpdateScore,
        }
    }
}

// --- Spawn ---

/// Optional placement hints carried by a spawn request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnContext {
    /// Where the spawned entity should appear, e.g. a ship's muzzle.
    pub origin: Option<Vec3>,
    /// Which way it should travel.
    pub direction: Option<Vec2>,
    /// How fast it should travel, overriding the profile's speed.
    pub speed: Option<f32>,
}

/// Acquire `amount` entities from `pool`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCommand {
    /// The pool to draw from.
    pub pool: PoolId,
    /// How many entities to acquire. Anything beyond the pool's free capacity is dropped.
    pub amount: u32,
    /// Placement hints for the spawn profile.
    pub context: SpawnContext,
}

impl SpawnCommand {
    /// A request without placement hints.
    pub fn new(pool: PoolId, amount: u32) -> Self {
        Self {
            pool,
            amount,
            context: SpawnContext::default(),
        }
    }

    /// Sets the spawn origin.
    #[must_use]
    pub fn at(mut self, origin: Vec3) -> Self {
        self.context.origin = Some(origin);
        self
    }

    /// Sets the travel direction.
    #[must_use]
    pub fn toward(mut self, direction: Vec2) -> Self {
        self.context.direction = Some(direction);
        self
    }

    /// Sets the travel speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.context.speed = Some(speed);
        self
    }
}

/// Return `entity` to a pool.
///
/// When `pool` is `None` the entity's pool membership decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DespawnCommand {
    /// The entity to release.
    pub entity: EntityId,
    /// Explicit pool, if the sender knows it.
    pub pool: Option<PoolId>,
}

impl DespawnCommand {
    /// Despawns `entity` from whichever pool owns it.
    pub fn new(entity: EntityId) -> Self {
        Self { entity, pool: None }
    }

    /// Despawns `entity` from `pool`.
    pub fn from_pool(entity: EntityId, pool: PoolId) -> Self {
        Self {
            entity,
            pool: Some(pool),
        }
    }
}

// --- State ---

/// A transition request for the state machine of kind `S`.
///
/// `from` is the state the sender observed. If the machine has moved on by the
/// time the command is flushed, the request is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCommand<S: StateKind> {
    /// The state the sender expects the machine to be in.
    pub from: S,
    /// The requested transition.
    pub transition: S::Transition,
}

impl<S: StateKind> StateCommand<S> {
    /// Creates a transition request.
    pub fn new(from: S, transition: S::Transition) -> Self {
        Self { from, transition }
    }
}

// --- Score ---

/// Points awarded to a score pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreContext {
    /// The score pool to update.
    pub pool: ScorePoolId,
    /// Points to add. Negative values subtract.
    pub points: i64,
    /// The entity that earned the points, if any.
    pub source: Option<EntityId>,
}

/// Add points to a score pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateScoreCommand {
    /// What to add and where.
    pub context: ScoreContext,
}

impl UpdateScoreCommand {
    /// Awards `points` to `pool`.
    pub fn new(pool: ScorePoolId, points: i64) -> Self {
        Self {
            context: ScoreContext {
                pool,
                points,
                source: None,
            },
        }
    }

    /// Records which entity earned the points.
    #[must_use]
    pub fn from_source(mut self, source: EntityId) -> Self {
        self.context.source = Some(source);
        self
    }
}

// --- Conversions ---

impl From<SpawnCommand> for Command {
    fn from(command: SpawnCommand) -> Self {
        Command::Spawn(command)
    }
}

impl From<DespawnCommand> for Command {
    fn from(command: DespawnCommand) -> Self {
        Command::Despawn(command)
    }
}

impl From<StateCommand<GameState>> for Command {
    fn from(command: StateCommand<GameState>) -> Self {
        Command::GameState(command)
    }
}

impl From<StateCommand<MatchState>> for Command {
    fn from(command: StateCommand<MatchState>) -> Self {
        Command::MatchState(command)
    }
}

impl From<UpdateScoreCommand> for Command {
    fn from(command: UpdateScoreCommand) -> Self {
        Command::UpdateScore(command)
    }
}
