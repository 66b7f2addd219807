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

//! # Kestrel Agents
//!
//! The layer that turns deferred requests into mutations. Systems describe
//! what they want as [`command::Command`] values; at each commit point the
//! [`command::CommandDispatcher`] routes them to the registered managers and
//! flushes those managers in registration order:
//!
//! - [`spawn::SpawnManager`] acquires and releases pooled entities,
//! - [`state::StateManager`] drives the game and match state machines,
//! - [`score::ScoreManager`] updates the score board.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod score;
pub mod spawn;
pub mod state;

pub use command::{Command, CommandBuffer, CommandDispatcher, CommandKind, Manager, ManagerContext};
pub use error::DispatchError;
