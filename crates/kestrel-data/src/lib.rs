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

//! # Kestrel Data
//!
//! The data layer of the simulation core. It owns every piece of state that
//! managers mutate during a flush:
//!
//! - the [`ecs::World`] (entity store, component registry and per-type storage),
//! - the object pools in [`pool`],
//! - the [`session::Session`] holding game and match state,
//! - the [`level::Level`] bounds and the [`score::ScoreBoard`].
//!
//! Systems only read from this layer or mutate components they own; structural
//! changes travel through commands handled by the agents layer.

#![warn(missing_docs)]

pub mod ecs;
pub mod error;
pub mod level;
pub mod pool;
pub mod score;
pub mod session;
pub mod state;

pub use error::EcsError;
