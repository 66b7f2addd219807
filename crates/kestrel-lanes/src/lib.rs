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

//! # Kestrel Lanes
//!
//! The per-frame systems of the simulation. Every system implements
//! [`System`] and receives an [`UpdateContext`] bundling the frame's input,
//! the world, read-only session data and the command buffer.
//!
//! Systems may mutate the components they iterate over. Anything structural,
//! such as spawning, despawning, state changes and scoring, is requested
//! through the command buffer and applied by the agents layer at the next
//! commit point.

#![warn(missing_docs)]

pub mod collision_lane;
pub mod flow_lane;
pub mod gameplay_lane;
pub mod movement_lane;
pub mod scene_lane;
mod system;

pub use system::{System, UpdateContext};

#[cfg(test)]
mod testing;
