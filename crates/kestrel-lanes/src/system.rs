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

use kestrel_agents::CommandBuffer;
use kestrel_core::scene::SceneGraph;
use kestrel_core::{InputSnapshot, Logger};
use kestrel_data::ecs::World;
use kestrel_data::level::Level;
use kestrel_data::session::Session;

/// Everything a system sees during one update.
///
/// Pools and managers are absent: a system cannot restructure
/// the world, it can only queue commands.
pub struct UpdateContext<'a> {
    /// Seconds since the previous frame, never negative.
    pub delta_time: f32,
    /// The frame's input.
    pub input: &'a InputSnapshot,
    /// Where deferred requests go.
    pub commands: &'a mut CommandBuffer,
    /// The entity store.
    pub world: &'a mut World,
    /// Game and match state.
    pub session: &'a Session,
    /// The play area.
    pub level: &'a Level,
    /// The renderer-facing scene graph.
    pub scene: &'a mut SceneGraph,
    /// Diagnostics sink.
    pub logger: &'a Logger,
}

/// A unit of per-frame logic.
pub trait System {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the system for one frame.
    fn update(&mut self, ctx: &mut UpdateContext<'_>);
}
