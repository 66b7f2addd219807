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

use kestrel_core::math::Mat4;
use kestrel_core::scene::SceneNodeId;

use crate::ecs::Component;

/// Links a game object to a node of the renderer's scene graph.
///
/// The link is an arena index, never a pointer. `world_transform` holds the
/// matrix read back after the last scene sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNodeComponent {
    /// The linked node.
    pub node: SceneNodeId,
    /// The node's world matrix as of the last sync.
    pub world_transform: Mat4,
}

impl SceneNodeComponent {
    /// Links to `node`.
    pub fn new(node: SceneNodeId) -> Self {
        Self {
            node,
            world_transform: Mat4::IDENTITY,
        }
    }
}

impl Component for SceneNodeComponent {}
