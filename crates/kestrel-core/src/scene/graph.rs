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

use crate::math::Mat4;

/// Index of a node inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneNodeId(pub u32);

/// A single node of the arena.
///
/// Children reference their parent by index. The graph never stores pointers,
/// so nodes can be moved or the arena reallocated freely.
#[derive(Debug, Clone)]
pub struct SceneNode {
    parent: Option<SceneNodeId>,
    local: Mat4,
    world: Mat4,
    dirty: bool,
}

impl SceneNode {
    /// The parent of this node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<SceneNodeId> {
        self.parent
    }

    /// The local transform last written by the simulation.
    #[must_use]
    pub fn local_transform(&self) -> Mat4 {
        self.local
    }

    /// The world transform computed by the last [`SceneGraph::update_world_transforms`].
    #[must_use]
    pub fn world_transform(&self) -> Mat4 {
        self.world
    }
}

/// An arena of scene nodes with parent indices.
///
/// A parent must exist before any of its children is added, so every node's
/// parent has a smaller index. World transforms are therefore resolved with a
/// single forward pass over the arena.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under `parent` (or as a root) and returns its index.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn add_node(&mut self, parent: Option<SceneNodeId>) -> Option<SceneNodeId> {
        if let Some(p) = parent {
            if p.0 as usize >= self.nodes.len() {
                return None;
            }
        }
        let id = SceneNodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            parent,
            local: Mat4::IDENTITY,
            world: Mat4::IDENTITY,
            dirty: true,
        });
        Some(id)
    }

    /// Returns a node by index.
    pub fn node(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Writes a node's local transform. Returns `false` for an unknown node.
    pub fn set_local_transform(&mut self, id: SceneNodeId, local: Mat4) -> bool {
        match self.nodes.get_mut(id.0 as usize) {
            Some(node) => {
                node.local = local;
                node.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Reads a node's world transform.
    pub fn world_transform(&self, id: SceneNodeId) -> Option<Mat4> {
        self.node(id).map(SceneNode::world_transform)
    }

    /// Recomputes the world transform of every dirty node and its descendants.
    ///
    /// Returns the number of nodes whose world transform was recomputed.
    pub fn update_world_transforms(&mut self) -> usize {
        let mut updated = 0;
        for i in 0..self.nodes.len() {
            let (parent_world, parent_dirty) = match self.nodes[i].parent {
                Some(p) => {
                    let parent = &self.nodes[p.0 as usize];
                    (parent.world, parent.dirty)
                }
                None => (Mat4::IDENTITY, false),
            };

            let node = &mut self.nodes[i];
            if node.dirty || parent_dirty {
                node.world = parent_world * node.local;
                node.dirty = true;
                updated += 1;
            }
        }

        // Dirty flags are kept during the pass so descendants see them, then cleared.
        for node in &mut self.nodes {
            node.dirty = false;
        }
        updated
    }
}
