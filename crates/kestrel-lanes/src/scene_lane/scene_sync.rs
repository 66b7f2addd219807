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

use kestrel_data::ecs::{Filter, SceneNodeComponent, TransformComponent};

use crate::{System, UpdateContext};

/// Mirrors object transforms into the scene graph.
///
/// Dirty transforms are written as local matrices into their linked nodes, the
/// graph propagates world transforms, and the result is copied back into each
/// [`SceneNodeComponent`] so gameplay code can read world positions without
/// touching the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneSyncSystem;

impl System for SceneSyncSystem {
    fn name(&self) -> &'static str {
        "SceneSyncSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let scene = &mut *ctx.scene;
        let mut written = 0usize;
        ctx.world.for_each_mut::<(TransformComponent, SceneNodeComponent), _>(
            Filter::Enabled,
            |entity, (transform, link)| {
                if !transform.is_dirty() {
                    return;
                }
                if scene.set_local_transform(link.node, transform.to_mat4()) {
                    written += 1;
                } else {
                    ctx.logger
                        .warn(format_args!("{entity:?} links to missing node {:?}", link.node));
                }
            },
        );

        let updated = scene.update_world_transforms();
        if updated == 0 {
            return;
        }

        let scene = &*scene;
        ctx.world
            .for_each_mut::<SceneNodeComponent, _>(Filter::Enabled, |_, link| {
                if let Some(world) = scene.world_transform(link.node) {
                    link.world_transform = world;
                }
            });
        ctx.logger.trace(format_args!(
            "scene sync wrote {written} node(s), {updated} world transform(s) updated"
        ));
    }
}
