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

use kestrel_data::ecs::{CollisionStateComponent, Filter, TransformComponent};

use crate::{System, UpdateContext};

/// Lowers every transform's dirty flag. Runs after the scene sync.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformClearSystem;

impl System for TransformClearSystem {
    fn name(&self) -> &'static str {
        "TransformClearSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        ctx.world
            .for_each_mut::<TransformComponent, _>(Filter::All, |_, t| t.clear_dirty());
    }
}

/// Forgets this frame's collision hits. Runs after every hit consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionClearSystem;

impl System for CollisionClearSystem {
    fn name(&self) -> &'static str {
        "CollisionClearSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        ctx.world
            .for_each_mut::<CollisionStateComponent, _>(Filter::All, |_, state| state.clear());
    }
}
