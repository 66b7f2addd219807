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

use crate::ecs::GameObjectMut;
use crate::error::EcsError;

/// Builds the full component set of one pooled entity.
///
/// Called once per slot while the pool is filled. Any closure with the right
/// signature is a template.
pub trait PoolTemplate {
    /// Attaches every component the pooled entity needs.
    fn build(&self, object: &mut GameObjectMut<'_>) -> Result<(), EcsError>;
}

impl<F> PoolTemplate for F
where
    F: Fn(&mut GameObjectMut<'_>) -> Result<(), EcsError>,
{
    fn build(&self, object: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
        self(object)
    }
}
