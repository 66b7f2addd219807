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

use crate::ecs::Component;
use crate::pool::PoolId;

/// Reserved tag carried by every active entity.
///
/// Managed by [`World::set_active`](crate::ecs::World::set_active); attach or
/// detach it by hand and the activity invariant breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Active;
impl Component for Active {}

/// Reserved tag carried by every inactive entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inactive;
impl Component for Inactive {}

/// Records which pool an entity was pre-warmed into.
///
/// Lets a despawn request without an explicit pool id find its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolMembershipComponent {
    /// The owning pool.
    pub pool: PoolId,
}
impl Component for PoolMembershipComponent {}
