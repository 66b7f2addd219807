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

//! Setup-time errors of the data layer.
//!
//! Per-frame conditions such as pool exhaustion or a missing component are not
//! errors and are reported as `None` / `false` by the relevant calls.

use kestrel_core::EntityId;
use thiserror::Error;

use crate::pool::PoolId;

/// Errors raised while building or mutating the world outside of the frame loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The handle is stale or was never issued.
    #[error("entity {0} does not exist")]
    EntityNotFound(EntityId),

    /// A component of this type is already attached to the entity.
    #[error("component `{component}` is already attached to entity {entity}")]
    ComponentAlreadyAttached {
        /// The entity the attach targeted.
        entity: EntityId,
        /// The Rust type name of the component.
        component: &'static str,
    },

    /// The activity tags can only be changed through `World::set_active`.
    #[error("component `{component}` is reserved and cannot be attached to entity {entity}")]
    ReservedComponent {
        /// The entity the attach targeted.
        entity: EntityId,
        /// The Rust type name of the tag.
        component: &'static str,
    },

    /// A pool with this id was registered twice.
    #[error("pool {0} is already registered")]
    DuplicatePool(PoolId),

    /// No pool is registered under this id.
    #[error("pool {0} is not registered")]
    UnknownPool(PoolId),

    /// Pools must hold at least one entity.
    #[error("pool {0} must have a non-zero size")]
    InvalidPoolSize(PoolId),
}
