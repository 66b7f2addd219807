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

//! Fixed-capacity object pools.
//!
//! Every pool pre-constructs its entities once, before gameplay, from a
//! [`PoolTemplate`]. During gameplay entities only move between the active
//! and inactive subsets; nothing is constructed or destroyed.

mod game_object_pool;
mod registry;
mod template;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use game_object_pool::GameObjectPool;
pub use registry::PoolRegistry;
pub use template::PoolTemplate;

/// Identifies one logical spawn category, such as "enemy" or "bullet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(pub u32);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
