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

//! The rectangular play area.

use kestrel_core::math::{Aabb, Vec3};

/// The play area objects are kept in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    bounds: Aabb,
}

impl Level {
    /// A level spanning `bounds`.
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }

    /// A level of `width` by `height` centered on the origin.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(Aabb::from_center_half_extents(
            Vec3::ZERO,
            Vec3::new(width * 0.5, height * 0.5, 0.0),
        ))
    }

    /// The play area.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::centered(100.0, 100.0)
    }
}
