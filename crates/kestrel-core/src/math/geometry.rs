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

//! Provides the axis-aligned bounding box used for level bounds and overlap tests.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corner points. Gameplay uses
/// it both for the rectangular play area of a level and for the collision
/// volume of moving objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from two corner points, in any order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a new `Aabb` from a center point and its half-extents.
    ///
    /// Negative half-extents are made positive.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center point of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents of the box.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Returns a copy of the box moved by `offset`.
    #[inline]
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns a copy shrunk by `margin` on every side of the X and Y axes.
    ///
    /// The margin is clamped so the box never inverts.
    #[must_use]
    pub fn inset_xy(&self, margin: f32) -> Self {
        let half = self.half_extents();
        let mx = margin.min(half.x).max(0.0);
        let my = margin.min(half.y).max(0.0);
        Self {
            min: Vec3::new(self.min.x + mx, self.min.y + my, self.min.z),
            max: Vec3::new(self.max.x - mx, self.max.y - my, self.max.z),
        }
    }

    /// Checks if the box is valid (`min <= max` on all axes).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Checks whether a point lies inside or on the boundary of the box.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        (p.x >= self.min.x && p.x <= self.max.x)
            && (p.y >= self.min.y && p.y <= self.max.y)
            && (p.z >= self.min.z && p.z <= self.max.z)
    }

    /// Checks whether this box overlaps another. Touching boxes count as overlapping.
    #[inline]
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
    }
}
