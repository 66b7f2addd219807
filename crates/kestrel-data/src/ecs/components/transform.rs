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

use kestrel_core::math::{Mat4, Vec3};

use crate::ecs::{Component, ComponentHooks};

/// The local transform of a game object.
///
/// Every setter raises the `dirty` flag. Consumers such as the scene sync read
/// the flag and a clear pass at the end of the frame lowers it again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    translation: Vec3,
    rotation: f32,
    scale: Vec3,
    dirty: bool,
}

impl TransformComponent {
    /// A transform at `translation` with no rotation and unit scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// The position.
    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// The rotation about the z axis, in radians.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// The scale.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Whether the transform changed since the last clear.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Moves to an absolute position.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.dirty = true;
    }

    /// Moves by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
        self.dirty = true;
    }

    /// Sets the z rotation, in radians.
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
        self.dirty = true;
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Lowers the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// The local matrix (`translation * rotation * scale`).
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_translation_rotation_scale(self.translation, self.rotation, self.scale)
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: 0.0,
            scale: Vec3::ONE,
            dirty: true,
        }
    }
}

impl Component for TransformComponent {
    const HOOKS: ComponentHooks = ComponentHooks::ACQUIRE;

    // A recycled object is repositioned by its spawn placer, force a sync.
    fn on_acquire(&mut self) {
        self.dirty = true;
    }
}
