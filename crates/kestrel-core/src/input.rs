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

//! The immutable per-frame input state handed to systems.
//!
//! Platform adapters translate whatever the windowing layer reports into an
//! [`InputSnapshot`] once per frame. The simulation never polls hardware.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// A digital gamepad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum GamepadButton {
    /// Bottom face button.
    A = 1 << 0,
    /// Right face button.
    B = 1 << 1,
    /// Left face button.
    X = 1 << 2,
    /// Top face button.
    Y = 1 << 3,
    /// Start / options.
    Start = 1 << 4,
    /// Select / back.
    Select = 1 << 5,
    /// Left shoulder.
    LeftShoulder = 1 << 6,
    /// Right shoulder.
    RightShoulder = 1 << 7,
}

/// A compact set of pressed [`GamepadButton`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonSet(u16);

impl ButtonSet {
    /// No buttons pressed.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy with `button` added.
    #[must_use]
    pub const fn with(self, button: GamepadButton) -> Self {
        Self(self.0 | button as u16)
    }

    /// Checks whether `button` is in the set.
    #[inline]
    pub const fn contains(self, button: GamepadButton) -> bool {
        self.0 & button as u16 != 0
    }

    /// Adds `button` to the set.
    pub fn insert(&mut self, button: GamepadButton) {
        self.0 |= button as u16;
    }

    /// Removes `button` from the set.
    pub fn remove(&mut self, button: GamepadButton) {
        self.0 &= !(button as u16);
    }
}

/// State of a single gamepad for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    /// Left analog stick, each axis in `[-1, 1]`.
    pub left_stick: Vec2,
    /// Right analog stick, each axis in `[-1, 1]`.
    pub right_stick: Vec2,
    /// Buttons held this frame.
    pub buttons: ButtonSet,
    /// Buttons held on the previous frame, used for edge detection.
    pub previous_buttons: ButtonSet,
}

impl GamepadState {
    /// Whether `button` is held this frame.
    #[inline]
    pub fn is_down(&self, button: GamepadButton) -> bool {
        self.buttons.contains(button)
    }

    /// Whether `button` went down this frame.
    #[inline]
    pub fn just_pressed(&self, button: GamepadButton) -> bool {
        self.buttons.contains(button) && !self.previous_buttons.contains(button)
    }

    /// Whether `button` was released this frame.
    #[inline]
    pub fn just_released(&self, button: GamepadButton) -> bool {
        !self.buttons.contains(button) && self.previous_buttons.contains(button)
    }
}

/// Immutable input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// The primary gamepad.
    pub gamepad: GamepadState,
}

impl InputSnapshot {
    /// A snapshot with nothing pressed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derives the next frame's snapshot: the current buttons become the previous ones.
    ///
    /// Adapters call this before applying the new frame's raw state.
    #[must_use]
    pub fn advance(&self, left_stick: Vec2, right_stick: Vec2, buttons: ButtonSet) -> Self {
        Self {
            gamepad: GamepadState {
                left_stick,
                right_stick,
                buttons,
                previous_buttons: self.gamepad.buttons,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_detection_over_two_frames() {
        let held = ButtonSet::EMPTY.with(GamepadButton::Start);
        let first = InputSnapshot::empty().advance(Vec2::ZERO, Vec2::ZERO, held);
        let second = first.advance(Vec2::ZERO, Vec2::ZERO, held);
        let third = second.advance(Vec2::ZERO, Vec2::ZERO, ButtonSet::EMPTY);

        assert!(first.gamepad.just_pressed(GamepadButton::Start));
        assert!(second.gamepad.is_down(GamepadButton::Start));
        assert!(!second.gamepad.just_pressed(GamepadButton::Start));
        assert!(third.gamepad.just_released(GamepadButton::Start));
    }

    #[test]
    fn test_button_set_insert_remove() {
        let mut set = ButtonSet::EMPTY;
        set.insert(GamepadButton::A);
        set.insert(GamepadButton::Y);
        set.remove(GamepadButton::A);

        assert!(!set.contains(GamepadButton::A));
        assert!(set.contains(GamepadButton::Y));
    }
}
