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

use kestrel_agents::command::StateCommand;
use kestrel_core::input::GamepadButton;
use kestrel_data::state::{GameState, GameStateTransitionId};

use crate::{System, UpdateContext};

/// Maps menu buttons to game state requests.
///
/// - `Start` on the title screen starts the game, while running or paused it
///   toggles pause.
/// - `Select` while paused returns to the title screen.
///
/// Requests are emitted on the frame a button goes down, never while it is
/// held. With `auto_boot` the system also walks a fresh session from
/// `Undefined` through `Start` to `Title` without input.
#[derive(Debug, Clone)]
pub struct GameStateInputSystem {
    start_button: GamepadButton,
    back_button: GamepadButton,
    auto_boot: bool,
}

impl GameStateInputSystem {
    /// Uses `Start` and `Select` and boots automatically.
    pub fn new() -> Self {
        Self {
            start_button: GamepadButton::Start,
            back_button: GamepadButton::Select,
            auto_boot: true,
        }
    }

    /// Rebinds the start and back buttons.
    #[must_use]
    pub fn with_buttons(mut self, start: GamepadButton, back: GamepadButton) -> Self {
        self.start_button = start;
        self.back_button = back;
        self
    }

    /// Disables the automatic boot sequence.
    #[must_use]
    pub fn manual_boot(mut self) -> Self {
        self.auto_boot = false;
        self
    }
}

impl Default for GameStateInputSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GameStateInputSystem {
    fn name(&self) -> &'static str {
        "GameStateInputSystem"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        use GameStateTransitionId::*;

        let pad = &ctx.input.gamepad;
        let start = pad.just_pressed(self.start_button);
        let back = pad.just_pressed(self.back_button);

        let state = ctx.session.game_state();
        let transition = match state {
            GameState::Undefined if self.auto_boot => Some(BootRequested),
            GameState::Start if self.auto_boot => Some(TitleRequested),
            GameState::Title if start => Some(StartRequested),
            GameState::Running | GameState::Paused if start => Some(TogglePause),
            GameState::Paused if back => Some(TitleRequested),
            _ => None,
        };

        if let Some(transition) = transition {
            ctx.commands.add(StateCommand::new(state, transition));
        }
    }
}
