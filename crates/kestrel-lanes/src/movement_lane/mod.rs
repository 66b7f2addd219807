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

//! Steering, integration and level-bounds handling.

mod level_bounds;
mod move2d;
mod player_control;

pub use level_bounds::{bounds_contact, BoundsContact, LevelBoundsBehaviorSystem};
pub use move2d::{integrate_velocity, Move2DSystem};
pub use player_control::PlayerControlSystem;
