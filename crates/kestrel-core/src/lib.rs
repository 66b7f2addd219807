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

//! # Kestrel Core
//!
//! Foundational crate containing the types every other Kestrel crate agrees on:
//! math primitives, entity handles, the per-frame input snapshot, the injected
//! logging handle and the arena-backed scene graph consumed by renderers.

#![warn(missing_docs)]

pub mod ecs;
pub mod input;
pub mod logging;
pub mod math;
pub mod scene;

pub use ecs::entity::EntityId;
pub use input::InputSnapshot;
pub use logging::Logger;
