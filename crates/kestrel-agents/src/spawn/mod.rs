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

//! Pool-backed spawning.
//!
//! The [`SpawnManager`] turns spawn and despawn commands into pool acquire and
//! release calls. Where a freshly acquired entity ends up and how it starts
//! moving is decided per pool by a [`SpawnProfile`].

mod initializer;
mod manager;
mod placer;
mod rules;

pub use initializer::*;
pub use manager::*;
pub use placer::*;
pub use rules::*;
