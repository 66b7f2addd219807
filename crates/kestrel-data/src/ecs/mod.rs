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

//! Kestrel's entity-component store.
//!
//! Every component type gets a stable [`ComponentTypeId`] from the
//! [`ComponentRegistry`] and one dense, sparse-set backed storage. Attach,
//! detach and lookup are O(1). Queries walk the smallest participating storage
//! and probe the others, so a `find::<(A, B)>()` never yields an entity that
//! lacks one of the listed types.
//!
//! The primary entry point for interacting with the ECS is the [`World`] struct.
//!
//! ## Iteration and structural changes
//!
//! Attaching or detaching components requires `&mut World`, while a [`Find`]
//! or [`View`] borrows the world immutably. Mutable iteration goes through
//! [`World::for_each_mut`], whose closure only sees component references. The
//! borrow checker therefore rules out structural changes during a query.

mod component;
mod entity_store;
mod game_object;
mod query;
mod registry;
mod storage;
mod world;

pub mod components;

pub use component::{Component, ComponentHooks, Hook};
pub use components::*;
pub use game_object::{GameObject, GameObjectMut};
pub use query::{ComponentQuery, Filter, Find, View};
pub use registry::{ComponentInfo, ComponentRegistry, ComponentTypeId};
pub use world::World;

#[cfg(test)]
mod tests;
