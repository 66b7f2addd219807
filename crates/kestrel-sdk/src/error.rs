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

use kestrel_agents::DispatchError;
use kestrel_data::EcsError;
use thiserror::Error;

/// Errors raised while loading a config or assembling a game world from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not valid RON for a [`crate::GameConfig`].
    #[error("failed to parse RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// The text is not valid JSON for a [`crate::GameConfig`].
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Filling the pools failed.
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// Two managers claimed the same command kind.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The config parsed but describes an impossible world.
    #[error("invalid config: {0}")]
    Invalid(String),
}
