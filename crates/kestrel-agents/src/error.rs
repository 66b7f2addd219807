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

//! Errors raised while wiring managers into a dispatcher.

use thiserror::Error;

use crate::command::CommandKind;

/// Setup errors of the command dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Another manager already handles this command kind.
    #[error("`{manager}` cannot handle {kind:?}: already routed to `{existing}`")]
    DuplicateHandler {
        /// The command kind both managers claim.
        kind: CommandKind,
        /// The manager registered first.
        existing: &'static str,
        /// The manager whose registration was refused.
        manager: &'static str,
    },
}
