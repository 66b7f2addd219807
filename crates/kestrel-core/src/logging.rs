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

//! An injectable logging handle.
//!
//! Managers, systems and the game loop receive a [`Logger`] through their
//! constructors or the update context instead of reaching for a global. Each
//! handle carries a scope that becomes the `log` target, so an application can
//! route `kestrel::spawn` and `kestrel::state::game` independently with any
//! `log` backend (e.g. `env_logger` filters).
//!
//! Logging is diagnostics only. Nothing in the simulation branches on it.

use std::borrow::Cow;
use std::fmt;

use log::Level;

/// The root scope used when none is given.
pub const ROOT_SCOPE: &str = "kestrel";

/// A cheap, cloneable handle that forwards records to the `log` facade under a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    scope: Cow<'static, str>,
    enabled: bool,
}

impl Logger {
    /// Creates a logger for the given scope.
    pub fn new(scope: impl Into<Cow<'static, str>>) -> Self {
        Self {
            scope: scope.into(),
            enabled: true,
        }
    }

    /// A logger that drops every record.
    pub fn disabled() -> Self {
        Self {
            scope: Cow::Borrowed(ROOT_SCOPE),
            enabled: false,
        }
    }

    /// Derives a child logger whose scope is `<parent>::<child>`.
    #[must_use]
    pub fn scoped(&self, child: &str) -> Self {
        Self {
            scope: Cow::Owned(format!("{}::{}", self.scope, child)),
            enabled: self.enabled,
        }
    }

    /// The `log` target records are emitted under.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether this handle forwards anything at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emits a record at `level`.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled && log::log_enabled!(target: self.scope.as_ref(), level) {
            log::log!(target: self.scope.as_ref(), level, "{}", args);
        }
    }

    /// Emits an `error` record.
    #[inline]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Emits a `warn` record.
    #[inline]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    /// Emits an `info` record.
    #[inline]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Emits a `debug` record.
    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    /// Emits a `trace` record.
    #[inline]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(ROOT_SCOPE)
    }
}
