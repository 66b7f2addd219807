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

use kestrel_data::pool::PoolId;
use serde::{Deserialize, Serialize};

use crate::command::SpawnCommand;

/// Periodically spawns from a pool while a match is being played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// The pool to spawn from.
    pub pool: PoolId,
    /// Seconds between two waves. Must be positive.
    pub interval: f32,
    /// Entities per wave.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Seconds before the first wave.
    #[serde(default)]
    pub initial_delay: f32,
    /// Skip a wave while at least this many entities of the pool are active.
    #[serde(default)]
    pub max_active: Option<usize>,
}

fn default_amount() -> u32 {
    1
}

impl SpawnRule {
    /// One entity from `pool` every `interval` seconds.
    pub fn every(pool: PoolId, interval: f32) -> Self {
        Self {
            pool,
            interval,
            amount: default_amount(),
            initial_delay: 0.0,
            max_active: None,
        }
    }

    /// Sets the wave size.
    #[must_use]
    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Delays the first wave.
    #[must_use]
    pub fn after(mut self, initial_delay: f32) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Caps the number of simultaneously active entities.
    #[must_use]
    pub fn max_active(mut self, max_active: usize) -> Self {
        self.max_active = Some(max_active);
        self
    }

    /// The command one wave produces.
    #[must_use]
    pub fn command(&self) -> SpawnCommand {
        SpawnCommand::new(self.pool, self.amount)
    }
}

/// Tracks when a [`SpawnRule`] fires next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    rule: SpawnRule,
    until_next: f32,
}

impl SpawnTimer {
    /// A timer whose first wave is due after the rule's initial delay.
    pub fn new(rule: SpawnRule) -> Self {
        debug_assert!(
            rule.interval > 0.0,
            "spawn interval must be positive, got {}",
            rule.interval
        );
        Self {
            rule,
            until_next: rule.initial_delay,
        }
    }

    /// The rule being timed.
    #[must_use]
    pub fn rule(&self) -> &SpawnRule {
        &self.rule
    }

    /// Seconds until the next wave.
    #[must_use]
    pub fn until_next(&self) -> f32 {
        self.until_next
    }

    /// Advances the timer and returns how many waves became due.
    ///
    /// A non-positive interval yields at most one wave per tick.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.until_next -= dt;
        if self.until_next > 0.0 {
            return 0;
        }
        if self.rule.interval <= 0.0 {
            self.until_next = 0.0;
            return 1;
        }

        let mut waves = 0;
        while self.until_next <= 0.0 {
            self.until_next += self.rule.interval;
            waves += 1;
        }
        waves
    }

    /// Restarts the timer from the initial delay.
    pub fn reset(&mut self) {
        self.until_next = self.rule.initial_delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_after_delay_then_every_interval() {
        let mut timer = SpawnTimer::new(SpawnRule::every(PoolId(0), 1.0).after(0.5));

        assert_eq!(timer.tick(0.25), 0);
        assert_eq!(timer.tick(0.25), 1, "Due at the end of the delay");
        assert_eq!(timer.tick(0.5), 0);
        assert_eq!(timer.tick(0.5), 1);
        assert_eq!(timer.tick(2.0), 2, "A long frame catches up");
    }

    #[test]
    fn test_reset_restores_initial_delay() {
        let mut timer = SpawnTimer::new(SpawnRule::every(PoolId(0), 2.0).after(1.0));
        timer.tick(1.5);

        timer.reset();

        assert_eq!(timer.until_next(), 1.0);
    }
}
