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

//! Score bookkeeping.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a score pool, e.g. one per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScorePoolId(pub u32);

impl fmt::Display for ScorePoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score#{}", self.0)
    }
}

/// The running total of one score pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScorePool {
    /// Points gathered in the current match.
    pub total: i64,
    /// Best total ever reached.
    pub high_score: i64,
}

/// All score pools of a game world. Mutated only by the score manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pools: BTreeMap<ScorePoolId, ScorePool>,
}

impl ScoreBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `points` to `pool`, creating it on demand.
    ///
    /// Returns the totals before and after.
    pub fn add(&mut self, pool: ScorePoolId, points: i64) -> (i64, i64) {
        let entry = self.pools.entry(pool).or_default();
        let old = entry.total;
        entry.total = entry.total.saturating_add(points);
        entry.high_score = entry.high_score.max(entry.total);
        (old, entry.total)
    }

    /// The current total of `pool`, zero for unknown pools.
    #[must_use]
    pub fn total(&self, pool: ScorePoolId) -> i64 {
        self.pools.get(&pool).map_or(0, |p| p.total)
    }

    /// The pool record, if it exists.
    pub fn get(&self, pool: ScorePoolId) -> Option<&ScorePool> {
        self.pools.get(&pool)
    }

    /// Iterates over all pools in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ScorePoolId, &ScorePool)> {
        self.pools.iter().map(|(id, pool)| (*id, pool))
    }

    /// Zeroes every total, keeping high scores.
    pub fn reset_totals(&mut self) {
        for pool in self.pools.values_mut() {
            pool.total = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_survives_reset() {
        let mut board = ScoreBoard::new();
        let p1 = ScorePoolId(0);

        assert_eq!(board.add(p1, 100), (0, 100));
        assert_eq!(board.add(p1, -30), (100, 70));
        board.reset_totals();

        assert_eq!(board.total(p1), 0);
        assert_eq!(board.get(p1).map(|p| p.high_score), Some(100));
        assert_eq!(board.total(ScorePoolId(9)), 0);
    }
}
