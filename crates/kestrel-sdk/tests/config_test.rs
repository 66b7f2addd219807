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

//! Loading configs from text and turning them into game worlds.

use anyhow::Result;
use approx::assert_relative_eq;
use kestrel_sdk::prelude::*;
use kestrel_sdk::{ConfigError, PlacementConfig};

const RON_CONFIG: &str = r#"
(
    seed: 7,
    level: (width: 64.0, height: 48.0),
    pools: [
        (id: 1, size: 12, placement: Edge(edge: Top, margin: 2.0)),
        (id: 2, size: 32, placement: Origin),
        (id: 3, size: 2, placement: Fixed((x: 0.0, y: -20.0, z: 0.0))),
    ],
    spawn_rules: [
        (pool: 1, interval: 0.75, amount: 2, max_active: Some(6)),
    ],
    timings: (warmup: 0.5, countdown: 2.0),
)
"#;

const JSON_CONFIG: &str = r#"{
    "level": { "width": 30.0, "height": 30.0 },
    "pools": [
        { "id": 4, "size": 8, "placement": { "Random": { "margin": 1.5 } } }
    ],
    "spawn_rules": [
        { "pool": 4, "interval": 2.0, "initial_delay": 1.0 }
    ]
}"#;

fn empty_template(_: &mut GameObjectMut<'_>) -> Result<(), EcsError> {
    Ok(())
}

#[test]
fn test_ron_config_round_trips_into_a_world() -> Result<()> {
    // --- 1. ARRANGE ---
    let config = GameConfig::from_ron_str(RON_CONFIG)?;

    // --- 2. ACT ---
    let mut builder = GameWorldBuilder::new(config.clone(), Logger::disabled());
    for pool in &config.pools {
        builder = builder.template(pool.id, empty_template);
    }
    let game = builder.build()?;

    // --- 3. ASSERT ---
    assert_eq!(config.seed, 7);
    assert_eq!(
        config.pool(PoolId(1)).map(|p| p.placement),
        Some(PlacementConfig::Edge {
            edge: kestrel_agents::spawn::LevelEdge::Top,
            margin: 2.0
        })
    );
    assert_eq!(config.spawn_rules[0].amount, 2);
    assert_eq!(config.spawn_rules[0].max_active, Some(6));
    assert_relative_eq!(config.timings.warmup, 0.5);
    assert_relative_eq!(config.timings.respawn_delay, 1.5);
    assert_relative_eq!(game.level().bounds().max.x, 32.0);
    assert_eq!(game.world().len(), 12 + 32 + 2);
    Ok(())
}

#[test]
fn test_json_config_fills_defaults() -> Result<()> {
    let config = GameConfig::from_json_str(JSON_CONFIG)?;

    assert_eq!(config.seed, 0);
    assert_eq!(config.spawn_rules[0].amount, 1);
    assert_relative_eq!(config.spawn_rules[0].initial_delay, 1.0);
    assert_eq!(
        config.pool(PoolId(4)).map(|p| p.placement),
        Some(PlacementConfig::Random { margin: 1.5 })
    );
    Ok(())
}

#[test]
fn test_malformed_text_reports_the_format() {
    assert!(matches!(GameConfig::from_ron_str("(pools: [ ("), Err(ConfigError::Ron(_))));
    assert!(matches!(GameConfig::from_json_str("{ \"pools\": 3 }"), Err(ConfigError::Json(_))));
}

#[test]
fn test_parsed_but_invalid_config_is_rejected() {
    let text = r#"(pools: [(id: 1, size: 4)], spawn_rules: [(pool: 9, interval: 1.0)])"#;

    let error = GameConfig::from_ron_str(text).err();

    assert!(
        matches!(&error, Some(ConfigError::Invalid(message)) if message.contains("unknown pool")),
        "got {error:?}"
    );
}
