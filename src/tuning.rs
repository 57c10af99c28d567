//! Data-driven game balance
//!
//! Every gameplay constant the simulation consults lives here so a balance
//! pass is a JSON edit. Missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives granted when a game starts
    pub starting_lives: u8,
    /// Distance moved per tick (percent of playfield)
    pub game_speed: f32,
    /// Simulated ms between direction re-rolls
    pub direction_interval_ms: f32,
    /// Pointer distance that starts a dwell lock (also obstacle contact)
    pub lock_radius: f32,
    /// Continuous dwell needed for an automatic hit (ms)
    pub lock_dwell_ms: f32,
    /// Score that spawns the second target/obstacle pair
    pub spawn_threshold: u64,
    /// Target visual extent used for click bounds
    pub target_size: f32,
    /// Pointer touching an obstacle costs a life
    pub obstacle_contact: bool,
    /// Obstacles follow the playfield direction like targets
    pub obstacles_move: bool,
    /// Drop hits arriving faster than the weapon's fire rate
    pub enforce_fire_rate: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            game_speed: GAME_SPEED,
            direction_interval_ms: DIRECTION_INTERVAL_MS,
            lock_radius: LOCK_RADIUS,
            lock_dwell_ms: LOCK_DWELL_MS,
            spawn_threshold: SPAWN_THRESHOLD,
            target_size: TARGET_SIZE,
            obstacle_contact: true,
            obstacles_move: false,
            enforce_fire_rate: false,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 3, "enforce_fire_rate": true }"#)
            .unwrap();
        assert_eq!(tuning.starting_lives, 3);
        assert!(tuning.enforce_fire_rate);
        assert_eq!(tuning.lock_dwell_ms, LOCK_DWELL_MS);
        assert_eq!(tuning.spawn_threshold, 1000);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
