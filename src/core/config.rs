//! Lifecycle configuration with documented constants
//!
//! All tick periods and thresholds are collected here with explanations of
//! their purpose and how they interact with each other. Values load from a
//! TOML file whose keys are camelCase; any missing key falls back to its
//! default, so a partial (or absent) file still yields a working config.

use crate::core::error::{HivewardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ceiling on the rescue-scan half-width.
///
/// The nearby-hive check reads `(2r+1)^3` blocks on the simulation thread,
/// so the half-width has to stay small: r = 16 already means 35,937 block
/// reads per lost creature per cycle.
const MAX_NEARBY_RANGE: u32 = 16;

/// Configuration for the spawn-throttling and despawn systems
///
/// All durations are in ticks; all distances are in blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegenConfig {
    // === CHECK SCHEDULING ===
    /// Period between hive scans and creature scans
    ///
    /// Both scans run on the same cadence. Lower values tighten the timing
    /// precision of every other threshold at the cost of more scan work.
    pub check_interval_ticks: u64,

    // === HIVE SPAWNING ===
    /// Minimum ticks between two successful spawns from the same hive
    pub cooldown_ticks: u64,

    /// Cap on spawns per hive per interval window
    pub max_bees_per_interval: u32,

    /// Window length for the per-hive spawn cap
    ///
    /// Together with `max_bees_per_interval` this bounds the long-run spawn
    /// rate; the cooldown prevents bursts right after a window resets.
    pub spawn_interval_ticks: u64,

    /// Population snapshot ceiling to allow spawning
    ///
    /// A hive whose current occupant count exceeds this never receives a
    /// spawn. 0 means "only spawn into an empty hive".
    pub max_bees_in_hive: u32,

    // === DESPAWN ===
    /// Lifespan before removal; 0 disables lifespan despawn
    pub despawn_ticks: u64,

    // === LOST-BEE TRACKING ===
    /// Enables the lost-creature state machine
    pub lost_despawn_enabled: bool,

    /// Grace period once a creature is marked lost
    pub lost_despawn_ticks: u64,

    /// Distance from home (blocks) beyond which a creature counts as away
    pub max_distance_from_home: u32,

    /// Enables the nearby-hive rescue check for away creatures
    pub lost_despawn_check_nearby_hives: bool,

    /// Cube half-width for the rescue check
    ///
    /// The scan reads a cube of side `2r+1` centered on the creature. Keep
    /// this small; `validate` rejects values above 16.
    pub lost_despawn_nearby_range: u32,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            check_interval_ticks: 12_000,
            cooldown_ticks: 12_000,
            max_bees_per_interval: 3,
            spawn_interval_ticks: 72_000,
            max_bees_in_hive: 0,
            despawn_ticks: 6_000,
            lost_despawn_enabled: true,
            lost_despawn_ticks: 6_000,
            max_distance_from_home: 20,
            lost_despawn_check_nearby_hives: true,
            lost_despawn_nearby_range: 5,
        }
    }
}

impl RegenConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config
            .validate()
            .map_err(HivewardError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.check_interval_ticks == 0 {
            return Err("checkIntervalTicks must be >= 1".into());
        }

        if self.lost_despawn_nearby_range > MAX_NEARBY_RANGE {
            let r = self.lost_despawn_nearby_range as u64;
            return Err(format!(
                "lostDespawnNearbyRange ({}) would scan {} blocks per check; max is {}",
                r,
                (2 * r + 1).pow(3),
                MAX_NEARBY_RANGE
            ));
        }

        Ok(())
    }

    /// Squared away-from-home threshold, precomputed for the hot path
    pub fn max_distance_squared(&self) -> f64 {
        let d = self.max_distance_from_home as f64;
        d * d
    }
}
