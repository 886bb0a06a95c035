//! Tick-driven lifecycle controller
//!
//! [`Simulation`] owns the only real state in the system: the tick counter,
//! the per-hive throttle table, and the active config. Each heartbeat
//! advances the counter by one; when the counter lands on a check boundary
//! both periodic scans run back to back on the caller's thread:
//!
//! 1. hive scan - spawn admission per loaded hive ([`spawning`])
//! 2. creature scan - lifespan and lost-creature despawn ([`despawn`])
//!
//! All tick comparisons are monotonic `>=` tests against the ever-increasing
//! counter, so a host that drops or delays heartbeats only ever makes checks
//! more due, never premature.

pub mod despawn;
pub mod spawning;

pub use despawn::run_creature_scan;
pub use spawning::{run_hive_scan, SpawnDecision, ThrottleTable};

use std::fmt;
use std::path::Path;

use crate::core::config::RegenConfig;
use crate::core::error::Result;
use crate::core::types::{CreatureId, HiveKey, Tick};
use crate::world::WorldAccess;

/// Events generated during a check cycle
///
/// Returned to the caller for display; the same information goes to the
/// structured log.
#[derive(Debug, Clone, Copy)]
pub enum LifecycleEvent {
    /// A hive passed admission and produced a creature
    BeeSpawned {
        hive: HiveKey,
        creature: CreatureId,
        tick: Tick,
    },
    /// A creature was removed by one of the despawn policies
    BeeDespawned {
        creature: CreatureId,
        tick: Tick,
        reason: DespawnReason,
    },
}

/// Why a creature was removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DespawnReason {
    /// Reached the configured lifespan
    Lifespan { age_ticks: u64 },
    /// Away from home past the grace period with no rescue in sight
    Lost { distance_from_home: f64 },
}

impl fmt::Display for DespawnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DespawnReason::Lifespan { .. } => write!(f, "lifespan expiry"),
            DespawnReason::Lost { .. } => write!(f, "lost expiry"),
        }
    }
}

/// The lifecycle controller: tick source, throttle table, active config
pub struct Simulation {
    pub config: RegenConfig,
    pub throttle: ThrottleTable,
    pub current_tick: Tick,
}

impl Simulation {
    pub fn new(config: RegenConfig) -> Self {
        tracing::info!("Hive lifecycle enabled (tick-based timing with lost bee detection)");
        Self {
            config,
            throttle: ThrottleTable::new(),
            current_tick: 0,
        }
    }

    /// Advance the tick counter by exactly one heartbeat
    pub fn advance_tick(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// True when the counter sits on a check boundary
    pub fn due_for_check(&self) -> bool {
        self.current_tick % self.config.check_interval_ticks == 0
    }

    /// Run both periodic scans at the current tick
    pub fn run_check_cycle<W: WorldAccess>(&mut self, world: &mut W) -> Vec<LifecycleEvent> {
        let now = self.current_tick;
        let mut events = spawning::run_hive_scan(world, &mut self.throttle, &self.config, now);
        events.extend(despawn::run_creature_scan(world, &self.config, now));
        events
    }

    /// One host heartbeat: advance the counter, scan if a boundary was hit
    pub fn heartbeat<W: WorldAccess>(&mut self, world: &mut W) -> Vec<LifecycleEvent> {
        self.advance_tick();
        if self.due_for_check() {
            self.run_check_cycle(world)
        } else {
            Vec::new()
        }
    }

    /// Re-read the config file, leaving throttle state and the counter alone.
    ///
    /// On failure the previous config stays active.
    pub fn reload_config(&mut self, path: &Path) -> Result<()> {
        let config = RegenConfig::load(path)?;
        self.config = config;
        tracing::info!("Configuration reloaded");
        Ok(())
    }
}
