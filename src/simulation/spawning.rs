//! Hive spawn throttling and admission
//!
//! Each hive gets a lazily created throttle record keyed by its location
//! identity. Admission composes three independent caps with AND semantics:
//! a population snapshot ceiling, a per-window spawn count, and a per-spawn
//! cooldown. Any one cap can suppress a spawn, which keeps spawning smooth
//! right after a window reset while still bounding hive population.

use ahash::AHashMap;

use crate::core::config::RegenConfig;
use crate::core::types::{HiveKey, Position, Tick};
use crate::creature::tags;
use crate::simulation::LifecycleEvent;
use crate::world::WorldAccess;

/// Per-hive throttle bookkeeping.
///
/// Created on first observation of the hive, never evicted; entries for
/// hives that no longer exist go permanently stale and are never read again.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiveThrottleState {
    /// Tick of the most recent successful spawn, absent until first spawn
    pub last_spawn_tick: Option<Tick>,
    /// Tick at which the current spawn-count window began
    pub interval_start: Option<Tick>,
    /// Creatures spawned since `interval_start`
    pub count_this_interval: u32,
}

/// Outcome of a single hive admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    Approved,
    Denied(DenialReason),
}

/// Why a hive was refused this cycle, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Occupant count exceeds `maxBeesInHive`
    HiveFull,
    /// `maxBeesPerInterval` already spawned this window
    IntervalCapReached,
    /// Last spawn was under `cooldownTicks` ago
    CoolingDown,
}

/// Mapping from hive identity to throttle state
#[derive(Debug, Default)]
pub struct ThrottleTable {
    states: AHashMap<HiveKey, HiveThrottleState>,
}

impl ThrottleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hives ever observed (stale entries included)
    pub fn tracked_hives(&self) -> usize {
        self.states.len()
    }

    /// Current throttle state for a hive, if it has ever been observed
    pub fn state(&self, key: &HiveKey) -> Option<&HiveThrottleState> {
        self.states.get(key)
    }

    /// Decide whether this hive may spawn a creature right now.
    ///
    /// Pure over the stored state apart from the table mutation itself:
    /// the window reset happens lazily here (once per observation), and an
    /// approval records the spawn against both the cooldown and the window
    /// count before returning.
    pub fn evaluate(
        &mut self,
        key: HiveKey,
        hive_population: u32,
        now: Tick,
        config: &RegenConfig,
    ) -> SpawnDecision {
        let state = self.states.entry(key).or_default();

        let window_expired = match state.interval_start {
            None => true,
            Some(start) => now.saturating_sub(start) >= config.spawn_interval_ticks,
        };
        if window_expired {
            state.interval_start = Some(now);
            state.count_this_interval = 0;
        }

        if hive_population > config.max_bees_in_hive {
            return SpawnDecision::Denied(DenialReason::HiveFull);
        }

        if state.count_this_interval >= config.max_bees_per_interval {
            return SpawnDecision::Denied(DenialReason::IntervalCapReached);
        }

        if let Some(last) = state.last_spawn_tick {
            if now.saturating_sub(last) < config.cooldown_ticks {
                return SpawnDecision::Denied(DenialReason::CoolingDown);
            }
        }

        state.last_spawn_tick = Some(now);
        state.count_this_interval += 1;
        SpawnDecision::Approved
    }
}

/// Scan every loaded hive and spawn where admission allows.
///
/// An approved hive gets a creature one block above its origin, centered on
/// the block (`+0.5, +1, +0.5`) so it does not materialize inside anything
/// solid. The new creature is flagged persistent and tagged with its spawn
/// tick and home before anything else can observe it.
pub fn run_hive_scan<W: WorldAccess>(
    world: &mut W,
    table: &mut ThrottleTable,
    config: &RegenConfig,
    now: Tick,
) -> Vec<LifecycleEvent> {
    let mut events = Vec::new();

    for site in world.hive_sites() {
        match table.evaluate(site.key, site.occupants, now, config) {
            SpawnDecision::Approved => {
                let origin = site.key.pos;
                let spawn_pos = Position::new(
                    origin.x as f64 + 0.5,
                    origin.y as f64 + 1.0,
                    origin.z as f64 + 0.5,
                );

                let creature = world.spawn_creature(site.key.world, spawn_pos);
                world.set_persistent(creature, true);
                tags::set_spawn_tick(world, creature, now);
                tags::set_home(world, creature, spawn_pos.block());
                // Stale timer could linger if the host reuses creature ids
                tags::clear_lost_since(world, creature);

                tracing::debug!(
                    "Spawned bee {:?} from hive at {:?} (tick {})",
                    creature,
                    origin,
                    now
                );
                events.push(LifecycleEvent::BeeSpawned {
                    hive: site.key,
                    creature,
                    tick: now,
                });
            }
            SpawnDecision::Denied(reason) => {
                tracing::trace!("Hive {:?} denied at tick {}: {:?}", site.key.pos, now, reason);
            }
        }
    }

    events
}
