//! Creature despawn policies: lifespan expiry and lost-creature tracking
//!
//! Every check cycle walks all live creatures. Lifespan is evaluated first
//! and short-circuits: a creature removed for age is never lost-evaluated
//! that cycle. Lost tracking is a small per-creature state machine driven by
//! the squared distance between the creature and its recorded home:
//!
//! - Near (within threshold): any lost timer is cleared.
//! - Away, hive within the rescue cube: timer cleared, the creature can
//!   re-home there.
//! - Away, no timer yet: timer starts this tick (debounce, no removal).
//! - Away, timer past the grace period: removed.
//!
//! A freshly spawned creature starts Near (distance zero from its own home).

use crate::core::config::RegenConfig;
use crate::core::types::{CreatureId, Location, Position, Tick};
use crate::creature::tags;
use crate::simulation::{DespawnReason, LifecycleEvent};
use crate::world::WorldAccess;

/// Scan all live creatures and remove those that qualify for despawn
pub fn run_creature_scan<W: WorldAccess>(
    world: &mut W,
    config: &RegenConfig,
    now: Tick,
) -> Vec<LifecycleEvent> {
    let mut events = Vec::new();

    for id in world.creatures() {
        if let Some(event) = evaluate_lifespan(world, config, now, id) {
            events.push(event);
            continue;
        }

        if let Some(event) = evaluate_lost(world, config, now, id) {
            events.push(event);
        }
    }

    events
}

/// Lifespan path. Returns the removal event if the creature was despawned.
fn evaluate_lifespan<W: WorldAccess>(
    world: &mut W,
    config: &RegenConfig,
    now: Tick,
    id: CreatureId,
) -> Option<LifecycleEvent> {
    if config.despawn_ticks == 0 {
        return None;
    }

    let Some(spawned) = tags::spawn_tick(world, id) else {
        // Legacy or externally created creature: adopt it, lifespan starts
        // from this first observation
        tags::set_spawn_tick(world, id, now);
        return None;
    };

    let age_ticks = now.saturating_sub(spawned);
    if age_ticks < config.despawn_ticks {
        return None;
    }

    world.remove_creature(id);
    tracing::info!(
        "Despawned bee {:?} due to normal lifespan ({} ticks)",
        id,
        age_ticks
    );
    Some(LifecycleEvent::BeeDespawned {
        creature: id,
        tick: now,
        reason: DespawnReason::Lifespan { age_ticks },
    })
}

/// Lost path. Returns the removal event if the creature was despawned.
fn evaluate_lost<W: WorldAccess>(
    world: &mut W,
    config: &RegenConfig,
    now: Tick,
    id: CreatureId,
) -> Option<LifecycleEvent> {
    if !config.lost_despawn_enabled {
        return None;
    }

    let home = match tags::home(world, id) {
        Ok(Some(home)) => home,
        // No home recorded: lost-tracking is off for this creature
        Ok(None) => return None,
        Err(err) => {
            // Never remove a creature over a parsing error; skip this cycle
            tracing::warn!("Invalid bee home for {:?}: {}", id, err);
            return None;
        }
    };

    let location = world.creature_location(id)?;
    let distance_squared = location.position.distance_squared(&Position::from(home));

    if distance_squared <= config.max_distance_squared() {
        // Back in range: reset the timer if one was running
        tags::clear_lost_since(world, id);
        return None;
    }

    if config.lost_despawn_check_nearby_hives && hive_nearby(world, &location, config) {
        // Rescued: a hive is close enough, clear the timer and keep it alive
        tags::clear_lost_since(world, id);
        return None;
    }

    match tags::lost_since(world, id) {
        None => {
            tags::set_lost_since(world, id, now);
            None
        }
        Some(since) if now.saturating_sub(since) >= config.lost_despawn_ticks => {
            let distance_from_home = distance_squared.sqrt();
            world.remove_creature(id);
            tracing::info!(
                "Despawned bee {:?} due to being lost ({:.1} blocks from home)",
                id,
                distance_from_home
            );
            Some(LifecycleEvent::BeeDespawned {
                creature: id,
                tick: now,
                reason: DespawnReason::Lost { distance_from_home },
            })
        }
        // Timer running, still within the grace period
        Some(_) => None,
    }
}

/// Cube scan for a hive or nest around the creature, side `2r + 1`
fn hive_nearby<W: WorldAccess>(world: &W, location: &Location, config: &RegenConfig) -> bool {
    let center = location.position.block();
    let r = config.lost_despawn_nearby_range as i32;

    for dx in -r..=r {
        for dy in -r..=r {
            for dz in -r..=r {
                if world
                    .block_at(location.world, center.offset(dx, dy, dz))
                    .is_hive()
                {
                    return true;
                }
            }
        }
    }
    false
}
