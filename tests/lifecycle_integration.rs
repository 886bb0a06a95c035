//! Integration tests for the bee lifecycle
//!
//! These tests drive the full controller against the in-memory world:
//! - spawn admission through the three throttle caps
//! - lifespan despawn at the exact boundary cycle
//! - the lost-bee timer, re-entry reset, and nearby-hive rescue
//! - config reload leaving in-flight state untouched

use hiveward::command::AdminCommand;
use hiveward::core::config::RegenConfig;
use hiveward::core::types::{BlockPos, Position, WorldId};
use hiveward::creature::tags;
use hiveward::simulation::{DespawnReason, LifecycleEvent, Simulation};
use hiveward::world::{BlockKind, MemoryWorld};

fn spawn_count(events: &[LifecycleEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, LifecycleEvent::BeeSpawned { .. }))
        .count()
}

#[test]
fn test_spawn_throttling_scenario() {
    // Hive at origin, empty, two spawns per 1000-tick window, 100-tick cooldown
    let config = RegenConfig {
        max_bees_in_hive: 0,
        max_bees_per_interval: 2,
        cooldown_ticks: 100,
        spawn_interval_ticks: 1000,
        despawn_ticks: 0,
        lost_despawn_enabled: false,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));

    sim.current_tick = 0;
    assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 1);

    sim.current_tick = 150;
    assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 1);

    // Count cap reached; denied until the window resets
    sim.current_tick = 400;
    assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 0);

    sim.current_tick = 1000;
    assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 1);

    assert_eq!(world.creature_count(), 3);
}

#[test]
fn test_occupied_hive_never_spawns() {
    let config = RegenConfig {
        max_bees_in_hive: 0,
        cooldown_ticks: 0,
        max_bees_per_interval: 100,
        spawn_interval_ticks: 1_000_000,
        despawn_ticks: 0,
        lost_despawn_enabled: false,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    let hive = world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));
    world.set_hive_occupants(hive, 1);

    for tick in [0, 500, 5000, 50_000] {
        sim.current_tick = tick;
        assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 0);
    }
    assert_eq!(world.creature_count(), 0);
}

#[test]
fn test_spawned_bee_ages_out() {
    // One bee, 300-tick lifespan, checks every 100 ticks
    let config = RegenConfig {
        check_interval_ticks: 100,
        cooldown_ticks: 1_000_000,
        max_bees_per_interval: 1,
        spawn_interval_ticks: 1_000_000,
        max_bees_in_hive: 0,
        despawn_ticks: 300,
        lost_despawn_enabled: false,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));

    let mut all_events = Vec::new();
    for _ in 0..400 {
        all_events.extend(sim.heartbeat(&mut world));
    }

    // Spawned at the first boundary (tick 100), aged out at tick 400
    assert_eq!(spawn_count(&all_events), 1);
    assert_eq!(world.creature_count(), 0);

    let despawn = all_events
        .iter()
        .find_map(|e| match e {
            LifecycleEvent::BeeDespawned { tick, reason, .. } => Some((*tick, *reason)),
            _ => None,
        })
        .expect("bee should have despawned");
    assert_eq!(despawn.0, 400);
    assert_eq!(despawn.1, DespawnReason::Lifespan { age_ticks: 300 });
}

#[test]
fn test_lost_bee_times_out_away_from_home() {
    let config = RegenConfig {
        check_interval_ticks: 100,
        cooldown_ticks: 1_000_000,
        max_bees_per_interval: 1,
        spawn_interval_ticks: 1_000_000,
        max_bees_in_hive: 0,
        despawn_ticks: 0,
        lost_despawn_enabled: true,
        lost_despawn_ticks: 300,
        max_distance_from_home: 20,
        lost_despawn_check_nearby_hives: false,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));

    sim.current_tick = 0;
    let events = sim.run_check_cycle(&mut world);
    let LifecycleEvent::BeeSpawned { creature, .. } = events[0] else {
        panic!("expected a spawn");
    };

    // Wanders far from home
    world.move_creature(creature, Position::new(50.0, 65.0, 50.0));

    // Timer starts at the first away observation
    sim.current_tick = 100;
    sim.run_check_cycle(&mut world);
    assert_eq!(tags::lost_since(&world, creature), Some(100));

    // Still within grace at 300 (200 elapsed)
    sim.current_tick = 300;
    sim.run_check_cycle(&mut world);
    assert!(world.contains_creature(creature));

    // Grace elapsed at 400
    sim.current_tick = 400;
    let events = sim.run_check_cycle(&mut world);
    assert!(!world.contains_creature(creature));
    assert!(events.iter().any(|e| matches!(
        e,
        LifecycleEvent::BeeDespawned {
            reason: DespawnReason::Lost { .. },
            ..
        }
    )));
}

#[test]
fn test_lost_bee_recovers_by_coming_home() {
    let config = RegenConfig {
        cooldown_ticks: 1_000_000,
        max_bees_per_interval: 1,
        spawn_interval_ticks: 1_000_000,
        max_bees_in_hive: 0,
        despawn_ticks: 0,
        lost_despawn_enabled: true,
        lost_despawn_ticks: 300,
        max_distance_from_home: 20,
        lost_despawn_check_nearby_hives: false,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));

    sim.current_tick = 0;
    let events = sim.run_check_cycle(&mut world);
    let LifecycleEvent::BeeSpawned { creature, .. } = events[0] else {
        panic!("expected a spawn");
    };

    world.move_creature(creature, Position::new(50.0, 65.0, 50.0));
    sim.current_tick = 100;
    sim.run_check_cycle(&mut world);
    assert_eq!(tags::lost_since(&world, creature), Some(100));

    // Comes home before the grace period runs out: timer cleared
    world.move_creature(creature, Position::new(1.5, 65.0, 1.5));
    sim.current_tick = 200;
    sim.run_check_cycle(&mut world);
    assert_eq!(tags::lost_since(&world, creature), None);

    // Long after the abandoned timer would have expired, still alive
    sim.current_tick = 10_000;
    sim.run_check_cycle(&mut world);
    assert!(world.contains_creature(creature));
}

#[test]
fn test_lost_bee_rescued_by_nearby_hive() {
    let config = RegenConfig {
        cooldown_ticks: 1_000_000,
        max_bees_per_interval: 1,
        spawn_interval_ticks: 1_000_000,
        max_bees_in_hive: 0,
        despawn_ticks: 0,
        lost_despawn_enabled: true,
        lost_despawn_ticks: 300,
        max_distance_from_home: 20,
        lost_despawn_check_nearby_hives: true,
        lost_despawn_nearby_range: 5,
        ..Default::default()
    };
    let mut sim = Simulation::new(config);
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));

    sim.current_tick = 0;
    let events = sim.run_check_cycle(&mut world);
    let LifecycleEvent::BeeSpawned { creature, .. } = events[0] else {
        panic!("expected a spawn");
    };

    // Far from home, but parked next to another hive
    world.move_creature(creature, Position::new(100.5, 65.0, 100.5));
    world.set_block(WorldId(0), BlockPos::new(102, 65, 100), BlockKind::Beehive);

    // No matter how long it stays, the nearby hive suppresses the timer
    for tick in [100, 500, 5_000, 100_000] {
        sim.current_tick = tick;
        sim.run_check_cycle(&mut world);
        assert!(world.contains_creature(creature));
        assert_eq!(tags::lost_since(&world, creature), None);
    }
}

#[test]
fn test_reload_swaps_config_but_not_state() {
    let dir = std::env::temp_dir().join("hiveward-reload-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hiveward.toml");
    std::fs::write(&path, "cooldownTicks = 50\nmaxBeesPerInterval = 1\n").unwrap();

    let mut sim = Simulation::new(RegenConfig::load(&path).unwrap());
    assert_eq!(sim.config.cooldown_ticks, 50);

    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));
    sim.current_tick = 10;
    let events = sim.run_check_cycle(&mut world);
    assert_eq!(spawn_count(&events), 1);

    // Operator retunes the cooldown and reloads
    std::fs::write(&path, "cooldownTicks = 9999\nmaxBeesPerInterval = 5\n").unwrap();
    let reply = AdminCommand::parse("reload")
        .unwrap()
        .execute(&mut sim, &path);
    assert_eq!(reply, "Configuration reloaded.");
    assert_eq!(sim.config.cooldown_ticks, 9999);
    assert_eq!(sim.config.max_bees_per_interval, 5);

    // Tick counter and throttle bookkeeping survived the reload: the hive
    // is still cooling down from its tick-10 spawn under the new cooldown
    assert_eq!(sim.current_tick, 10);
    sim.current_tick = 100;
    assert_eq!(spawn_count(&sim.run_check_cycle(&mut world)), 0);
}
