//! Hiveward - Entry Point
//!
//! Interactive host for the lifecycle controller. It stands in for the game
//! server: an in-memory world with a few hives, a heartbeat driven from the
//! prompt, and the administrative reload command.

use hiveward::command::AdminCommand;
use hiveward::core::config::RegenConfig;
use hiveward::core::error::Result;
use hiveward::core::types::{BlockPos, WorldId};
use hiveward::simulation::{LifecycleEvent, Simulation};
use hiveward::world::{MemoryWorld, WorldAccess};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hiveward", about = "Bee population lifecycle controller")]
struct Args {
    /// Configuration file (camelCase keys; missing file means defaults)
    #[arg(long, default_value = "hiveward.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("hiveward=debug")
        .init();

    let args = Args::parse();

    tracing::info!("Hiveward starting...");
    let config = RegenConfig::load(&args.config)?;
    let mut sim = Simulation::new(config);

    // A small demonstration world: two hives in the overworld
    let mut world = MemoryWorld::new();
    world.place_hive(WorldId(0), BlockPos::new(0, 64, 0));
    world.place_hive(WorldId(0), BlockPos::new(32, 70, -16));
    tracing::info!("Placed {} demo hives", world.hive_sites().len());

    println!("\n=== HIVEWARD ===");
    println!("Tick-driven bee lifecycle: spawn throttling, lifespan, lost-bee despawn");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance the simulation by one tick");
    println!("  run <n>         - Run n ticks");
    println!("  status / s      - Show hives, creatures, and throttle state");
    println!("  reload          - Re-read the configuration file");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let events = sim.heartbeat(&mut world);
            display_events(&events);
            println!("Tick {} complete.", sim.current_tick);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u64>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    let events = sim.heartbeat(&mut world);
                    display_events(&events);
                }
                println!("Completed {} ticks. Now at tick {}.", n, sim.current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&sim, &world);
            continue;
        }

        match AdminCommand::parse(input) {
            Ok(command) => println!("{}", command.execute(&mut sim, &args.config)),
            Err(_) => {
                println!("Unknown command. Available: tick, run <n>, status, reload, quit")
            }
        }
    }

    println!(
        "\nGoodbye! Final state: {} bees, {} ticks elapsed.",
        world.creature_count(),
        sim.current_tick
    );
    Ok(())
}

fn display_events(events: &[LifecycleEvent]) {
    for event in events {
        match event {
            LifecycleEvent::BeeSpawned { hive, tick, .. } => {
                println!("  [tick {}] bee spawned from hive at {:?}", tick, hive.pos);
            }
            LifecycleEvent::BeeDespawned { tick, reason, .. } => {
                println!("  [tick {}] bee despawned: {}", tick, reason);
            }
        }
    }
}

fn display_status(sim: &Simulation, world: &MemoryWorld) {
    println!();
    println!(
        "--- Tick {} | Hives: {} | Bees: {} ---",
        sim.current_tick,
        world.hive_sites().len(),
        world.creature_count()
    );

    for site in world.hive_sites() {
        match sim.throttle.state(&site.key) {
            Some(state) => println!(
                "  {:?}: occupants {}, spawned this window {}, last spawn {:?}",
                site.key.pos, site.occupants, state.count_this_interval, state.last_spawn_tick
            ),
            None => println!("  {:?}: occupants {}, not yet observed", site.key.pos, site.occupants),
        }
    }
    println!();
}
