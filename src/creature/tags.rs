//! Persistent lifecycle tags carried by each creature
//!
//! The tag store itself belongs to the world (tags live and die with the
//! creature); this module owns the keys and the typed encodings. `home` is
//! stored as a `"x,y,z"` string, so a corrupted value surfaces as a parse
//! error rather than silently shifting the creature's home.

use crate::core::error::{HivewardError, Result};
use crate::core::types::{BlockPos, CreatureId, Tick};
use crate::world::{TagValue, WorldAccess};

/// Tick at which the creature was spawned (or first observed)
pub const SPAWN_TICK: &str = "spawn_tick";

/// Home block recorded at spawn time, encoded `"x,y,z"`
pub const HOME: &str = "home";

/// Tick at which the creature was first observed lost
pub const LOST_SINCE: &str = "lost_since";

pub fn spawn_tick<W: WorldAccess + ?Sized>(world: &W, id: CreatureId) -> Option<Tick> {
    read_tick(world, id, SPAWN_TICK)
}

pub fn set_spawn_tick<W: WorldAccess + ?Sized>(world: &mut W, id: CreatureId, tick: Tick) {
    world.set_tag(id, SPAWN_TICK, TagValue::Long(tick as i64));
}

pub fn lost_since<W: WorldAccess + ?Sized>(world: &W, id: CreatureId) -> Option<Tick> {
    read_tick(world, id, LOST_SINCE)
}

pub fn set_lost_since<W: WorldAccess + ?Sized>(world: &mut W, id: CreatureId, tick: Tick) {
    world.set_tag(id, LOST_SINCE, TagValue::Long(tick as i64));
}

pub fn clear_lost_since<W: WorldAccess + ?Sized>(world: &mut W, id: CreatureId) {
    world.clear_tag(id, LOST_SINCE);
}

/// The creature's recorded home, if any.
///
/// `Ok(None)` means the tag is absent (lost-tracking disabled for this
/// creature); `Err` means the stored value failed to parse.
pub fn home<W: WorldAccess + ?Sized>(world: &W, id: CreatureId) -> Result<Option<BlockPos>> {
    let Some(value) = world.tag(id, HOME) else {
        return Ok(None);
    };
    let Some(text) = value.as_text() else {
        return Err(HivewardError::MalformedHome(format!("{:?}", value)));
    };
    parse_home(text).map(Some)
}

pub fn set_home<W: WorldAccess + ?Sized>(world: &mut W, id: CreatureId, pos: BlockPos) {
    world.set_tag(id, HOME, TagValue::Text(encode_home(pos)));
}

fn encode_home(pos: BlockPos) -> String {
    format!("{},{},{}", pos.x, pos.y, pos.z)
}

fn parse_home(text: &str) -> Result<BlockPos> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(HivewardError::MalformedHome(text.to_string()));
    }
    let coord = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|_| HivewardError::MalformedHome(text.to_string()))
    };
    Ok(BlockPos::new(coord(parts[0])?, coord(parts[1])?, coord(parts[2])?))
}

fn read_tick<W: WorldAccess + ?Sized>(world: &W, id: CreatureId, key: &str) -> Option<Tick> {
    world
        .tag(id, key)
        .and_then(|value| value.as_long())
        .map(|raw| raw.max(0) as Tick)
}
