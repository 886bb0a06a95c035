//! In-memory world - backs the CLI binary and the test suite

use ahash::AHashMap;

use crate::core::types::{BlockPos, CreatureId, HiveKey, Location, Position, WorldId};
use crate::world::{BlockKind, HiveSite, TagValue, WorldAccess};

/// Per-creature state held by the in-memory world
#[derive(Debug, Clone)]
struct CreatureState {
    world: WorldId,
    position: Position,
    persistent: bool,
    tags: AHashMap<String, TagValue>,
}

/// A self-contained world: hives, blocks, creatures and their tags.
///
/// Blocks default to air; placing a hive writes both the block and the hive
/// site registry, the way a real world exposes the structure and its block.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    creatures: AHashMap<CreatureId, CreatureState>,
    hives: AHashMap<HiveKey, u32>,
    blocks: AHashMap<(WorldId, BlockPos), BlockKind>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a beehive block and register it as a spawn site
    pub fn place_hive(&mut self, world: WorldId, pos: BlockPos) -> HiveKey {
        let key = HiveKey::new(world, pos);
        self.blocks.insert((world, pos), BlockKind::Beehive);
        self.hives.insert(key, 0);
        key
    }

    /// Break a hive: the block and the site both disappear.
    ///
    /// Any throttle state recorded for the key goes stale but is never read
    /// again, which is the accepted behavior.
    pub fn break_hive(&mut self, key: HiveKey) {
        self.blocks.remove(&(key.world, key.pos));
        self.hives.remove(&key);
    }

    /// Set the occupant count reported for a hive
    pub fn set_hive_occupants(&mut self, key: HiveKey, occupants: u32) {
        if let Some(count) = self.hives.get_mut(&key) {
            *count = occupants;
        }
    }

    /// Write an arbitrary block (for rescue-check setups)
    pub fn set_block(&mut self, world: WorldId, pos: BlockPos, kind: BlockKind) {
        self.blocks.insert((world, pos), kind);
    }

    /// Teleport a creature (simulates wandering)
    pub fn move_creature(&mut self, id: CreatureId, position: Position) {
        if let Some(state) = self.creatures.get_mut(&id) {
            state.position = position;
        }
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn contains_creature(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn is_persistent(&self, id: CreatureId) -> bool {
        self.creatures
            .get(&id)
            .map(|state| state.persistent)
            .unwrap_or(false)
    }
}

impl WorldAccess for MemoryWorld {
    fn hive_sites(&self) -> Vec<HiveSite> {
        self.hives
            .iter()
            .map(|(&key, &occupants)| HiveSite { key, occupants })
            .collect()
    }

    fn creatures(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    fn creature_location(&self, id: CreatureId) -> Option<Location> {
        self.creatures.get(&id).map(|state| Location {
            world: state.world,
            position: state.position,
        })
    }

    fn spawn_creature(&mut self, world: WorldId, position: Position) -> CreatureId {
        let id = CreatureId::new();
        self.creatures.insert(
            id,
            CreatureState {
                world,
                position,
                persistent: false,
                tags: AHashMap::new(),
            },
        );
        id
    }

    fn remove_creature(&mut self, id: CreatureId) {
        self.creatures.remove(&id);
    }

    fn set_persistent(&mut self, id: CreatureId, persistent: bool) {
        if let Some(state) = self.creatures.get_mut(&id) {
            state.persistent = persistent;
        }
    }

    fn block_at(&self, world: WorldId, pos: BlockPos) -> BlockKind {
        self.blocks
            .get(&(world, pos))
            .copied()
            .unwrap_or(BlockKind::Air)
    }

    fn tag(&self, id: CreatureId, key: &str) -> Option<TagValue> {
        self.creatures
            .get(&id)
            .and_then(|state| state.tags.get(key).cloned())
    }

    fn set_tag(&mut self, id: CreatureId, key: &str, value: TagValue) {
        if let Some(state) = self.creatures.get_mut(&id) {
            state.tags.insert(key.to_string(), value);
        }
    }

    fn clear_tag(&mut self, id: CreatureId, key: &str) {
        if let Some(state) = self.creatures.get_mut(&id) {
            state.tags.remove(key);
        }
    }
}
