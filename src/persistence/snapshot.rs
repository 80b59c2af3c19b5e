//! Grid + inventory snapshots

use serde::de::DeserializeOwned;

use super::{KeyValueStore, PersistError};
use crate::consts::{INVENTORY_KEY, WORLD_KEY};
use crate::sim::{Grid, Inventory, World};

/// Whatever saved state could be read back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub grid: Option<Grid>,
    pub inventory: Option<Inventory>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.inventory.is_none()
    }
}

/// Write the grid and inventory blobs
pub fn save(world: &World, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
    let grid = serde_json::to_string(&world.grid)?;
    let inventory = serde_json::to_string(&world.inventory)?;
    store.set(WORLD_KEY, &grid)?;
    store.set(INVENTORY_KEY, &inventory)?;
    log::info!(
        "World saved ({}x{}, {} blocks held)",
        world.grid.width(),
        world.grid.height(),
        world.inventory.total()
    );
    Ok(())
}

fn read<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed '{}' blob: {}", key, e);
            None
        }
    }
}

/// Read both blobs; each missing or malformed part is `None`
pub fn load(store: &impl KeyValueStore) -> Snapshot {
    Snapshot {
        grid: read(store, WORLD_KEY),
        inventory: read(store, INVENTORY_KEY),
    }
}

/// Load saved state into `world`, keeping in-memory state for any part that
/// could not be read. Returns whether anything was restored.
pub fn load_into(world: &mut World, store: &impl KeyValueStore) -> bool {
    let snapshot = load(store);
    if snapshot.is_empty() {
        log::info!("No saved world found");
        return false;
    }
    log::info!(
        "World loaded (grid: {}, inventory: {})",
        snapshot.grid.is_some(),
        snapshot.inventory.is_some()
    );
    world.restore(snapshot.grid, snapshot.inventory);
    true
}
