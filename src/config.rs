use gridstash_core::{GridInventory, ItemId, Slot, DEFAULT_SLOT_COUNT};
use gridstash_ui::{GridLayout, DEFAULT_TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/inventory.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of slots in the grid; fixed once the inventory is built.
    pub slot_count: usize,
    pub layout: GridLayout,
    pub atlas: AtlasConfig,
    pub window: WindowConfig,
    /// Stacks deposited into the grid at startup, in order.
    pub seed: Vec<SeedStack>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub path: PathBuf,
    /// Edge length of one item tile in pixels.
    pub tile_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedStack {
    pub slot: usize,
    pub item: ItemId,
    pub amount: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            layout: GridLayout::default(),
            atlas: AtlasConfig::default(),
            window: WindowConfig::default(),
            seed: vec![
                SeedStack {
                    slot: 1,
                    item: 1,
                    amount: 10,
                },
                SeedStack {
                    slot: 4,
                    item: 2,
                    amount: 20,
                },
            ],
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/atlas.png"),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Inventory Example".to_string(),
        }
    }
}

impl InventoryConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<InventoryConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    InventoryConfig::default()
                }
            },
            Err(err) => {
                if missing_default(path, &err) {
                    info!(
                        "Inventory config not found at {}. Using defaults",
                        path.display()
                    );
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                InventoryConfig::default()
            }
        }
    }

    /// Build an empty grid of `slot_count` slots and deposit the seed stacks.
    ///
    /// Seeds are held and deposited one at a time, so a seed onto a slot of
    /// the same item merges. Seeds that would swap out a different item are
    /// skipped, as are seeds outside the grid.
    pub fn build_inventory(&self) -> GridInventory {
        let mut inventory = GridInventory::new(self.slot_count);
        for seed in &self.seed {
            let occupied_by_other = inventory
                .slot(seed.slot)
                .is_some_and(|slot| !slot.is_empty() && slot.item() != seed.item);
            if occupied_by_other {
                warn!(slot = seed.slot, item = seed.item, "Seed slot holds another item, skipping");
                continue;
            }

            inventory.set_held(Slot::new(seed.item, seed.amount));
            if let Err(err) = inventory.deposit_all(seed.slot) {
                warn!(%err, item = seed.item, "Skipping seed stack");
            }
            inventory.set_held(Slot::EMPTY);
        }
        inventory
    }
}

/// A missing file at the default location is routine; anything else is worth a warning.
fn missing_default(path: &Path, err: &std::io::Error) -> bool {
    path == Path::new(DEFAULT_CONFIG_PATH) && err.kind() == std::io::ErrorKind::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_seeds_two_stacks() {
        let inventory = InventoryConfig::default().build_inventory();

        assert_eq!(inventory.len(), 27);
        assert_eq!(inventory.slot(1), Some(&Slot::new(1, 10)));
        assert_eq!(inventory.slot(4), Some(&Slot::new(2, 20)));
        assert_eq!(*inventory.held(), Slot::EMPTY);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: InventoryConfig = toml::from_str(
            r#"
            slot_count = 9

            [layout]
            origin_x = 16

            [[seed]]
            slot = 0
            item = 3
            amount = 2

            [[seed]]
            slot = 40
            item = 4
            amount = 1
            "#,
        )
        .expect("config parses");

        assert_eq!(cfg.layout.origin_x, 16);
        assert_eq!(cfg.layout.cell_size, 64);
        assert_eq!(cfg.window.title, "Inventory Example");
        assert_eq!(cfg.atlas.tile_size, 8);

        // The out-of-range seed is skipped without disturbing the rest.
        let inventory = cfg.build_inventory();
        assert_eq!(inventory.len(), 9);
        assert_eq!(inventory.slot(0), Some(&Slot::new(3, 2)));
        assert_eq!(inventory.slots().iter().filter(|s| !s.is_empty()).count(), 1);
        assert_eq!(*inventory.held(), Slot::EMPTY);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("gridstash_config_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("broken.toml");
        fs::write(&path, "slot_count = \"many\"").expect("write config");

        let cfg = InventoryConfig::load_from_path(&path);
        assert_eq!(cfg.slot_count, DEFAULT_SLOT_COUNT);

        let missing = InventoryConfig::load_from_path(&dir.join("missing.toml"));
        assert_eq!(missing.seed.len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn only_a_missing_default_config_is_routine() {
        let not_found = std::io::Error::from(std::io::ErrorKind::NotFound);
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);

        assert!(missing_default(Path::new(DEFAULT_CONFIG_PATH), &not_found));
        assert!(!missing_default(Path::new(DEFAULT_CONFIG_PATH), &denied));
        assert!(!missing_default(Path::new("custom/inventory.toml"), &not_found));
    }
}
