use crate::item::Equipment;
use crate::types::*;
use crate::{ConfigError, GearError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// TOML configuration for a catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFileConfig {
    #[serde(default)]
    pub items: Vec<BaseItemConfig>,
}

/// A named base item the catalog can create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseItemConfig {
    /// Lookup key, e.g. "BroadSword"
    pub id: String,
    /// Display name of created items
    pub name: String,
    pub base: BaseStats,
}

impl BaseItemConfig {
    fn new(id: &str, name: &str, base: BaseStats) -> Self {
        BaseItemConfig {
            id: id.to_string(),
            name: name.to_string(),
            base,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "base item '{}' has an empty id",
                self.name
            )));
        }
        if let BaseStats::Weapon { attack_min, attack_max, .. } = self.base {
            if attack_min > attack_max {
                return Err(ConfigError::Validation(format!(
                    "base item '{}' has attack_min {} above attack_max {}",
                    self.id, attack_min, attack_max
                )));
            }
        }
        Ok(())
    }
}

/// Registry of base items keyed by id (case-insensitive)
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: BTreeMap<String, BaseItemConfig>,
}

fn catalog_key(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

impl Default for ItemCatalog {
    fn default() -> Self {
        let mut catalog = ItemCatalog::empty();
        for item in default_items() {
            catalog.register(item);
        }
        catalog
    }
}

impl ItemCatalog {
    /// Create a catalog with no base items
    pub fn empty() -> Self {
        ItemCatalog {
            items: BTreeMap::new(),
        }
    }

    /// Load a catalog file on top of the built-in base items
    ///
    /// Entries in the file replace built-ins with the same id.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        let config: CatalogFileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        let mut catalog = ItemCatalog::default();
        catalog.extend(config)?;
        Ok(catalog)
    }

    /// Parse catalog entries from a TOML string on top of the built-ins
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: CatalogFileConfig = toml::from_str(toml)
            .map_err(|e| ConfigError::Parse { error: e, path: None })?;
        let mut catalog = ItemCatalog::default();
        catalog.extend(config)?;
        Ok(catalog)
    }

    fn extend(&mut self, config: CatalogFileConfig) -> Result<(), ConfigError> {
        for item in config.items {
            item.validate()?;
            self.register(item);
        }
        Ok(())
    }

    /// Add or replace a base item
    pub fn register(&mut self, item: BaseItemConfig) {
        self.items.insert(catalog_key(&item.id), item);
    }

    pub fn get(&self, id: &str) -> Option<&BaseItemConfig> {
        self.items.get(&catalog_key(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(&catalog_key(id))
    }

    /// List all base item ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.values().map(|i| i.id.as_str())
    }

    /// Create a new item from a base id
    pub fn create(&self, id: &str, level: u32, rarity: Rarity) -> Result<Equipment, GearError> {
        let base = self
            .get(id)
            .ok_or_else(|| GearError::UnknownBaseItem(id.to_string()))?;
        Ok(Equipment::new(base.name.clone(), base.base, level, rarity))
    }
}

fn default_items() -> Vec<BaseItemConfig> {
    vec![
        BaseItemConfig::new(
            "BroadSword",
            "Broad Sword",
            BaseStats::Weapon { kind: WeaponKind::Sword, attack_min: 10, attack_max: 15 },
        ),
        BaseItemConfig::new(
            "ElvenBow",
            "Elven Bow",
            BaseStats::Weapon { kind: WeaponKind::Bow, attack_min: 8, attack_max: 12 },
        ),
        BaseItemConfig::new(
            "WizardStaff",
            "Wizard Staff",
            BaseStats::Weapon { kind: WeaponKind::Staff, attack_min: 5, attack_max: 20 },
        ),
        BaseItemConfig::new(
            "PlateArmor",
            "Plate Armor",
            BaseStats::Armor { kind: ArmorKind::Plate, defense: 20, hp_bonus: 50 },
        ),
        BaseItemConfig::new(
            "LeatherArmor",
            "Leather Armor",
            BaseStats::Armor { kind: ArmorKind::Leather, defense: 12, hp_bonus: 20 },
        ),
        BaseItemConfig::new(
            "WizardRobe",
            "Wizard Robe",
            BaseStats::Armor { kind: ArmorKind::Robe, defense: 8, hp_bonus: 10 },
        ),
        BaseItemConfig::new(
            "RingOfFire",
            "Ring of Fire",
            BaseStats::Ring { effect: RingEffect::FireResistance, magnitude: 15 },
        ),
        BaseItemConfig::new(
            "RingOfHpRegen",
            "Ring of HP Regen",
            BaseStats::Ring { effect: RingEffect::HpRegeneration, magnitude: 10 },
        ),
    ]
}
