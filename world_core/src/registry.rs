use crate::config::ZoneFileConfig;
use crate::zone::{SpawnEntry, SpawnRate, Zone};
use crate::{ConfigError, WorldError};
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;

fn zone_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Registry of all zones, keyed by name (case-insensitive)
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: BTreeMap<String, Zone>,
}

impl ZoneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five built-in zones
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for zone in default_zones() {
            registry.insert(zone);
        }
        registry
    }

    /// Load all zones from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Load zones from a directory recursively, replacing zones of the same name
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single zone file
    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: ZoneFileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        let zone = Zone::from_config(config).map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;

        tracing::debug!(zone = %zone.name, path = %path.display(), "loaded zone");
        self.insert(zone);
        Ok(())
    }

    /// Add or replace a zone
    pub fn insert(&mut self, zone: Zone) {
        self.zones.insert(zone_key(&zone.name), zone);
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.get(&zone_key(name))
    }

    /// Look up a zone, failing with NotFound
    pub fn zone(&self, name: &str) -> Result<&Zone, WorldError> {
        self.get(name)
            .ok_or_else(|| WorldError::UnknownZone(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.zones.contains_key(&zone_key(name))
    }

    /// List all zones
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Check the level gate of a zone
    pub fn can_enter(&self, name: &str, level: u32) -> Result<bool, WorldError> {
        Ok(self.zone(name)?.can_enter(level))
    }

    /// Draw a random spawn from a zone
    pub fn random_spawn<R: Rng>(&self, name: &str, rng: &mut R) -> Result<&SpawnEntry, WorldError> {
        let zone = self.zone(name)?;
        zone.pick_spawn_with_rng(rng)
            .ok_or_else(|| WorldError::EmptyZone(zone.name.clone()))
    }
}

fn default_zones() -> Vec<Zone> {
    use SpawnRate::*;
    vec![
        Zone::new(
            "Lorencia",
            1,
            40,
            "The starting city. Rolling hills and ancient ruins surround this once-peaceful town.",
            "lorencia-plains",
            vec![
                SpawnEntry::new("BudgeDragon", 3, Common),
                SpawnEntry::new("Goblin", 5, Common),
                SpawnEntry::new("HellSpider", 8, Uncommon),
                SpawnEntry::new("Lich", 15, Rare),
            ],
        ),
        Zone::new(
            "Dungeon",
            40,
            80,
            "Deep underground caverns filled with undead creatures and dark magic.",
            "dungeon-caverns",
            vec![
                SpawnEntry::new("Skeleton", 42, Common),
                SpawnEntry::new("DarkKnight NPC", 50, Uncommon),
                SpawnEntry::new("Ghost", 55, Common),
                SpawnEntry::new("GreatDragon", 70, Rare),
            ],
        ),
        Zone::new(
            "Devias",
            80,
            130,
            "Frozen wastelands at the northern edge of the continent.",
            "devias-snow",
            vec![
                SpawnEntry::new("IceMonster", 82, Common),
                SpawnEntry::new("Yeti", 90, Common),
                SpawnEntry::new("IceQueen", 120, Rare),
            ],
        ),
        Zone::new(
            "Noria",
            50,
            100,
            "Ancient elven forests with powerful magical creatures.",
            "noria-forest",
            vec![
                SpawnEntry::new("ForestMonster", 55, Common),
                SpawnEntry::new("EliteYeti", 75, Uncommon),
                SpawnEntry::new("Cursedking", 95, Rare),
            ],
        ),
        Zone::new(
            "Atlans",
            130,
            999,
            "Ancient underwater ruins. Only the most powerful warriors dare enter.",
            "atlans-deep",
            vec![
                SpawnEntry::new("Bahamut", 140, Common),
                SpawnEntry::new("Vepar", 160, Uncommon),
                SpawnEntry::new("GoldenLizard", 200, Rare),
            ],
        ),
    ]
}
