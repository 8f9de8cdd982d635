use crate::config::{SpawnConfig, ZoneFileConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use stat_core::config::constants;
use stat_core::monster::species_key;

/// How often a species appears in its zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRate {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl SpawnRate {
    /// Relative weight in a zone's spawn draw
    pub fn weight(self) -> u32 {
        match self {
            SpawnRate::Common => 6,
            SpawnRate::Uncommon => 3,
            SpawnRate::Rare => 1,
        }
    }
}

/// A monster species that can appear in a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnEntry {
    pub species: String,
    pub level: u32,
    pub rate: SpawnRate,
    #[serde(skip)]
    weight: u32,
}

impl SpawnEntry {
    pub fn new(species: impl Into<String>, level: u32, rate: SpawnRate) -> Self {
        SpawnEntry {
            species: species.into(),
            level,
            rate,
            weight: rate.weight(),
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    fn from_config(config: SpawnConfig) -> Result<Self, String> {
        let level = match config.level {
            Some(level) => level,
            None => constants()
                .find_species(&config.species)
                .map(|s| s.level)
                .ok_or_else(|| format!("unknown species '{}'", config.species))?,
        };
        Ok(SpawnEntry {
            weight: config.weight.unwrap_or_else(|| config.rate.weight()),
            species: config.species,
            level,
            rate: config.rate,
        })
    }
}

/// A map with a level gate and a spawn list
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub min_level: u32,
    pub max_level: u32,
    pub description: String,
    pub theme: String,
    pub spawns: Vec<SpawnEntry>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        min_level: u32,
        max_level: u32,
        description: impl Into<String>,
        theme: impl Into<String>,
        spawns: Vec<SpawnEntry>,
    ) -> Self {
        let name = name.into();
        Zone {
            id: format!("map-{}", species_key(&name)),
            name,
            min_level,
            max_level,
            description: description.into(),
            theme: theme.into(),
            spawns,
        }
    }

    /// Parse a zone from config
    pub fn from_config(config: ZoneFileConfig) -> Result<Self, String> {
        let zone = config.zone;
        if zone.name.trim().is_empty() {
            return Err("zone name is empty".to_string());
        }
        if zone.min_level > zone.max_level {
            return Err(format!(
                "min_level {} is above max_level {}",
                zone.min_level, zone.max_level
            ));
        }

        let spawns = config
            .spawns
            .into_iter()
            .map(SpawnEntry::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        spawns
            .iter()
            .try_fold(0u32, |total, spawn| total.checked_add(spawn.weight))
            .ok_or_else(|| format!("spawn weights of '{}' exceed {}", zone.name, u32::MAX))?;

        Ok(Zone::new(
            zone.name,
            zone.min_level,
            zone.max_level,
            zone.description,
            zone.theme,
            spawns,
        ))
    }

    /// Inclusive on both ends
    pub fn can_enter(&self, level: u32) -> bool {
        level >= self.min_level && level <= self.max_level
    }

    /// "min - max"
    pub fn level_range(&self) -> String {
        format!("{} - {}", self.min_level, self.max_level)
    }

    pub fn pick_spawn(&self) -> Option<&SpawnEntry> {
        self.pick_spawn_with_rng(&mut rand::thread_rng())
    }

    /// Weighted draw over the spawn list; `None` if nothing can spawn
    pub fn pick_spawn_with_rng(&self, rng: &mut impl Rng) -> Option<&SpawnEntry> {
        let total_weight: u64 = self.spawns.iter().map(|s| u64::from(s.weight)).sum();
        if total_weight == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total_weight);
        for spawn in &self.spawns {
            let weight = u64::from(spawn.weight);
            if roll < weight {
                return Some(spawn);
            }
            roll -= weight;
        }

        self.spawns.last()
    }
}
