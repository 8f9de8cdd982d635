use crate::zone::SpawnRate;
use serde::Deserialize;

/// TOML configuration for a zone file
#[derive(Debug, Deserialize)]
pub struct ZoneFileConfig {
    pub zone: ZoneConfig,
    #[serde(default)]
    pub spawns: Vec<SpawnConfig>,
}

/// Configuration for the zone itself
#[derive(Debug, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub min_level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme: String,
}

/// A monster species that can appear in the zone
#[derive(Debug, Deserialize)]
pub struct SpawnConfig {
    pub species: String,
    /// Level shown for the spawn; falls back to the species level
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub rate: SpawnRate,
    /// Explicit weight, overriding the rate's weight
    #[serde(default)]
    pub weight: Option<u32>,
}
