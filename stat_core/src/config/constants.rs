//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;
use crate::character::ClassProfile;
use crate::monster::{default_species, species_key, SpeciesStats};
use crate::types::CharacterClass;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Must be called before the first character or monster is created.
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Falls back to the defaults when nothing was initialized.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Ensure constants are initialized with defaults (idempotent, useful for tests)
pub fn ensure_constants_initialized() {
    GAME_CONSTANTS.get_or_init(GameConstants::default);
}

/// Parse constants from a TOML string without touching the global instance
pub fn parse_constants(toml: &str) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = super::parse_toml(toml)?;
    constants.validate()?;
    Ok(constants)
}

/// Tunable game constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub classes: ClassTable,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default = "default_species")]
    pub species: Vec<SpeciesStats>,
}

impl Default for GameConstants {
    fn default() -> Self {
        GameConstants {
            classes: ClassTable::default(),
            combat: CombatConstants::default(),
            progression: ProgressionConstants::default(),
            species: default_species(),
        }
    }
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.experience_base == 0 {
            return Err(ConfigError::ValidationError(
                "progression.experience_base must be positive".to_string(),
            ));
        }
        for species in &self.species {
            if species.max_health == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "species '{}' has no health",
                    species.key
                )));
            }
            if species.attack_min > species.attack_max {
                return Err(ConfigError::ValidationError(format!(
                    "species '{}' has attack_min {} above attack_max {}",
                    species.key, species.attack_min, species.attack_max
                )));
            }
        }
        Ok(())
    }

    /// Look up a species by key, ignoring case and spaces
    pub fn find_species(&self, key: &str) -> Option<&SpeciesStats> {
        let wanted = species_key(key);
        self.species.iter().find(|s| species_key(&s.key) == wanted)
    }
}

/// Per-class stat profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTable {
    #[serde(default = "ClassProfile::knight")]
    pub knight: ClassProfile,
    #[serde(default = "ClassProfile::wizard")]
    pub wizard: ClassProfile,
    #[serde(default = "ClassProfile::scout")]
    pub scout: ClassProfile,
}

impl Default for ClassTable {
    fn default() -> Self {
        ClassTable {
            knight: ClassProfile::knight(),
            wizard: ClassProfile::wizard(),
            scout: ClassProfile::scout(),
        }
    }
}

impl ClassTable {
    pub fn get(&self, class: CharacterClass) -> &ClassProfile {
        match class {
            CharacterClass::Knight => &self.knight,
            CharacterClass::Wizard => &self.wizard,
            CharacterClass::Scout => &self.scout,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Damage per point of strength: damage = strength * factor + level * level_factor
    #[serde(default = "default_strength_factor")]
    pub strength_factor: u32,
    #[serde(default = "default_level_factor")]
    pub level_factor: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            strength_factor: 2,
            level_factor: 5,
        }
    }
}

fn default_strength_factor() -> u32 {
    2
}
fn default_level_factor() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience needed to leave a level: floor(level^2 * experience_base)
    #[serde(default = "default_experience_base")]
    pub experience_base: u64,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            experience_base: 1000,
        }
    }
}

fn default_experience_base() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.combat.strength_factor, 2);
        assert_eq!(constants.combat.level_factor, 5);
        assert_eq!(constants.progression.experience_base, 1000);
        assert_eq!(constants.classes.get(CharacterClass::Knight).base.strength, 28);
        assert!(constants.find_species("Goblin").is_some());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[combat]
strength_factor = 3

[classes.wizard]
health_per_level = 4
health_base = 70
mana_per_energy = 3
mana_base = 120

[classes.wizard.base]
strength = 18
agility = 18
vitality = 15
energy = 30

[classes.wizard.growth]
strength = 2
agility = 3
vitality = 3
energy = 10
"#;

        let constants = parse_constants(toml).unwrap();
        assert_eq!(constants.combat.strength_factor, 3);
        assert_eq!(constants.combat.level_factor, 5);
        assert_eq!(constants.classes.wizard.mana_base, 120);
        assert_eq!(constants.classes.knight.health_base, 100);
        assert!(constants.find_species("budge dragon").is_some());
    }

    #[test]
    fn test_parse_rejects_inverted_species_range() {
        let toml = r#"
[[species]]
key = "Slime"
name = "Slime"
level = 1
map = "Lorencia"
max_health = 10
attack_min = 5
attack_max = 2
defense = 0
experience_reward = 5
"#;
        assert!(matches!(parse_constants(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_rejects_zero_experience_base() {
        let toml = "[progression]\nexperience_base = 0\n";
        assert!(parse_constants(toml).is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[progression]\nexperience_base = 500\n").unwrap();

        let constants = GameConstants::load_from_path(file.path()).unwrap();
        assert_eq!(constants.progression.experience_base, 500);
        assert_eq!(constants.species.len(), default_species().len());
    }
}
