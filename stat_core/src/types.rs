//! Core types shared by characters, monsters and combat

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Playable character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    /// Tank: high strength and vitality, little mana
    Knight,
    /// Caster: high energy and mana, fragile
    Wizard,
    /// Support archer: high agility, balanced resources
    Scout,
}

impl CharacterClass {
    /// Get all classes
    pub fn all() -> &'static [CharacterClass] {
        &[CharacterClass::Knight, CharacterClass::Wizard, CharacterClass::Scout]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Knight => write!(f, "Knight"),
            CharacterClass::Wizard => write!(f, "Wizard"),
            CharacterClass::Scout => write!(f, "Scout"),
        }
    }
}

impl FromStr for CharacterClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterClass::all()
            .iter()
            .copied()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownClass(s.to_string()))
    }
}

/// Monster strength tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonsterTier {
    #[default]
    Normal,
    Elite,
    Boss,
}

impl fmt::Display for MonsterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonsterTier::Normal => write!(f, "Normal"),
            MonsterTier::Elite => write!(f, "Elite"),
            MonsterTier::Boss => write!(f, "Boss"),
        }
    }
}

/// Format a resource pool as "current/max"
pub fn ratio(current: u32, max: u32) -> String {
    format!("{}/{}", current, max)
}
