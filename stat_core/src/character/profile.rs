//! StatProfile - per-class base attributes, growth and resource formulas

use serde::{Deserialize, Serialize};

/// Health granted per point of vitality, shared by every class
pub const HEALTH_PER_VITALITY: u32 = 2;

/// The four core attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub agility: u32,
    #[serde(default)]
    pub vitality: u32,
    #[serde(default)]
    pub energy: u32,
}

impl Attributes {
    pub const fn new(strength: u32, agility: u32, vitality: u32, energy: u32) -> Self {
        Attributes { strength, agility, vitality, energy }
    }

    /// Attribute-wise saturating sum
    pub fn plus(&self, other: &Attributes) -> Attributes {
        Attributes {
            strength: self.strength.saturating_add(other.strength),
            agility: self.agility.saturating_add(other.agility),
            vitality: self.vitality.saturating_add(other.vitality),
            energy: self.energy.saturating_add(other.energy),
        }
    }
}

/// Base stats, growth table and resource formula of a class
///
/// - `max_health = vitality * 2 + level * health_per_level + health_base`
/// - `max_mana = energy * mana_per_energy + mana_base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassProfile {
    pub base: Attributes,
    pub growth: Attributes,
    pub health_per_level: u32,
    pub health_base: u32,
    pub mana_per_energy: u32,
    pub mana_base: u32,
}

impl ClassProfile {
    pub fn knight() -> Self {
        ClassProfile {
            base: Attributes::new(28, 20, 25, 10),
            growth: Attributes::new(7, 5, 7, 1),
            health_per_level: 5,
            health_base: 100,
            mana_per_energy: 2,
            mana_base: 20,
        }
    }

    pub fn wizard() -> Self {
        ClassProfile {
            base: Attributes::new(18, 18, 15, 30),
            growth: Attributes::new(2, 3, 3, 10),
            health_per_level: 3,
            health_base: 60,
            mana_per_energy: 3,
            mana_base: 100,
        }
    }

    pub fn scout() -> Self {
        ClassProfile {
            base: Attributes::new(22, 28, 20, 20),
            growth: Attributes::new(2, 7, 4, 5),
            health_per_level: 4,
            health_base: 80,
            mana_per_energy: 2,
            mana_base: 60,
        }
    }

    pub fn max_health(&self, attributes: &Attributes, level: u32) -> u32 {
        attributes
            .vitality
            .saturating_mul(HEALTH_PER_VITALITY)
            .saturating_add(level.saturating_mul(self.health_per_level))
            .saturating_add(self.health_base)
    }

    pub fn max_mana(&self, attributes: &Attributes) -> u32 {
        attributes
            .energy
            .saturating_mul(self.mana_per_energy)
            .saturating_add(self.mana_base)
    }
}
