use crate::GearError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item quality tier
///
/// Scales every base value before the level multiplier is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Normal,
    Magic,
    Ancient,
    Excellent,
}

impl Rarity {
    /// Get all rarity variants, weakest first
    pub fn all() -> &'static [Rarity] {
        &[Rarity::Normal, Rarity::Magic, Rarity::Ancient, Rarity::Excellent]
    }

    /// Multiplier in percent (100 = x1.00)
    pub fn multiplier_percent(self) -> u64 {
        match self {
            Rarity::Normal => 100,
            Rarity::Magic => 110,
            Rarity::Ancient => 125,
            Rarity::Excellent => 150,
        }
    }

    pub fn multiplier(self) -> f64 {
        self.multiplier_percent() as f64 / 100.0
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Normal => write!(f, "Normal"),
            Rarity::Magic => write!(f, "Magic"),
            Rarity::Ancient => write!(f, "Ancient"),
            Rarity::Excellent => write!(f, "Excellent"),
        }
    }
}

impl FromStr for Rarity {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::all()
            .iter()
            .copied()
            .find(|r| r.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GearError::UnknownRarity(s.to_string()))
    }
}

/// Apply rarity and level scaling to a base value
///
/// `floor(base × rarity × (1 + level × 0.1))`, computed in integers so that
/// values like 10 × 1.1 never land a hair under the whole number.
pub fn scale_bonus(base: u32, rarity: Rarity, level: u32) -> u32 {
    let scaled = u128::from(base)
        * u128::from(rarity.multiplier_percent())
        * (10 + u128::from(level))
        / 1000;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Broad item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Ring,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCategory::Weapon => write!(f, "Weapon"),
            ItemCategory::Armor => write!(f, "Armor"),
            ItemCategory::Ring => write!(f, "Ring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Sword,
    Staff,
    Bow,
    Axe,
    Scepter,
}

impl WeaponKind {
    /// Attacks per second; not affected by rarity or level
    pub fn attack_speed(self) -> f32 {
        match self {
            WeaponKind::Bow => 1.5,
            WeaponKind::Sword => 1.2,
            WeaponKind::Axe => 0.8,
            WeaponKind::Staff | WeaponKind::Scepter => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorKind {
    Plate,
    Leather,
    Robe,
    Helm,
    Boots,
    Gloves,
}

/// What a ring does for its wearer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingEffect {
    HpRegeneration,
    MpRegeneration,
    StrengthBonus,
    AgilityBonus,
    EnergyBonus,
    FireResistance,
    IceResistance,
}

impl fmt::Display for RingEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingEffect::HpRegeneration => write!(f, "HpRegeneration"),
            RingEffect::MpRegeneration => write!(f, "MpRegeneration"),
            RingEffect::StrengthBonus => write!(f, "StrengthBonus"),
            RingEffect::AgilityBonus => write!(f, "AgilityBonus"),
            RingEffect::EnergyBonus => write!(f, "EnergyBonus"),
            RingEffect::FireResistance => write!(f, "FireResistance"),
            RingEffect::IceResistance => write!(f, "IceResistance"),
        }
    }
}

/// Unscaled, category-specific values of an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum BaseStats {
    Weapon {
        kind: WeaponKind,
        attack_min: u32,
        attack_max: u32,
    },
    Armor {
        kind: ArmorKind,
        defense: u32,
        #[serde(default)]
        hp_bonus: u32,
    },
    Ring {
        effect: RingEffect,
        magnitude: u32,
    },
}

impl BaseStats {
    pub fn category(&self) -> ItemCategory {
        match self {
            BaseStats::Weapon { .. } => ItemCategory::Weapon,
            BaseStats::Armor { .. } => ItemCategory::Armor,
            BaseStats::Ring { .. } => ItemCategory::Ring,
        }
    }
}
