use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a created item, e.g. `weapon-3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    fn generate(category: ItemCategory) -> Self {
        let n = NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed);
        ItemId(format!("{}-{}", category.to_string().to_lowercase(), n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final, scaled bonus of an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatBonus {
    Weapon {
        weapon_type: WeaponKind,
        attack_min: u32,
        attack_max: u32,
        attack_speed: f32,
    },
    Armor {
        armor_type: ArmorKind,
        defense: u32,
        hp_bonus: u32,
    },
    Ring {
        effect: RingEffect,
        effect_value: u32,
    },
}

impl fmt::Display for StatBonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatBonus::Weapon { attack_min, attack_max, .. } => {
                write!(f, "ATK: +{}-{}", attack_min, attack_max)
            }
            StatBonus::Armor { defense, hp_bonus, .. } => {
                write!(f, "DEF: +{} HP: +{}", defense, hp_bonus)
            }
            StatBonus::Ring { effect, effect_value } => {
                write!(f, "Effect: {} +{}", effect, effect_value)
            }
        }
    }
}

/// A weapon, armour piece or ring
///
/// Ownership is tracked by character name: an item is worn by at most one
/// character at a time, and only that character can take it off.
#[derive(Debug, Clone)]
pub struct Equipment {
    id: ItemId,
    name: String,
    level: u32,
    rarity: Rarity,
    base: BaseStats,
    equipped_by: Option<String>,
}

impl Equipment {
    /// Create an unequipped item with a freshly generated id
    ///
    /// Levels below 1 are raised to 1.
    pub fn new(name: impl Into<String>, base: BaseStats, level: u32, rarity: Rarity) -> Self {
        Equipment {
            id: ItemId::generate(base.category()),
            name: name.into(),
            level: level.max(1),
            rarity,
            base,
            equipped_by: None,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn category(&self) -> ItemCategory {
        self.base.category()
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped_by.is_some()
    }

    /// Name of the character currently wearing this item
    pub fn equipped_by(&self) -> Option<&str> {
        self.equipped_by.as_deref()
    }

    fn scaled(&self, base: u32) -> u32 {
        scale_bonus(base, self.rarity, self.level)
    }

    /// Category-specific bonus after rarity and level scaling (pure)
    pub fn stat_bonus(&self) -> StatBonus {
        match self.base {
            BaseStats::Weapon { kind, attack_min, attack_max } => StatBonus::Weapon {
                weapon_type: kind,
                attack_min: self.scaled(attack_min),
                attack_max: self.scaled(attack_max),
                attack_speed: kind.attack_speed(),
            },
            BaseStats::Armor { kind, defense, hp_bonus } => StatBonus::Armor {
                armor_type: kind,
                defense: self.scaled(defense),
                hp_bonus: self.scaled(hp_bonus),
            },
            BaseStats::Ring { effect, magnitude } => StatBonus::Ring {
                effect,
                effect_value: self.scaled(magnitude),
            },
        }
    }

    /// Put the item on `character`
    ///
    /// Fails without any change if anyone (including `character`) already wears it.
    pub fn equip(&mut self, character: &str) -> EquipOutcome {
        if let Some(owner) = &self.equipped_by {
            tracing::warn!(item = %self.id, owner = %owner, requested_by = character, "equip rejected");
            return EquipOutcome::AlreadyEquipped {
                item: self.name.clone(),
                owner: owner.clone(),
            };
        }

        self.equipped_by = Some(character.to_string());
        tracing::debug!(item = %self.id, character, "item equipped");
        EquipOutcome::Equipped {
            item: self.name.clone(),
            character: character.to_string(),
            bonus: self.stat_bonus(),
        }
    }

    /// Take the item off `character`
    ///
    /// Fails without any change unless `character` is the current owner.
    pub fn unequip(&mut self, character: &str) -> UnequipOutcome {
        if self.equipped_by.as_deref() != Some(character) {
            tracing::warn!(item = %self.id, requested_by = character, "unequip rejected");
            return UnequipOutcome::NotEquippedBy {
                item: self.name.clone(),
                character: character.to_string(),
            };
        }

        self.equipped_by = None;
        tracing::debug!(item = %self.id, character, "item unequipped");
        UnequipOutcome::Unequipped {
            item: self.name.clone(),
            character: character.to_string(),
        }
    }

    pub fn snapshot(&self) -> EquipmentSnapshot {
        EquipmentSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            item_type: self.category(),
            level: self.level,
            rarity: self.rarity,
            is_equipped: self.is_equipped(),
            equipped_by: self.equipped_by.clone(),
            bonus: self.stat_bonus(),
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        writeln!(f, "{} {} +{}", self.rarity, self.category(), self.level)?;
        write!(f, "{}", self.stat_bonus())?;
        if let Some(owner) = &self.equipped_by {
            write!(f, "\nEquipped by {}", owner)?;
        }
        Ok(())
    }
}

/// Result of [`Equipment::equip`]
#[derive(Debug, Clone, PartialEq)]
pub enum EquipOutcome {
    Equipped {
        item: String,
        character: String,
        bonus: StatBonus,
    },
    AlreadyEquipped {
        item: String,
        owner: String,
    },
}

impl EquipOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EquipOutcome::Equipped { .. })
    }
}

impl fmt::Display for EquipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipOutcome::Equipped { item, character, bonus } => {
                write!(f, "{} equipped {}! {}", character, item, bonus)
            }
            EquipOutcome::AlreadyEquipped { item, owner } => {
                write!(f, "{} is already equipped by {}!", item, owner)
            }
        }
    }
}

/// Result of [`Equipment::unequip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnequipOutcome {
    Unequipped { item: String, character: String },
    NotEquippedBy { item: String, character: String },
}

impl UnequipOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnequipOutcome::Unequipped { .. })
    }
}

impl fmt::Display for UnequipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnequipOutcome::Unequipped { item, character } => {
                write!(f, "{} unequipped {}.", character, item)
            }
            UnequipOutcome::NotEquippedBy { item, character } => {
                write!(f, "{} is not equipped by {}!", item, character)
            }
        }
    }
}

/// Plain projection of an item for callers
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentSnapshot {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemCategory,
    pub level: u32,
    pub rarity: Rarity,
    pub is_equipped: bool,
    pub equipped_by: Option<String>,
    #[serde(flatten)]
    pub bonus: StatBonus,
}
