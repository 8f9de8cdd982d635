//! Loadout - Sums the bonuses of every item a character wears

use crate::item::{Equipment, StatBonus};
use crate::types::RingEffect;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated equipment bonuses
///
/// Weapon ranges and armour values add up across items; the attack speed is
/// the fastest weapon's. Ring effects are summed per effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Loadout {
    pub attack_min: u32,
    pub attack_max: u32,
    pub attack_speed: Option<f32>,
    pub defense: u32,
    pub hp_bonus: u32,
    pub ring_effects: BTreeMap<RingEffect, u32>,
    pub item_count: usize,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a loadout from a set of items
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Equipment>) -> Self {
        let mut loadout = Loadout::new();
        for item in items {
            loadout.add(item);
        }
        loadout
    }

    /// Add one item's bonus
    pub fn add(&mut self, item: &Equipment) {
        match item.stat_bonus() {
            StatBonus::Weapon { attack_min, attack_max, attack_speed, .. } => {
                self.attack_min = self.attack_min.saturating_add(attack_min);
                self.attack_max = self.attack_max.saturating_add(attack_max);
                self.attack_speed = Some(match self.attack_speed {
                    Some(current) => current.max(attack_speed),
                    None => attack_speed,
                });
            }
            StatBonus::Armor { defense, hp_bonus, .. } => {
                self.defense = self.defense.saturating_add(defense);
                self.hp_bonus = self.hp_bonus.saturating_add(hp_bonus);
            }
            StatBonus::Ring { effect, effect_value } => {
                let total = self.ring_effects.entry(effect).or_insert(0);
                *total = total.saturating_add(effect_value);
            }
        }
        self.item_count += 1;
    }

    /// Total magnitude of a ring effect (0 if no ring grants it)
    pub fn ring_total(&self, effect: RingEffect) -> u32 {
        self.ring_effects.get(&effect).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArmorKind, BaseStats, Rarity, WeaponKind};

    fn item(base: BaseStats) -> Equipment {
        Equipment::new("test", base, 1, Rarity::Normal)
    }

    #[test]
    fn test_empty_loadout() {
        let loadout = Loadout::from_items(std::iter::empty());
        assert!(loadout.is_empty());
        assert_eq!(loadout.attack_speed, None);
        assert_eq!(loadout.ring_total(RingEffect::StrengthBonus), 0);
    }

    #[test]
    fn test_aggregates_all_categories() {
        let items = vec![
            item(BaseStats::Weapon { kind: WeaponKind::Axe, attack_min: 10, attack_max: 20 }),
            item(BaseStats::Weapon { kind: WeaponKind::Bow, attack_min: 0, attack_max: 0 }),
            item(BaseStats::Armor { kind: ArmorKind::Plate, defense: 20, hp_bonus: 50 }),
            item(BaseStats::Armor { kind: ArmorKind::Boots, defense: 10, hp_bonus: 0 }),
            item(BaseStats::Ring { effect: RingEffect::StrengthBonus, magnitude: 10 }),
            item(BaseStats::Ring { effect: RingEffect::StrengthBonus, magnitude: 20 }),
        ];

        let loadout = Loadout::from_items(&items);
        assert_eq!(loadout.item_count, 6);
        assert_eq!((loadout.attack_min, loadout.attack_max), (11, 22));
        assert_eq!(loadout.attack_speed, Some(1.5));
        assert_eq!(loadout.defense, 22 + 11);
        assert_eq!(loadout.hp_bonus, 55);
        assert_eq!(loadout.ring_total(RingEffect::StrengthBonus), 11 + 22);
    }
}
