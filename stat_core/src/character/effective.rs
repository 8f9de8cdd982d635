//! EffectiveStats - a character's stats with equipment applied

use super::{attack_power, Attributes, Character};
use gear_core::{Loadout, RingEffect};
use serde::Serialize;

/// Read-only view combining base stats and equipment bonuses
///
/// Built fresh from a [`Loadout`]; the character's own attributes are never
/// touched by equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveStats {
    pub attributes: Attributes,
    pub max_health: u32,
    pub max_mana: u32,
    /// Basic attack damage from the effective strength, before weapon bonuses
    pub attack_power: u32,
    pub attack_min: u32,
    pub attack_max: u32,
    pub attack_speed: Option<f32>,
    pub defense: u32,
    pub hp_regeneration: u32,
    pub mp_regeneration: u32,
    pub fire_resistance: u32,
    pub ice_resistance: u32,
}

impl Character {
    pub fn effective_stats(&self, loadout: &Loadout) -> EffectiveStats {
        let bonus = Attributes {
            strength: loadout.ring_total(RingEffect::StrengthBonus),
            agility: loadout.ring_total(RingEffect::AgilityBonus),
            vitality: 0,
            energy: loadout.ring_total(RingEffect::EnergyBonus),
        };

        let attributes = self.attributes().plus(&bonus);
        EffectiveStats {
            attack_power: attack_power(attributes.strength, self.level()),
            attributes,
            max_health: self.max_health().saturating_add(loadout.hp_bonus),
            max_mana: self.max_mana(),
            attack_min: loadout.attack_min,
            attack_max: loadout.attack_max,
            attack_speed: loadout.attack_speed,
            defense: loadout.defense,
            hp_regeneration: loadout.ring_total(RingEffect::HpRegeneration),
            mp_regeneration: loadout.ring_total(RingEffect::MpRegeneration),
            fire_resistance: loadout.ring_total(RingEffect::FireResistance),
            ice_resistance: loadout.ring_total(RingEffect::IceResistance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ensure_constants_initialized;
    use crate::types::CharacterClass;
    use gear_core::{ArmorKind, BaseStats, Equipment, Rarity, WeaponKind};

    #[test]
    fn test_no_equipment_matches_base() {
        ensure_constants_initialized();
        let knight = Character::new("Bare", CharacterClass::Knight);
        let stats = knight.effective_stats(&Loadout::new());

        assert_eq!(stats.attributes, *knight.attributes());
        assert_eq!(stats.attack_power, knight.attack_power());
        assert_eq!(stats.max_health, 155);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.attack_speed, None);
    }

    #[test]
    fn test_equipment_bonuses_apply() {
        ensure_constants_initialized();
        let knight = Character::new("Geared", CharacterClass::Knight);
        let items = vec![
            Equipment::new(
                "Broad Sword",
                BaseStats::Weapon { kind: WeaponKind::Sword, attack_min: 10, attack_max: 15 },
                1,
                Rarity::Normal,
            ),
            Equipment::new(
                "Plate Armor",
                BaseStats::Armor { kind: ArmorKind::Plate, defense: 20, hp_bonus: 50 },
                1,
                Rarity::Normal,
            ),
            Equipment::new(
                "Ring of Strength",
                BaseStats::Ring { effect: RingEffect::StrengthBonus, magnitude: 10 },
                1,
                Rarity::Normal,
            ),
        ];
        let stats = knight.effective_stats(&Loadout::from_items(&items));

        assert_eq!((stats.attack_min, stats.attack_max), (11, 16));
        assert_eq!(stats.attack_speed, Some(1.2));
        assert_eq!(stats.defense, 22);
        assert_eq!(stats.max_health, 155 + 55);
        assert_eq!(stats.attributes.strength, 28 + 11);
        // (28 + 11) * 2 + 1 * 5
        assert_eq!(stats.attack_power, 83);
        // Base attributes untouched
        assert_eq!(knight.strength(), 28);
        assert_eq!(knight.attack_power(), 61);
    }
}
