//! Class abilities

use super::{Character, HealOutcome};
use crate::error::EngineError;
use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Defense reported by DefenseUp
const DEFENSE_UP_BONUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    TwistingSlash,
    Impale,
    Fireball,
    IceStorm,
    TripleShot,
    Heal,
    DefenseUp,
}

/// What an ability does with its magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    Damage,
    Heal,
    Buff,
}

impl Ability {
    pub fn all() -> &'static [Ability] {
        &[
            Ability::TwistingSlash,
            Ability::Impale,
            Ability::Fireball,
            Ability::IceStorm,
            Ability::TripleShot,
            Ability::Heal,
            Ability::DefenseUp,
        ]
    }

    /// Abilities available to a class
    pub fn for_class(class: CharacterClass) -> impl Iterator<Item = Ability> {
        Ability::all().iter().copied().filter(move |a| a.class() == class)
    }

    pub fn class(&self) -> CharacterClass {
        match self {
            Ability::TwistingSlash | Ability::Impale => CharacterClass::Knight,
            Ability::Fireball | Ability::IceStorm => CharacterClass::Wizard,
            Ability::TripleShot | Ability::Heal | Ability::DefenseUp => CharacterClass::Scout,
        }
    }

    pub fn mana_cost(&self) -> u32 {
        match self {
            Ability::TwistingSlash | Ability::Impale | Ability::TripleShot => 0,
            Ability::Fireball => 30,
            Ability::IceStorm => 80,
            Ability::Heal => 40,
            Ability::DefenseUp => 25,
        }
    }

    pub fn effect(&self) -> AbilityEffect {
        match self {
            Ability::Heal => AbilityEffect::Heal,
            Ability::DefenseUp => AbilityEffect::Buff,
            _ => AbilityEffect::Damage,
        }
    }

    /// Magnitude for the given character, independent of mana
    pub fn magnitude(&self, character: &Character) -> u32 {
        let attrs = character.attributes();
        let level = character.level();
        // attribute * a + level * b, saturating at u32::MAX
        let scaled = |attribute: u32, a: u32, b: u32| {
            attribute
                .saturating_mul(a)
                .saturating_add(level.saturating_mul(b))
        };
        match self {
            Ability::TwistingSlash => scaled(attrs.strength, 3, 10),
            Ability::Impale => scaled(attrs.strength, 5, 0),
            Ability::Fireball => scaled(attrs.energy, 4, 15),
            Ability::IceStorm => scaled(attrs.energy, 8, 25),
            Ability::TripleShot => scaled(attrs.agility, 2, 8).saturating_mul(3),
            Ability::Heal => scaled(attrs.energy, 3, 10),
            Ability::DefenseUp => DEFENSE_UP_BONUS,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Ability::TwistingSlash => "Twisting Slash",
            Ability::Impale => "Impale",
            Ability::Fireball => "Fireball",
            Ability::IceStorm => "Ice Storm",
            Ability::TripleShot => "Triple Shot",
            Ability::Heal => "Heal",
            Ability::DefenseUp => "Defense Up",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Ability {
    type Err = EngineError;

    /// Accepts "Ice Storm", "ice_storm", "icestorm" and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ability::all()
            .iter()
            .copied()
            .find(|a| {
                let name: String = a
                    .display_name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                name == wanted
            })
            .ok_or_else(|| EngineError::UnknownAbility(s.to_string()))
    }
}

/// Result of [`Character::use_ability`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    Damage {
        ability: Ability,
        user: String,
        damage: u32,
        mana_spent: u32,
    },
    Healed {
        ability: Ability,
        heal: HealOutcome,
        mana_spent: u32,
    },
    Buff {
        ability: Ability,
        user: String,
        defense: u32,
        mana_spent: u32,
    },
    /// Nothing was mutated
    InsufficientMana {
        ability: Ability,
        user: String,
        required: u32,
        available: u32,
    },
}

impl AbilityOutcome {
    pub fn ability(&self) -> Ability {
        match self {
            AbilityOutcome::Damage { ability, .. }
            | AbilityOutcome::Healed { ability, .. }
            | AbilityOutcome::Buff { ability, .. }
            | AbilityOutcome::InsufficientMana { ability, .. } => *ability,
        }
    }

    /// Damage to deliver, zero for non-damaging outcomes
    pub fn damage(&self) -> u32 {
        match self {
            AbilityOutcome::Damage { damage, .. } => *damage,
            _ => 0,
        }
    }

    pub fn succeeded(&self) -> bool {
        !matches!(self, AbilityOutcome::InsufficientMana { .. })
    }
}

impl fmt::Display for AbilityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityOutcome::Damage { ability, user, damage, .. } => {
                write!(f, "{} used {}! Damage: {}", user, ability, damage)
            }
            AbilityOutcome::Healed { ability, heal, .. } => {
                write!(f, "{} used {}! {}", heal.name, ability, heal)
            }
            AbilityOutcome::Buff { ability, user, defense, .. } => {
                write!(f, "{} used {}! Defense +{}", user, ability, defense)
            }
            AbilityOutcome::InsufficientMana { ability, user, required, available } => write!(
                f,
                "{} does not have enough mana for {}! ({}/{})",
                user, ability, available, required
            ),
        }
    }
}

impl Character {
    /// Use a class ability
    ///
    /// Mana is checked before anything is mutated; a shortfall yields
    /// [`AbilityOutcome::InsufficientMana`].
    pub fn use_ability(&mut self, ability: Ability) -> Result<AbilityOutcome, EngineError> {
        if ability.class() != self.class() {
            return Err(EngineError::AbilityUnavailable {
                ability,
                class: self.class(),
            });
        }

        let cost = ability.mana_cost();
        if !self.spend_mana(cost) {
            tracing::warn!(character = %self.name(), %ability, mana = self.mana(), "not enough mana");
            return Ok(AbilityOutcome::InsufficientMana {
                ability,
                user: self.name().to_string(),
                required: cost,
                available: self.mana(),
            });
        }

        let magnitude = ability.magnitude(self);
        let outcome = match ability.effect() {
            AbilityEffect::Damage => AbilityOutcome::Damage {
                ability,
                user: self.name().to_string(),
                damage: magnitude,
                mana_spent: cost,
            },
            AbilityEffect::Heal => AbilityOutcome::Healed {
                ability,
                heal: self.heal(magnitude),
                mana_spent: cost,
            },
            AbilityEffect::Buff => AbilityOutcome::Buff {
                ability,
                user: self.name().to_string(),
                defense: magnitude,
                mana_spent: cost,
            },
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ClassProfile;
    use crate::config::ensure_constants_initialized;

    fn make(class: CharacterClass) -> Character {
        ensure_constants_initialized();
        Character::new("Tester", class)
    }

    #[test]
    fn test_parse_ability_names() {
        assert_eq!("Ice Storm".parse::<Ability>().unwrap(), Ability::IceStorm);
        assert_eq!("ice_storm".parse::<Ability>().unwrap(), Ability::IceStorm);
        assert_eq!("TWISTINGSLASH".parse::<Ability>().unwrap(), Ability::TwistingSlash);
        assert!(matches!(
            "Meteor".parse::<Ability>(),
            Err(EngineError::UnknownAbility(_))
        ));
    }

    #[test]
    fn test_each_class_has_abilities() {
        assert_eq!(Ability::for_class(CharacterClass::Knight).count(), 2);
        assert_eq!(Ability::for_class(CharacterClass::Wizard).count(), 2);
        assert_eq!(Ability::for_class(CharacterClass::Scout).count(), 3);
    }

    #[test]
    fn test_knight_twisting_slash() {
        let mut knight = make(CharacterClass::Knight);
        let outcome = knight.use_ability(Ability::TwistingSlash).unwrap();
        // 28*3 + 1*10
        assert_eq!(outcome.damage(), 94);
        assert_eq!(knight.mana(), 40);
        assert_eq!(outcome.to_string(), "Tester used Twisting Slash! Damage: 94");
    }

    #[test]
    fn test_magnitude_saturates() {
        let mut profile = ClassProfile::knight();
        profile.base.strength = 2_000_000_000;
        let mut knight = Character::with_profile("Titan", CharacterClass::Knight, profile);

        assert_eq!(Ability::Impale.magnitude(&knight), u32::MAX);
        let outcome = knight.use_ability(Ability::TwistingSlash).unwrap();
        assert_eq!(outcome.damage(), u32::MAX);
    }

    #[test]
    fn test_wizard_fireball_spends_mana() {
        let mut wizard = make(CharacterClass::Wizard);
        let outcome = wizard.use_ability(Ability::Fireball).unwrap();
        // 30*4 + 1*15
        assert_eq!(outcome.damage(), 135);
        assert_eq!(wizard.mana(), 190 - 30);
    }

    #[test]
    fn test_insufficient_mana_is_noop() {
        let mut wizard = make(CharacterClass::Wizard);
        wizard.use_ability(Ability::IceStorm).unwrap();
        wizard.use_ability(Ability::IceStorm).unwrap();
        assert_eq!(wizard.mana(), 30);

        let outcome = wizard.use_ability(Ability::IceStorm).unwrap();
        assert!(!outcome.succeeded());
        assert_eq!(outcome.damage(), 0);
        assert_eq!(wizard.mana(), 30);
    }

    #[test]
    fn test_scout_heal_restores_health() {
        let mut scout = make(CharacterClass::Scout);
        scout.take_damage(100);
        let outcome = scout.use_ability(Ability::Heal).unwrap();
        match outcome {
            AbilityOutcome::Healed { heal, mana_spent, .. } => {
                // 20*3 + 1*10
                assert_eq!(heal.healed, 70);
                assert_eq!(mana_spent, 40);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(scout.health(), 124 - 100 + 70);
    }

    #[test]
    fn test_defense_up_reports_bonus() {
        let mut scout = make(CharacterClass::Scout);
        let outcome = scout.use_ability(Ability::DefenseUp).unwrap();
        assert!(matches!(outcome, AbilityOutcome::Buff { defense: 10, .. }));
        assert_eq!(scout.mana(), 75);
    }

    #[test]
    fn test_wrong_class_is_rejected() {
        let mut knight = make(CharacterClass::Knight);
        let err = knight.use_ability(Ability::Fireball).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidState);
        assert_eq!(knight.mana(), 40);
    }
}
