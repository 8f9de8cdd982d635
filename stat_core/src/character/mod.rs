//! Character - a progressing combatant
//!
//! A character is created from its class profile with full resources, then
//! mutated by damage, healing, abilities and experience. Health and mana are
//! kept inside `[0, max]` after every mutation.

mod abilities;
mod effective;
mod profile;

pub use abilities::{Ability, AbilityEffect, AbilityOutcome};
pub use effective::EffectiveStats;
pub use profile::{Attributes, ClassProfile, HEALTH_PER_VITALITY};

use crate::config::constants;
use crate::types::{ratio, CharacterClass};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    class: CharacterClass,
    profile: ClassProfile,
    level: u32,
    experience: u64,
    health: u32,
    max_health: u32,
    mana: u32,
    max_mana: u32,
    attributes: Attributes,
}

impl Character {
    /// Create a level 1 character using the configured profile of its class
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let profile = *constants().classes.get(class);
        Self::with_profile(name, class, profile)
    }

    /// Create a level 1 character from an explicit profile
    pub fn with_profile(name: impl Into<String>, class: CharacterClass, profile: ClassProfile) -> Self {
        let mut character = Character {
            name: name.into(),
            class,
            profile,
            level: 1,
            experience: 0,
            health: 0,
            max_health: 0,
            mana: 0,
            max_mana: 0,
            attributes: profile.base,
        };
        character.recompute_resources();
        character.restore();
        character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn profile(&self) -> &ClassProfile {
        &self.profile
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn strength(&self) -> u32 {
        self.attributes.strength
    }

    pub fn agility(&self) -> u32 {
        self.attributes.agility
    }

    pub fn vitality(&self) -> u32 {
        self.attributes.vitality
    }

    pub fn energy(&self) -> u32 {
        self.attributes.energy
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_ratio(&self) -> String {
        ratio(self.health, self.max_health)
    }

    pub fn mana_ratio(&self) -> String {
        ratio(self.mana, self.max_mana)
    }

    /// Experience required to leave the current level: floor(level^2 * base)
    pub fn experience_to_next_level(&self) -> u64 {
        let level = u64::from(self.level);
        level
            .saturating_mul(level)
            .saturating_mul(constants().progression.experience_base)
    }

    /// Flat damage of a basic attack: strength * 2 + level * 5
    pub fn attack_power(&self) -> u32 {
        attack_power(self.attributes.strength, self.level)
    }

    /// Add experience, levelling up at most once
    ///
    /// Crossing the threshold levels up exactly once and resets experience to
    /// 0; whatever the gain carried beyond the threshold is dropped, even if
    /// it would have covered further levels.
    pub fn gain_experience(&mut self, amount: u64) -> ExperienceOutcome {
        self.experience = self.experience.saturating_add(amount);
        let threshold = self.experience_to_next_level();

        if self.experience >= threshold {
            self.level_up();
            return ExperienceOutcome::LevelUp {
                name: self.name.clone(),
                gained: amount,
                level: self.level,
            };
        }

        ExperienceOutcome::Progress {
            name: self.name.clone(),
            gained: amount,
            experience: self.experience,
            threshold,
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.experience = 0;
        self.attributes = self.attributes.plus(&self.profile.growth);
        self.recompute_resources();
        self.restore();
        tracing::debug!(
            character = %self.name,
            level = self.level,
            max_health = self.max_health,
            max_mana = self.max_mana,
            "level up"
        );
    }

    fn recompute_resources(&mut self) {
        self.max_health = self.profile.max_health(&self.attributes, self.level);
        self.max_mana = self.profile.max_mana(&self.attributes);
        self.health = self.health.min(self.max_health);
        self.mana = self.mana.min(self.max_mana);
    }

    fn restore(&mut self) {
        self.health = self.max_health;
        self.mana = self.max_mana;
    }

    /// Apply already-mitigated damage
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.health = self.health.saturating_sub(amount);

        if self.health == 0 {
            return DamageOutcome::Defeated {
                name: self.name.clone(),
            };
        }

        DamageOutcome::Damaged {
            name: self.name.clone(),
            amount,
            health: self.health,
            max_health: self.max_health,
        }
    }

    /// Restore health, never above the maximum
    pub fn heal(&mut self, amount: u32) -> HealOutcome {
        let previous = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        HealOutcome {
            name: self.name.clone(),
            healed: self.health - previous,
            health: self.health,
            max_health: self.max_health,
        }
    }

    /// Deduct mana if there is enough of it
    pub(crate) fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            name: self.name.clone(),
            class: self.class,
            level: self.level,
            experience: self.experience,
            hp: self.health_ratio(),
            mp: self.mana_ratio(),
            attributes: self.attributes,
        }
    }
}

/// Result of [`Character::gain_experience`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceOutcome {
    LevelUp {
        name: String,
        gained: u64,
        level: u32,
    },
    Progress {
        name: String,
        gained: u64,
        experience: u64,
        threshold: u64,
    },
}

impl ExperienceOutcome {
    pub fn is_level_up(&self) -> bool {
        matches!(self, ExperienceOutcome::LevelUp { .. })
    }
}

impl fmt::Display for ExperienceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceOutcome::LevelUp { name, level, .. } => {
                write!(f, "{} reached Level {}!", name, level)
            }
            ExperienceOutcome::Progress { name, gained, experience, threshold } => {
                write!(f, "{} gained {} EXP. ({}/{})", name, gained, experience, threshold)
            }
        }
    }
}

/// Result of [`Character::take_damage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageOutcome {
    Damaged {
        name: String,
        amount: u32,
        health: u32,
        max_health: u32,
    },
    Defeated {
        name: String,
    },
}

impl DamageOutcome {
    pub fn is_defeated(&self) -> bool {
        matches!(self, DamageOutcome::Defeated { .. })
    }
}

impl fmt::Display for DamageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageOutcome::Damaged { name, amount, health, max_health } => {
                write!(f, "{} took {} damage. HP: {}/{}", name, amount, health, max_health)
            }
            DamageOutcome::Defeated { name } => write!(f, "{} has been defeated!", name),
        }
    }
}

/// Result of [`Character::heal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealOutcome {
    pub name: String,
    /// Health actually restored
    pub healed: u32,
    pub health: u32,
    pub max_health: u32,
}

impl fmt::Display for HealOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} recovered {} HP. HP: {}/{}",
            self.name, self.healed, self.health, self.max_health
        )
    }
}

/// Plain projection of a character for callers
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub hp: String,
    pub mp: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Basic attack damage for a strength and level
pub(crate) fn attack_power(strength: u32, level: u32) -> u32 {
    let combat = &constants().combat;
    strength
        .saturating_mul(combat.strength_factor)
        .saturating_add(level.saturating_mul(combat.level_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ensure_constants_initialized;
    use proptest::prelude::*;

    fn knight() -> Character {
        ensure_constants_initialized();
        Character::new("Johan", CharacterClass::Knight)
    }

    #[test]
    fn test_knight_initial_stats() {
        let c = knight();
        assert_eq!(c.level(), 1);
        assert_eq!(c.experience(), 0);
        assert_eq!(*c.attributes(), Attributes::new(28, 20, 25, 10));
        assert_eq!(c.max_health(), 155);
        assert_eq!(c.max_mana(), 40);
        assert_eq!(c.health(), 155);
        assert_eq!(c.mana(), 40);
        assert_eq!(c.attack_power(), 61);
    }

    #[test]
    fn test_experience_progress() {
        let mut c = knight();
        let outcome = c.gain_experience(20);
        assert!(!outcome.is_level_up());
        assert_eq!(outcome.to_string(), "Johan gained 20 EXP. (20/1000)");
        assert_eq!(c.experience(), 20);
    }

    #[test]
    fn test_level_up_at_threshold() {
        let mut c = knight();
        c.take_damage(100);
        let outcome = c.gain_experience(1000);

        assert_eq!(outcome.to_string(), "Johan reached Level 2!");
        assert_eq!(c.level(), 2);
        assert_eq!(c.experience(), 0);
        assert_eq!(*c.attributes(), Attributes::new(35, 25, 32, 11));
        // 32*2 + 2*5 + 100
        assert_eq!(c.max_health(), 174);
        // 11*2 + 20
        assert_eq!(c.max_mana(), 42);
        assert_eq!(c.health(), c.max_health());
        assert_eq!(c.mana(), c.max_mana());
        assert_eq!(c.experience_to_next_level(), 4000);
    }

    #[test]
    fn test_huge_gain_levels_up_once() {
        let mut c = knight();
        // Enough for level 2 (1000) and level 3 (4000) combined
        let outcome = c.gain_experience(50_000);
        assert!(outcome.is_level_up());
        assert_eq!(c.level(), 2);
        // Residual above the threshold is dropped
        assert_eq!(c.experience(), 0);
    }

    #[test]
    fn test_take_damage_and_defeat() {
        let mut c = knight();
        let outcome = c.take_damage(55);
        assert_eq!(outcome.to_string(), "Johan took 55 damage. HP: 100/155");
        assert!(c.is_alive());

        let outcome = c.take_damage(1000);
        assert!(outcome.is_defeated());
        assert_eq!(c.health(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal_reports_applied_delta() {
        let mut c = knight();
        c.take_damage(30);
        let outcome = c.heal(100);
        assert_eq!(outcome.healed, 30);
        assert_eq!(c.health(), c.max_health());

        let outcome = c.heal(5);
        assert_eq!(outcome.healed, 0);
    }

    #[test]
    fn test_snapshot_fields() {
        let c = knight();
        let json = serde_json::to_value(c.snapshot()).unwrap();
        assert_eq!(json["name"], "Johan");
        assert_eq!(json["class"], "knight");
        assert_eq!(json["hp"], "155/155");
        assert_eq!(json["mp"], "40/40");
        assert_eq!(json["strength"], 28);
        assert_eq!(json["energy"], 10);
    }

    proptest! {
        #[test]
        fn prop_damage_floors_at_zero(first in 0u32..400, second in 0u32..400) {
            let mut c = knight();
            let before = c.health();
            c.take_damage(first);
            prop_assert_eq!(c.health(), before.saturating_sub(first));
            let mid = c.health();
            c.take_damage(second);
            prop_assert_eq!(c.health(), mid.saturating_sub(second));
        }

        #[test]
        fn prop_heal_never_exceeds_max(damage in 0u32..400, heal in 0u32..u32::MAX) {
            let mut c = knight();
            c.take_damage(damage);
            c.heal(heal);
            prop_assert!(c.health() <= c.max_health());
        }

        #[test]
        fn prop_at_most_one_level_up(gains in proptest::collection::vec(0u64..100_000, 1..20)) {
            let mut c = knight();
            for gain in gains {
                let before = c.level();
                c.gain_experience(gain);
                prop_assert!(c.level() - before <= 1);
                prop_assert!(c.experience() < c.experience_to_next_level());
            }
        }
    }
}
