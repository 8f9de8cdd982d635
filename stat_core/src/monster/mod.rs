//! Monster - an ephemeral combatant built from a species table entry

mod species;

pub use species::{default_species, species_key, SpeciesStats};

use crate::config::constants;
use crate::error::EngineError;
use crate::types::{ratio, MonsterTier};
use rand::Rng;
use serde::Serialize;

/// A monster for a single encounter
///
/// Everything except health is fixed at construction.
#[derive(Debug, Clone)]
pub struct Monster {
    species: String,
    name: String,
    level: u32,
    map: String,
    tier: MonsterTier,
    health: u32,
    max_health: u32,
    attack_min: u32,
    attack_max: u32,
    defense: u32,
    experience_reward: u64,
}

/// A monster's attack against a named target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterAttack {
    pub damage: u32,
    pub message: String,
}

/// Result of [`Monster::take_damage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterDamage {
    /// Damage after defense, at least 1
    pub actual: u32,
    pub is_dead: bool,
    /// Experience awarded, only when the hit was lethal
    pub exp_reward: Option<u64>,
    pub message: String,
}

impl Monster {
    /// Spawn a monster of the given species from the configured table
    pub fn spawn(species: &str) -> Result<Self, EngineError> {
        constants()
            .find_species(species)
            .map(Monster::from_species)
            .ok_or_else(|| EngineError::UnknownSpecies(species.to_string()))
    }

    pub fn from_species(stats: &SpeciesStats) -> Self {
        Monster {
            species: stats.key.clone(),
            name: stats.name.clone(),
            level: stats.level,
            map: stats.map.clone(),
            tier: stats.tier,
            health: stats.max_health,
            max_health: stats.max_health,
            attack_min: stats.attack_min,
            attack_max: stats.attack_max.max(stats.attack_min),
            defense: stats.defense,
            experience_reward: stats.experience_reward,
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn tier(&self) -> MonsterTier {
        self.tier
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_range(&self) -> (u32, u32) {
        (self.attack_min, self.attack_max)
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn experience_reward(&self) -> u64 {
        self.experience_reward
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_ratio(&self) -> String {
        ratio(self.health, self.max_health)
    }

    /// Draw an attack magnitude uniformly from `[attack_min, attack_max]`
    pub fn attack_power_with_rng(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.attack_min..=self.attack_max)
    }

    pub fn attack(&self, target: &str) -> MonsterAttack {
        self.attack_with_rng(target, &mut rand::thread_rng())
    }

    /// Attack a target; the reported damage is the damage to apply
    pub fn attack_with_rng(&self, target: &str, rng: &mut impl Rng) -> MonsterAttack {
        let damage = self.attack_power_with_rng(rng);
        MonsterAttack {
            damage,
            message: format!("{} attacks {} for {} damage!", self.name, target, damage),
        }
    }

    /// Take a hit, mitigated by defense with a floor of 1
    pub fn take_damage(&mut self, amount: u32) -> MonsterDamage {
        let actual = amount.saturating_sub(self.defense).max(1);
        self.health = self.health.saturating_sub(actual);

        if self.health == 0 {
            return MonsterDamage {
                actual,
                is_dead: true,
                exp_reward: Some(self.experience_reward),
                message: format!("{} has been killed! +{} EXP", self.name, self.experience_reward),
            };
        }

        MonsterDamage {
            actual,
            is_dead: false,
            exp_reward: None,
            message: format!(
                "{} took {} damage. HP: {}",
                self.name,
                actual,
                self.health_ratio()
            ),
        }
    }

    pub fn snapshot(&self) -> MonsterSnapshot {
        MonsterSnapshot {
            name: self.name.clone(),
            level: self.level,
            tier: self.tier,
            map: self.map.clone(),
            hp: self.health_ratio(),
            attack: format!("{}-{}", self.attack_min, self.attack_max),
            defense: self.defense,
            exp_reward: self.experience_reward,
        }
    }
}

/// Plain projection of a monster for callers
#[derive(Debug, Clone, Serialize)]
pub struct MonsterSnapshot {
    pub name: String,
    pub level: u32,
    #[serde(rename = "type")]
    pub tier: MonsterTier,
    pub map: String,
    pub hp: String,
    pub attack: String,
    pub defense: u32,
    pub exp_reward: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ensure_constants_initialized;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn goblin() -> Monster {
        ensure_constants_initialized();
        Monster::spawn("Goblin").unwrap()
    }

    #[test]
    fn test_spawn_known_species() {
        let goblin = goblin();
        assert_eq!(goblin.name(), "Goblin");
        assert_eq!(goblin.health(), 35);
        assert_eq!(goblin.attack_range(), (3, 8));
        assert!(goblin.is_alive());

        let dragon = Monster::spawn("budge dragon").unwrap();
        assert_eq!(dragon.name(), "Budge Dragon");
        assert_eq!(dragon.level(), 3);
        assert_eq!(dragon.experience_reward(), 30);
    }

    #[test]
    fn test_spawn_unknown_species() {
        ensure_constants_initialized();
        let err = Monster::spawn("Balrog").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_lethal_hit_awards_experience() {
        let mut goblin = goblin();
        let result = goblin.take_damage(61);
        assert_eq!(result.actual, 60);
        assert!(result.is_dead);
        assert_eq!(result.exp_reward, Some(20));
        assert_eq!(goblin.health(), 0);
        assert_eq!(result.message, "Goblin has been killed! +20 EXP");
    }

    #[test]
    fn test_partial_hit_reports_health() {
        let mut goblin = goblin();
        let result = goblin.take_damage(11);
        assert_eq!(result.actual, 10);
        assert!(!result.is_dead);
        assert_eq!(result.exp_reward, None);
        assert_eq!(result.message, "Goblin took 10 damage. HP: 25/35");
    }

    #[test]
    fn test_attack_draw_in_range() {
        let goblin = goblin();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let attack = goblin.attack_with_rng("Hero", &mut rng);
            assert!((3..=8).contains(&attack.damage));
            assert_eq!(
                attack.message,
                format!("Goblin attacks Hero for {} damage!", attack.damage)
            );
        }
    }

    #[test]
    fn test_snapshot() {
        let json = serde_json::to_value(goblin().snapshot()).unwrap();
        assert_eq!(json["hp"], "35/35");
        assert_eq!(json["attack"], "3-8");
        assert_eq!(json["type"], "normal");
        assert_eq!(json["exp_reward"], 20);
    }

    proptest! {
        #[test]
        fn prop_mitigation_floor(defense in 0u32..200, attack in 0u32..200) {
            let stats = SpeciesStats {
                key: "Dummy".to_string(),
                name: "Dummy".to_string(),
                level: 1,
                map: "Nowhere".to_string(),
                tier: MonsterTier::Normal,
                max_health: 10_000,
                attack_min: 1,
                attack_max: 1,
                defense,
                experience_reward: 0,
            };
            let mut monster = Monster::from_species(&stats);
            let result = monster.take_damage(attack);
            if attack <= defense {
                prop_assert_eq!(result.actual, 1);
            } else {
                prop_assert_eq!(result.actual, attack - defense);
            }
            prop_assert_eq!(monster.health(), 10_000 - result.actual);
        }
    }
}
