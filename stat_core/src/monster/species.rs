//! Species table - fixed stats each monster is built from

use crate::types::MonsterTier;
use serde::{Deserialize, Serialize};

/// Static stats of a monster species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesStats {
    /// Lookup key, e.g. "BudgeDragon"
    pub key: String,
    /// Display name
    pub name: String,
    pub level: u32,
    /// Map the species originates from
    pub map: String,
    #[serde(default)]
    pub tier: MonsterTier,
    pub max_health: u32,
    pub attack_min: u32,
    pub attack_max: u32,
    pub defense: u32,
    pub experience_reward: u64,
}

/// Normalize a species key: lowercase ASCII alphanumerics only
///
/// "Budge Dragon", "budge_dragon" and "BudgeDragon" all map to "budgedragon".
pub fn species_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn species(
    key: &str,
    name: &str,
    level: u32,
    map: &str,
    tier: MonsterTier,
    max_health: u32,
    attack: (u32, u32),
    defense: u32,
    experience_reward: u64,
) -> SpeciesStats {
    SpeciesStats {
        key: key.to_string(),
        name: name.to_string(),
        level,
        map: map.to_string(),
        tier,
        max_health,
        attack_min: attack.0,
        attack_max: attack.1,
        defense,
        experience_reward,
    }
}

/// Built-in species, one per monster the default zones can spawn
pub fn default_species() -> Vec<SpeciesStats> {
    use MonsterTier::*;
    vec![
        // Lorencia
        species("BudgeDragon", "Budge Dragon", 3, "Lorencia", Normal, 50, (5, 12), 2, 30),
        species("Goblin", "Goblin", 5, "Lorencia", Normal, 35, (3, 8), 1, 20),
        species("HellSpider", "Hell Spider", 8, "Lorencia", Normal, 80, (8, 15), 4, 60),
        species("Lich", "Lich", 15, "Lorencia", Elite, 180, (15, 28), 8, 200),
        // Dungeon
        species("Skeleton", "Skeleton", 42, "Dungeon", Normal, 600, (60, 85), 30, 1_500),
        species("DarkKnight NPC", "Dark Knight", 50, "Dungeon", Elite, 900, (80, 110), 40, 2_500),
        species("Ghost", "Ghost", 55, "Dungeon", Normal, 800, (75, 100), 35, 2_200),
        species("GreatDragon", "Great Dragon", 70, "Dungeon", Boss, 2_500, (120, 170), 60, 8_000),
        // Devias
        species("IceMonster", "Ice Monster", 82, "Devias", Normal, 1_800, (140, 180), 70, 7_000),
        species("Yeti", "Yeti", 90, "Devias", Normal, 2_100, (155, 200), 80, 8_500),
        species("IceQueen", "Ice Queen", 120, "Devias", Boss, 6_000, (250, 330), 120, 30_000),
        // Noria
        species("ForestMonster", "Forest Monster", 55, "Noria", Normal, 850, (75, 105), 35, 2_300),
        species("EliteYeti", "Elite Yeti", 75, "Noria", Elite, 1_900, (130, 170), 65, 6_500),
        species("Cursedking", "Cursed King", 95, "Noria", Boss, 4_500, (190, 250), 95, 20_000),
        // Atlans
        species("Bahamut", "Bahamut", 140, "Atlans", Normal, 5_000, (280, 350), 140, 35_000),
        species("Vepar", "Vepar", 160, "Atlans", Elite, 6_500, (320, 400), 160, 50_000),
        species("GoldenLizard", "Golden Lizard", 200, "Atlans", Boss, 12_000, (420, 520), 200, 120_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_species_key_normalization() {
        assert_eq!(species_key("Budge Dragon"), "budgedragon");
        assert_eq!(species_key("budge_dragon"), "budgedragon");
        assert_eq!(species_key("DarkKnight NPC"), "darkknightnpc");
    }

    #[test]
    fn test_default_species_are_valid() {
        let table = default_species();
        let mut keys = HashSet::new();
        for s in &table {
            assert!(s.max_health > 0, "{} has no health", s.key);
            assert!(s.attack_min <= s.attack_max, "{} has inverted attack", s.key);
            assert!(keys.insert(species_key(&s.key)), "duplicate key {}", s.key);
        }
    }

    #[test]
    fn test_goblin_stats() {
        let goblin = default_species()
            .into_iter()
            .find(|s| s.key == "Goblin")
            .unwrap();
        assert_eq!(goblin.level, 5);
        assert_eq!(goblin.map, "Lorencia");
        assert_eq!(goblin.tier, MonsterTier::Normal);
        assert_eq!(goblin.max_health, 35);
        assert_eq!((goblin.attack_min, goblin.attack_max), (3, 8));
        assert_eq!(goblin.defense, 1);
        assert_eq!(goblin.experience_reward, 20);
    }
}
