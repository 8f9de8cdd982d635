use crate::WorldError;
use stat_core::{Character, CharacterClass, CharacterSnapshot, ExperienceOutcome};
use std::collections::BTreeMap;

/// Characters keyed by unique name
#[derive(Debug, Default)]
pub struct Roster {
    characters: BTreeMap<String, Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a level 1 character; names are unique
    pub fn create(&mut self, name: &str, class: CharacterClass) -> Result<&Character, WorldError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorldError::EmptyName);
        }
        if self.characters.contains_key(name) {
            return Err(WorldError::DuplicateCharacter(name.to_string()));
        }
        tracing::info!(character = %name, %class, "character created");
        let character = self
            .characters
            .entry(name.to_string())
            .or_insert_with(|| Character::new(name, class));
        Ok(character)
    }

    pub fn get(&self, name: &str) -> Result<&Character, WorldError> {
        self.characters
            .get(name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Character, WorldError> {
        self.characters
            .get_mut(name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.characters.contains_key(name)
    }

    /// Snapshots of every character, ordered by name
    pub fn list(&self) -> Vec<CharacterSnapshot> {
        self.characters.values().map(Character::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn gain_experience(&mut self, name: &str, amount: u64) -> Result<ExperienceOutcome, WorldError> {
        Ok(self.get_mut(name)?.gain_experience(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        stat_core::config::ensure_constants_initialized();
        let mut roster = Roster::new();
        let knight = roster.create("Johan", CharacterClass::Knight).unwrap();
        assert_eq!(knight.max_health(), 155);

        assert_eq!(roster.get("Johan").unwrap().class(), CharacterClass::Knight);
        assert!(roster.contains("Johan"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut roster = Roster::new();
        roster.create("Johan", CharacterClass::Knight).unwrap();
        let err = roster.create("Johan", CharacterClass::Wizard).unwrap_err();
        assert!(matches!(err, WorldError::DuplicateCharacter(_)));
        assert_eq!(err.kind(), crate::ErrorKind::InvalidState);
        assert_eq!(roster.get("Johan").unwrap().class(), CharacterClass::Knight);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut roster = Roster::new();
        for name in ["", "   ", "\t\n"] {
            let err = roster.create(name, CharacterClass::Knight).unwrap_err();
            assert!(matches!(err, WorldError::EmptyName));
            assert_eq!(err.kind(), crate::ErrorKind::InvalidState);
        }
        assert!(roster.is_empty());

        roster.create("  Johan  ", CharacterClass::Knight).unwrap();
        assert!(roster.contains("Johan"));
    }

    #[test]
    fn test_unknown_character() {
        let mut roster = Roster::new();
        let err = roster.gain_experience("Ghost", 10).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Character Ghost not found");
    }

    #[test]
    fn test_list_is_sorted() {
        let mut roster = Roster::new();
        roster.create("Zed", CharacterClass::Scout).unwrap();
        roster.create("Ann", CharacterClass::Wizard).unwrap();
        let names: Vec<String> = roster.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ann".to_string(), "Zed".to_string()]);
    }

    #[test]
    fn test_gain_experience() {
        let mut roster = Roster::new();
        roster.create("Johan", CharacterClass::Knight).unwrap();
        let outcome = roster.gain_experience("Johan", 1000).unwrap();
        assert!(outcome.is_level_up());
        assert_eq!(roster.get("Johan").unwrap().level(), 2);
    }
}
