use crate::registry::ZoneRegistry;
use crate::roster::Roster;
use crate::WorldError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use stat_core::{CombatId, CombatSession, CombatSnapshot, Monster, TurnResult};
use std::collections::HashMap;

/// A freshly started combat
#[derive(Debug, Clone, Serialize)]
pub struct CombatStart {
    pub id: CombatId,
    pub message: String,
    pub combat: CombatSnapshot,
}

/// Live combat sessions alongside the characters fighting them
///
/// A character is engaged in at most one active session; the engagement is
/// released as soon as its session reaches a terminal status. Victory and
/// defeat sessions stay readable through [`CombatArena::state`] until the
/// caller drops them with [`CombatArena::remove`] or
/// [`CombatArena::prune_finished`].
#[derive(Debug)]
pub struct CombatArena {
    roster: Roster,
    zones: ZoneRegistry,
    sessions: HashMap<CombatId, CombatSession>,
    engaged: HashMap<String, CombatId>,
    rng: ChaCha8Rng,
}

impl CombatArena {
    pub fn new(roster: Roster, zones: ZoneRegistry) -> Self {
        Self::with_rng(roster, zones, ChaCha8Rng::from_entropy())
    }

    /// Arena whose spawns and monster attacks replay identically for a seed
    pub fn with_seed(roster: Roster, zones: ZoneRegistry, seed: u64) -> Self {
        Self::with_rng(roster, zones, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(roster: Roster, zones: ZoneRegistry, rng: ChaCha8Rng) -> Self {
        CombatArena {
            roster,
            zones,
            sessions: HashMap::new(),
            engaged: HashMap::new(),
            rng,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Combat a character is currently engaged in
    pub fn active_combat(&self, character: &str) -> Option<&CombatId> {
        self.engaged.get(character)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Start a combat against a random monster of the zone
    pub fn start(&mut self, character: &str, zone: &str) -> Result<CombatStart, WorldError> {
        let fighter = self.roster.get(character)?;
        if let Some(combat) = self.engaged.get(character) {
            return Err(WorldError::AlreadyEngaged {
                character: character.to_string(),
                combat: combat.to_string(),
            });
        }

        let zone = self.zones.zone(zone)?;
        if !zone.can_enter(fighter.level()) {
            tracing::warn!(character, zone = %zone.name, level = fighter.level(), "level gate denied");
            return Err(WorldError::LevelGate {
                zone: zone.name.clone(),
                level: fighter.level(),
                min_level: zone.min_level,
                max_level: zone.max_level,
            });
        }

        let spawn = zone
            .pick_spawn_with_rng(&mut self.rng)
            .ok_or_else(|| WorldError::EmptyZone(zone.name.clone()))?;
        let monster = Monster::spawn(&spawn.species)?;

        let message = format!(
            "{} encounters a {} in {}!",
            fighter.name(),
            monster.name(),
            zone.name
        );
        let session = CombatSession::new(fighter, monster, zone.name.clone());
        let snapshot = session.snapshot(fighter)?;
        let id = session.id().clone();

        self.engaged.insert(fighter.name().to_string(), id.clone());
        self.sessions.insert(id.clone(), session);

        Ok(CombatStart {
            id,
            message,
            combat: snapshot,
        })
    }

    /// Basic attack turn
    pub fn attack(&mut self, id: &str) -> Result<TurnResult, WorldError> {
        self.turn(id, None)
    }

    /// Named skill turn
    pub fn use_skill(&mut self, id: &str, skill: &str) -> Result<TurnResult, WorldError> {
        self.turn(id, Some(skill))
    }

    fn turn(&mut self, id: &str, skill: Option<&str>) -> Result<TurnResult, WorldError> {
        let session = self
            .sessions
            .get_mut(&CombatId::from(id))
            .ok_or_else(|| WorldError::UnknownCombat(id.to_string()))?;
        let character = self.roster.get_mut(session.character_name())?;

        let result = session.execute_turn_with_rng(character, skill, &mut self.rng)?;
        if result.is_terminal() {
            release(&mut self.engaged, session.character_name(), session.id());
        }
        Ok(result)
    }

    /// Leave an active combat
    ///
    /// The session is removed and its final state returned.
    pub fn flee(&mut self, id: &str) -> Result<CombatSnapshot, WorldError> {
        let key = CombatId::from(id);
        let session = self
            .sessions
            .get_mut(&key)
            .ok_or_else(|| WorldError::UnknownCombat(id.to_string()))?;
        let character = self.roster.get(session.character_name())?;

        if !session.flee() {
            return Err(WorldError::CombatFinished {
                combat: id.to_string(),
                status: session.status(),
            });
        }
        let snapshot = session.snapshot(character)?;

        release(&mut self.engaged, character.name(), &key);
        self.sessions.remove(&key);
        Ok(snapshot)
    }

    /// Current state of a combat, active or finished
    pub fn state(&self, id: &str) -> Result<CombatSnapshot, WorldError> {
        let session = self
            .sessions
            .get(&CombatId::from(id))
            .ok_or_else(|| WorldError::UnknownCombat(id.to_string()))?;
        let character = self.roster.get(session.character_name())?;
        Ok(session.snapshot(character)?)
    }

    /// Drop every finished session, returning how many were dropped
    pub fn prune_finished(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.is_active());
        let pruned = before - self.sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.sessions.len(), "pruned finished combats");
        }
        pruned
    }

    /// Drop a combat, releasing its character
    pub fn remove(&mut self, id: &str) -> Result<CombatSession, WorldError> {
        let key = CombatId::from(id);
        let session = self
            .sessions
            .remove(&key)
            .ok_or_else(|| WorldError::UnknownCombat(id.to_string()))?;
        release(&mut self.engaged, session.character_name(), &key);
        Ok(session)
    }
}

fn release(engaged: &mut HashMap<String, CombatId>, character: &str, id: &CombatId) {
    if engaged.get(character) == Some(id) {
        engaged.remove(character);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use stat_core::{CharacterClass, CombatStatus};

    fn arena(seed: u64) -> CombatArena {
        stat_core::config::ensure_constants_initialized();
        let mut roster = Roster::new();
        roster.create("Johan", CharacterClass::Knight).unwrap();
        roster.create("Merlin", CharacterClass::Wizard).unwrap();
        CombatArena::with_seed(roster, ZoneRegistry::with_defaults(), seed)
    }

    fn fight_to_end(arena: &mut CombatArena, id: &str) -> TurnResult {
        for _ in 0..20 {
            let result = arena.attack(id).unwrap();
            if result.is_terminal() {
                return result;
            }
        }
        panic!("combat did not finish");
    }

    #[test]
    fn test_start_combat() {
        let mut arena = arena(1);
        let start = arena.start("Johan", "lorencia").unwrap();

        assert_eq!(start.combat.status, CombatStatus::Active);
        assert_eq!(start.combat.turn, 0);
        assert_eq!(start.combat.map, "Lorencia");
        assert!(start.message.starts_with("Johan encounters a "));
        assert!(start.message.ends_with(" in Lorencia!"));
        assert_eq!(arena.active_combat("Johan"), Some(&start.id));
    }

    #[test]
    fn test_knight_wins_in_lorencia() {
        let mut arena = arena(2);
        let start = arena.start("Johan", "Lorencia").unwrap();
        let result = fight_to_end(&mut arena, start.id.as_str());

        assert_eq!(result.status, CombatStatus::Victory);
        assert!(result.exp_gained.is_some());
        assert!(arena.active_combat("Johan").is_none());
        assert!(arena.roster().get("Johan").unwrap().experience() > 0);

        // Finished combat stays readable and turns are no-ops
        let again = arena.attack(start.id.as_str()).unwrap();
        assert_eq!(again.turn, result.turn);
        assert_eq!(again.log, vec!["Combat is already Victory".to_string()]);
        assert_eq!(arena.state(start.id.as_str()).unwrap().status, CombatStatus::Victory);

        // Engagement released
        assert!(arena.start("Johan", "Lorencia").is_ok());
    }

    #[test]
    fn test_unknown_character_and_zone() {
        let mut arena = arena(3);
        let err = arena.start("Nobody", "Lorencia").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = arena.start("Johan", "Kalima").unwrap_err();
        assert!(matches!(err, WorldError::UnknownZone(_)));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_level_gate() {
        let mut arena = arena(4);
        let err = arena.start("Johan", "Dungeon").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.to_string(), "Level 1 cannot enter Dungeon. Required: 40-80");
        assert!(arena.active_combat("Johan").is_none());
    }

    #[test]
    fn test_single_active_session_per_character() {
        let mut arena = arena(5);
        let first = arena.start("Johan", "Lorencia").unwrap();
        let err = arena.start("Johan", "Lorencia").unwrap_err();
        assert!(matches!(err, WorldError::AlreadyEngaged { .. }));
        assert_eq!(arena.len(), 1);

        // Other characters are unaffected
        assert!(arena.start("Merlin", "Lorencia").is_ok());
        assert_eq!(arena.active_combat("Johan"), Some(&first.id));
    }

    #[test]
    fn test_flee_removes_session() {
        let mut arena = arena(6);
        let start = arena.start("Johan", "Lorencia").unwrap();
        let id = start.id.as_str();

        let snapshot = arena.flee(id).unwrap();
        assert_eq!(snapshot.status, CombatStatus::Fled);
        assert_eq!(snapshot.log.last().unwrap(), &format!("Johan fled from {}!", snapshot.monster.name));

        assert!(matches!(arena.state(id), Err(WorldError::UnknownCombat(_))));
        assert!(matches!(arena.flee(id), Err(WorldError::UnknownCombat(_))));
        assert!(arena.active_combat("Johan").is_none());
    }

    #[test]
    fn test_flee_after_victory_rejected() {
        let mut arena = arena(7);
        let start = arena.start("Johan", "Lorencia").unwrap();
        fight_to_end(&mut arena, start.id.as_str());

        let err = arena.flee(start.id.as_str()).unwrap_err();
        assert!(matches!(
            err,
            WorldError::CombatFinished { status: CombatStatus::Victory, .. }
        ));
        assert_eq!(err.to_string(), "Combat is already Victory");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_use_skill_adds_log_line() {
        let mut arena = arena(8);
        let start = arena.start("Johan", "Lorencia").unwrap();
        let result = arena.use_skill(start.id.as_str(), "Impale").unwrap();
        assert!(result
            .log
            .contains(&"Johan channels energy into the attack!".to_string()));
    }

    #[test]
    fn test_remove_releases_character() {
        let mut arena = arena(9);
        let start = arena.start("Johan", "Lorencia").unwrap();
        let session = arena.remove(start.id.as_str()).unwrap();
        assert_eq!(session.character_name(), "Johan");
        assert!(arena.active_combat("Johan").is_none());
        assert!(arena.remove(start.id.as_str()).is_err());
    }

    #[test]
    fn test_prune_finished_keeps_active() {
        let mut arena = arena(10);
        let done = arena.start("Johan", "Lorencia").unwrap();
        fight_to_end(&mut arena, done.id.as_str());
        let live = arena.start("Merlin", "Lorencia").unwrap();
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.prune_finished(), 1);
        assert_eq!(arena.len(), 1);
        assert!(matches!(arena.state(done.id.as_str()), Err(WorldError::UnknownCombat(_))));
        assert_eq!(arena.state(live.id.as_str()).unwrap().status, CombatStatus::Active);
        assert_eq!(arena.active_combat("Merlin"), Some(&live.id));
        assert_eq!(arena.prune_finished(), 0);
    }

    #[test]
    fn test_seeded_battles_replay() {
        let run = |seed| {
            let mut arena = arena(seed);
            let start = arena.start("Johan", "Lorencia").unwrap();
            let monster = start.combat.monster.name.clone();
            let result = fight_to_end(&mut arena, start.id.as_str());
            (monster, result.turn, result.log, result.character_hp)
        };
        assert_eq!(run(77), run(77));
    }
}
