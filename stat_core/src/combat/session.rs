//! CombatSession - turn resolution between one character and one monster

use super::result::{CombatSnapshot, CombatStatus, CombatantSnapshot, TurnResult};
use super::CombatId;
use crate::character::Character;
use crate::error::EngineError;
use crate::monster::Monster;
use rand::Rng;

/// A single battle
///
/// The session owns its monster for the duration of the fight. The character
/// stays with its owner and is lent to each turn; the session only records
/// its name and refuses any other character.
#[derive(Debug, Clone)]
pub struct CombatSession {
    id: CombatId,
    character_name: String,
    map: String,
    monster: Monster,
    turn: u32,
    status: CombatStatus,
    log: Vec<String>,
}

impl CombatSession {
    pub fn new(character: &Character, monster: Monster, map: impl Into<String>) -> Self {
        let session = CombatSession {
            id: CombatId::generate(),
            character_name: character.name().to_string(),
            map: map.into(),
            monster,
            turn: 0,
            status: CombatStatus::Active,
            log: Vec::new(),
        };
        tracing::info!(
            combat = %session.id,
            character = %session.character_name,
            monster = %session.monster.name(),
            map = %session.map,
            "combat started"
        );
        session
    }

    pub fn id(&self) -> &CombatId {
        &self.id
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> CombatStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == CombatStatus::Active
    }

    /// Accumulated log of every completed turn
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn check_character(&self, character: &Character) -> Result<(), EngineError> {
        if character.name() != self.character_name {
            return Err(EngineError::CharacterMismatch {
                combat: self.id.to_string(),
                expected: self.character_name.clone(),
                found: character.name().to_string(),
            });
        }
        Ok(())
    }

    pub fn execute_turn(
        &mut self,
        character: &mut Character,
        skill: Option<&str>,
    ) -> Result<TurnResult, EngineError> {
        self.execute_turn_with_rng(character, skill, &mut rand::thread_rng())
    }

    /// Resolve one turn: the character strikes, then a surviving monster
    /// strikes back
    ///
    /// The strike always uses the basic attack formula; a skill name only
    /// adds a line to the log. On a terminal session this returns the current
    /// status without touching the turn counter or either combatant.
    pub fn execute_turn_with_rng(
        &mut self,
        character: &mut Character,
        skill: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<TurnResult, EngineError> {
        self.check_character(character)?;

        if !self.is_active() {
            tracing::warn!(combat = %self.id, status = %self.status, "turn requested on finished combat");
            let log = vec![format!("Combat is already {}", self.status)];
            return Ok(self.build_result(character, log, None));
        }

        self.turn += 1;
        let mut log = Vec::new();

        // Character phase
        let hit = self.monster.take_damage(character.attack_power());
        log.push(hit.message);
        if skill.is_some() {
            log.push(format!("{} channels energy into the attack!", self.character_name));
        }

        if !self.monster.is_alive() {
            return Ok(self.victory(character, log));
        }

        // Monster phase
        let attack = self.monster.attack_with_rng(&self.character_name, rng);
        log.push(attack.message);
        log.push(character.take_damage(attack.damage).to_string());

        if !character.is_alive() {
            return Ok(self.defeat(character, log));
        }

        tracing::debug!(combat = %self.id, turn = self.turn, monster_hp = self.monster.health(), "turn resolved");
        self.log.extend(log.iter().cloned());
        Ok(self.build_result(character, log, None))
    }

    fn victory(&mut self, character: &mut Character, mut log: Vec<String>) -> TurnResult {
        self.status = CombatStatus::Victory;
        let reward = self.monster.experience_reward();
        let progress = character.gain_experience(reward);

        log.push(format!("{} has been defeated!", self.monster.name()));
        log.push(progress.to_string());
        self.log.extend(log.iter().cloned());

        tracing::info!(combat = %self.id, turn = self.turn, exp = reward, "victory");
        self.build_result(character, log, Some(reward))
    }

    fn defeat(&mut self, character: &Character, mut log: Vec<String>) -> TurnResult {
        self.status = CombatStatus::Defeat;
        log.push(format!("{} has been defeated...", self.character_name));
        self.log.extend(log.iter().cloned());

        tracing::info!(combat = %self.id, turn = self.turn, "defeat");
        self.build_result(character, log, None)
    }

    /// Leave the fight; returns false if it was already over
    pub fn flee(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = CombatStatus::Fled;
        self.log
            .push(format!("{} fled from {}!", self.character_name, self.monster.name()));
        tracing::info!(combat = %self.id, turn = self.turn, "fled");
        true
    }

    fn build_result(&self, character: &Character, log: Vec<String>, exp_gained: Option<u64>) -> TurnResult {
        TurnResult {
            turn: self.turn,
            log,
            status: self.status,
            character_hp: character.health_ratio(),
            character_mp: character.mana_ratio(),
            monster_hp: self.monster.health_ratio(),
            exp_gained,
        }
    }

    pub fn snapshot(&self, character: &Character) -> Result<CombatSnapshot, EngineError> {
        self.check_character(character)?;
        Ok(CombatSnapshot {
            id: self.id.to_string(),
            status: self.status,
            turn: self.turn,
            map: self.map.clone(),
            character: CombatantSnapshot {
                name: self.character_name.clone(),
                hp: character.health_ratio(),
                mp: Some(character.mana_ratio()),
                level: None,
            },
            monster: CombatantSnapshot {
                name: self.monster.name().to_string(),
                hp: self.monster.health_ratio(),
                mp: None,
                level: Some(self.monster.level()),
            },
            log: self.log.clone(),
        })
    }
}
