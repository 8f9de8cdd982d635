//! stat_core - Character progression and turn-based combat
//!
//! This library provides:
//! - Character: class profiles, experience and level-ups, class abilities
//! - Monster: combatants built from a species table
//! - CombatSession: the turn state machine driving a single battle
//! - GameConstants: tunable formulas and tables, loadable from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//!
//! let mut hero = Character::new("Johan", CharacterClass::Knight);
//! let goblin = Monster::spawn("Goblin").unwrap();
//! let mut combat = CombatSession::new(&hero, goblin, "Lorencia");
//!
//! let result = combat.execute_turn(&mut hero, None).unwrap();
//! assert_eq!(result.status, CombatStatus::Victory);
//! assert_eq!(result.exp_gained, Some(20));
//! ```

pub mod character;
pub mod combat;
pub mod config;
mod error;
pub mod monster;
pub mod prelude;
pub mod types;

// Core API - what most users need
pub use character::{
    Ability, AbilityOutcome, Attributes, Character, CharacterSnapshot, ClassProfile,
    DamageOutcome, EffectiveStats, ExperienceOutcome, HealOutcome,
};
pub use combat::{CombatId, CombatSession, CombatSnapshot, CombatStatus, TurnResult};
pub use monster::{Monster, MonsterSnapshot, SpeciesStats};
pub use types::{CharacterClass, MonsterTier};

pub use error::{EngineError, ErrorKind};

// Configuration
pub use config::{constants, init_constants, init_constants_default, GameConstants};
