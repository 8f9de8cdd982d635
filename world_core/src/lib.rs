//! world_core - The world around a battle
//!
//! - ZoneRegistry: maps with a level gate and weighted monster spawns
//! - Roster: characters keyed by unique name
//! - Armory: forged items keyed by id
//! - CombatArena: live combat sessions, at most one per character

mod armory;
mod arena;
mod config;
mod registry;
mod roster;
mod zone;

pub use armory::Armory;
pub use arena::{CombatArena, CombatStart};
pub use config::{SpawnConfig, ZoneConfig, ZoneFileConfig};
pub use registry::ZoneRegistry;
pub use roster::Roster;
pub use zone::{SpawnEntry, SpawnRate, Zone};

pub use gear_core::ErrorKind;

use gear_core::GearError;
use stat_core::{CombatStatus, EngineError};
use std::path::PathBuf;
use thiserror::Error;

/// Error loading zone configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error from a world operation
///
/// Nothing is mutated when one of these is returned.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Character {0} not found")]
    UnknownCharacter(String),
    #[error("Item '{0}' not found")]
    UnknownItem(String),
    #[error("Map '{0}' not found")]
    UnknownZone(String),
    #[error("Combat '{0}' not found")]
    UnknownCombat(String),
    #[error("Character {0} already exists")]
    DuplicateCharacter(String),
    #[error("Character name cannot be empty")]
    EmptyName,
    #[error("Level {level} cannot enter {zone}. Required: {min_level}-{max_level}")]
    LevelGate {
        zone: String,
        level: u32,
        min_level: u32,
        max_level: u32,
    },
    #[error("Character {character} is already fighting in '{combat}'")]
    AlreadyEngaged { character: String, combat: String },
    #[error("Combat is already {status}")]
    CombatFinished { combat: String, status: CombatStatus },
    #[error("Map '{0}' has no monsters")]
    EmptyZone(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Gear(#[from] GearError),
}

impl WorldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorldError::UnknownCharacter(_)
            | WorldError::UnknownItem(_)
            | WorldError::UnknownZone(_)
            | WorldError::UnknownCombat(_) => ErrorKind::NotFound,
            WorldError::DuplicateCharacter(_)
            | WorldError::EmptyName
            | WorldError::LevelGate { .. }
            | WorldError::AlreadyEngaged { .. }
            | WorldError::CombatFinished { .. }
            | WorldError::EmptyZone(_) => ErrorKind::InvalidState,
            WorldError::Engine(e) => e.kind(),
            WorldError::Gear(e) => e.kind(),
        }
    }
}
