use crate::character::Ability;
use crate::types::CharacterClass;
use thiserror::Error;

pub use gear_core::ErrorKind;

/// Error raised by the combat and progression engine
///
/// Nothing is mutated when one of these is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown monster species: {0}")]
    UnknownSpecies(String),
    #[error("Unknown character class: {0}")]
    UnknownClass(String),
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),
    #[error("{class} cannot use {ability}")]
    AbilityUnavailable {
        ability: Ability,
        class: CharacterClass,
    },
    #[error("Combat '{combat}' is fought by '{expected}', not '{found}'")]
    CharacterMismatch {
        combat: String,
        expected: String,
        found: String,
    },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnknownSpecies(_)
            | EngineError::UnknownClass(_)
            | EngineError::UnknownAbility(_) => ErrorKind::NotFound,
            EngineError::AbilityUnavailable { .. } | EngineError::CharacterMismatch { .. } => {
                ErrorKind::InvalidState
            }
        }
    }
}
