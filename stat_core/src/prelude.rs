//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Ability, AbilityOutcome, Attributes, Character};
pub use crate::monster::Monster;
pub use crate::types::{CharacterClass, MonsterTier};

// Combat
pub use crate::combat::{CombatId, CombatSession, CombatStatus, TurnResult};

// Errors
pub use crate::{EngineError, ErrorKind};

// Config
pub use crate::config::{constants, init_constants, init_constants_default};

// Re-exports from gear_core
pub use gear_core::{Equipment, Loadout, Rarity};
