//! gear_core - Equipment for the combat engine
//!
//! This library provides:
//! - Equipment: weapons, armour and rings with rarity/level scaled bonuses
//! - ItemCatalog: named base items, loadable from TOML
//! - Loadout: aggregated bonuses of everything a character wears
//!
//! Equipment never writes into a character's attributes. Callers read the
//! bonuses (directly or through a [`Loadout`]) and combine them themselves.

mod config;
mod item;
mod loadout;
pub mod types;

pub use config::{BaseItemConfig, CatalogFileConfig, ItemCatalog};
pub use item::{
    EquipOutcome, Equipment, EquipmentSnapshot, ItemId, StatBonus, UnequipOutcome,
};
pub use loadout::Loadout;
pub use types::{scale_bonus, ArmorKind, BaseStats, ItemCategory, Rarity, RingEffect, WeaponKind};

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification shared by every error in the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown character, item, species, zone or combat
    NotFound,
    /// Operation not allowed in the current state
    InvalidState,
    /// Not enough of a spendable resource
    InsufficientResource,
}

/// Error creating equipment
#[derive(Debug, Error)]
pub enum GearError {
    #[error("Unknown base item: {0}")]
    UnknownBaseItem(String),
    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

impl GearError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GearError::UnknownBaseItem(_) | GearError::UnknownRarity(_) | GearError::UnknownItem(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

/// Error loading an item catalog
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}
