//! Configuration loading - game constants from TOML

mod constants;

pub use constants::{
    constants, constants_initialized, ensure_constants_initialized, init_constants,
    init_constants_default, parse_constants, ClassTable, CombatConstants, GameConstants,
    ProgressionConstants,
};

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Error loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Read and deserialize a TOML file
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

pub(crate) fn parse_toml<T: DeserializeOwned>(toml: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(toml)?)
}
