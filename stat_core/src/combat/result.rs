//! Turn results and combat snapshots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a combat session
///
/// `Active` is the only non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStatus {
    Active,
    Victory,
    Defeat,
    Fled,
}

impl CombatStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CombatStatus::Active)
    }
}

impl fmt::Display for CombatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatStatus::Active => write!(f, "Active"),
            CombatStatus::Victory => write!(f, "Victory"),
            CombatStatus::Defeat => write!(f, "Defeat"),
            CombatStatus::Fled => write!(f, "Fled"),
        }
    }
}

/// Outcome of a single turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub turn: u32,
    /// Messages produced by this turn only
    pub log: Vec<String>,
    pub status: CombatStatus,
    pub character_hp: String,
    pub character_mp: String,
    pub monster_hp: String,
    /// Experience awarded, present only on the victorious turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_gained: Option<u64>,
}

impl TurnResult {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub hp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

/// Full state of a combat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatSnapshot {
    pub id: String,
    pub status: CombatStatus,
    pub turn: u32,
    pub map: String,
    pub character: CombatantSnapshot,
    pub monster: CombatantSnapshot,
    /// Every message of every completed turn
    pub log: Vec<String>,
}
