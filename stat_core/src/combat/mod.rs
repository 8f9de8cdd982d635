//! Combat - turn-based battles between a character and a monster

mod result;
mod session;

pub use result::{CombatSnapshot, CombatStatus, CombatantSnapshot, TurnResult};
pub use session::CombatSession;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COMBAT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a combat session, e.g. `combat-4`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatId(pub String);

impl CombatId {
    fn generate() -> Self {
        let n = NEXT_COMBAT_ID.fetch_add(1, Ordering::Relaxed);
        CombatId(format!("combat-{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CombatId {
    fn from(s: &str) -> Self {
        CombatId(s.to_string())
    }
}

impl fmt::Display for CombatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
