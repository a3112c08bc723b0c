//! Values returned by game actions.
//!
//! Expected gameplay results (no potion left, a fatal hit) are plain data so the
//! narrator can describe them and tests can assert on them.

use serde::Serialize;

use crate::inventory::Inventory;

/// Where the playthrough stands, derived from health and whether the
/// Guardian's Chamber has been cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PotionUse {
    pub used: bool,
    /// The rolled heal amount, before clamping at max health.
    pub healed: u32,
}

impl PotionUse {
    pub const NONE: Self = Self {
        used: false,
        healed: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EasternPath {
    Trap { damage: u32 },
    Safe,
    SafeKeyFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaveSearch {
    NoKey,
    ChestPotion,
    ChestEmpty,
}

/// One round of combat against the guardian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub dealt: u32,
    /// Zero when the guardian fell before it could answer.
    pub taken: u32,
    pub guardian_defeated: bool,
    pub player_alive: bool,
    pub health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sneak {
    Escaped,
    Spotted { damage: u32 },
}

/// Comparable copy of everything an action can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub health: u32,
    pub max_health: u32,
    pub inventory: Inventory,
    pub guardian_health: u32,
    pub chamber_cleared: bool,
    pub outcome: Outcome,
}
