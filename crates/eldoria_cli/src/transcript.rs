use chrono::Utc;
use eldoria_core::{CaveSearch, EasternPath, Exchange, PotionUse, Sneak};
use serde::Serialize;

/// How a playthrough ended, as seen from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    Victory,
    Defeat,
    /// Input ran out before the story finished.
    Abandoned,
}

/// A story beat the player went through, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "beat", rename_all = "snake_case")]
pub enum Event {
    Confused,
    EasternPath { result: EasternPath },
    Cave { result: CaveSearch },
    Stream { healed: u32 },
    Crossing { key_found: bool },
    Attack { exchange: Exchange },
    Sneak { result: Sneak },
    Potion { potion: PotionUse },
    Hesitation { damage: u32 },
}

/// Record of one finished playthrough, written as JSON. Never read back.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub started_at: String,
    pub finished_at: String,
    pub seed: u64,
    pub player: String,
    pub ending: Ending,
    pub health: u32,
    pub events: Vec<Event>,
}

impl Transcript {
    pub fn new(
        started_at: String,
        seed: u64,
        player: impl Into<String>,
        ending: Ending,
        health: u32,
        events: Vec<Event>,
    ) -> Self {
        Self {
            started_at,
            finished_at: Utc::now().to_rfc3339(),
            seed,
            player: player.into(),
            ending,
            health,
            events,
        }
    }
}
