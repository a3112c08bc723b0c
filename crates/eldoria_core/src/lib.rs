//! Player state and actions for the Lost Scroll of Eldoria.
//!
//! The crate does no I/O. A narrator builds a [`GameState`], calls its actions
//! as the player chooses, and describes what the returned values say happened.

pub mod inventory;
pub mod outcome;
pub mod pacing;
pub mod rng;
pub mod state;
pub mod tuning;

pub use inventory::{Inventory, Item};
pub use outcome::{CaveSearch, EasternPath, Exchange, Outcome, PotionUse, Snapshot, Sneak};
pub use pacing::Pacing;
pub use rng::{RandomSource, SequenceRng, SimulationRng};
pub use state::{GameState, Player};
pub use tuning::{Span, Tuning, TuningError};
