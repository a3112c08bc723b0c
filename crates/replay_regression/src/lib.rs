//! Helpers for deterministic replay regression tests.
//!
//! A replay applies a list of [`Move`]s to a [`GameState`] and records every
//! result as JSON, so a whole run can be compared against a golden trace.

use eldoria_core::{GameState, Pacing, RandomSource, SimulationRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    TakeDamage(u32),
    Heal(u32),
    UsePotion,
    EasternPath,
    InvestigateCave,
    DrinkFromStream,
    CrossStream,
    AttackGuardian,
    AttemptSneak,
    Hesitate,
}

/// East through the trap corridor, check the cave, then fight it out.
pub const EASTERN_ASSAULT: &[Move] = &[
    Move::EasternPath,
    Move::InvestigateCave,
    Move::AttackGuardian,
    Move::AttackGuardian,
    Move::UsePotion,
    Move::AttackGuardian,
    Move::AttackGuardian,
    Move::AttackGuardian,
];

/// West along the stream, then try to slip past.
pub const WESTERN_STEALTH: &[Move] = &[
    Move::DrinkFromStream,
    Move::CrossStream,
    Move::AttemptSneak,
    Move::AttemptSneak,
    Move::UsePotion,
    Move::AttemptSneak,
    Move::AttemptSneak,
];

pub fn replay<R: RandomSource>(game: &mut GameState<R>, moves: &[Move]) -> Value {
    let steps: Vec<Value> = moves
        .iter()
        .map(|&step| {
            let result = apply(game, step);
            json!({ "move": step, "result": result, "health": game.health() })
        })
        .collect();
    json!({ "steps": steps, "final": game.snapshot() })
}

pub fn replay_seeded(seed: u64, moves: &[Move]) -> Value {
    let mut game = GameState::new(Pacing::instant(), SimulationRng::new(seed));
    let mut trace = replay(&mut game, moves);
    trace["seed"] = json!(seed);
    trace
}

fn apply<R: RandomSource>(game: &mut GameState<R>, step: Move) -> Value {
    match step {
        Move::TakeDamage(amount) => json!(game.take_damage(amount)),
        Move::Heal(amount) => json!(game.heal(amount)),
        Move::UsePotion => json!(game.use_potion()),
        Move::EasternPath => json!(game.enter_eastern_path()),
        Move::InvestigateCave => json!(game.investigate_cave()),
        Move::DrinkFromStream => json!(game.drink_from_stream()),
        Move::CrossStream => json!(game.cross_stream()),
        Move::AttackGuardian => json!(game.attack_guardian()),
        Move::AttemptSneak => json!(game.attempt_sneak()),
        Move::Hesitate => json!(game.hesitate()),
    }
}
