use serde::Serialize;
use tracing::{debug, info};

use crate::inventory::{Inventory, Item};
use crate::outcome::{CaveSearch, EasternPath, Exchange, Outcome, PotionUse, Snapshot, Sneak};
use crate::pacing::Pacing;
use crate::rng::{RandomSource, SimulationRng};
use crate::tuning::{Span, Tuning, TuningError, PERCENT};

/// The adventurer. Health stays within `0..=max_health`; only [`GameState`]
/// actions change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    health: u32,
    max_health: u32,
    inventory: Inventory,
}

impl Player {
    fn new(tuning: &Tuning) -> Self {
        Self {
            name: String::new(),
            health: tuning.max_health,
            max_health: tuning.max_health,
            inventory: Inventory::new().with(Item::Potion, tuning.starting_potions),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// One playthrough of the Lost Scroll of Eldoria.
///
/// Every random roll comes from the injected [`RandomSource`]. Once the player
/// is defeated the story actions return `None` without rolling or mutating, and
/// healing restores nothing: only a fresh instance (or [`GameState::reset`])
/// brings the player back.
#[derive(Debug)]
pub struct GameState<R = SimulationRng> {
    player: Player,
    guardian_health: u32,
    chamber_cleared: bool,
    tuning: Tuning,
    pacing: Pacing,
    rng: R,
}

impl Default for GameState<SimulationRng> {
    fn default() -> Self {
        Self::new(Pacing::default(), SimulationRng::from_entropy())
    }
}

impl<R: RandomSource> GameState<R> {
    pub fn new(pacing: Pacing, rng: R) -> Self {
        Self::build(pacing, rng, Tuning::default())
    }

    /// Starts a game with custom constants. The tuning is validated first, so
    /// no later roll can be asked for an empty range.
    pub fn with_tuning(pacing: Pacing, rng: R, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(pacing, rng, tuning))
    }

    fn build(pacing: Pacing, rng: R, tuning: Tuning) -> Self {
        Self {
            player: Player::new(&tuning),
            guardian_health: tuning.guardian_health,
            chamber_cleared: false,
            tuning,
            pacing,
            rng,
        }
    }

    /// Restores the starting state, keeping the random source and pacing.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.guardian_health = self.tuning.guardian_health;
        self.chamber_cleared = false;
        debug!(target: "eldoria_core.state", "game reset");
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player.name = name.into();
    }

    pub fn health(&self) -> u32 {
        self.player.health
    }

    pub fn inventory(&self) -> &Inventory {
        &self.player.inventory
    }

    pub fn guardian_health(&self) -> u32 {
        self.guardian_health
    }

    pub fn chamber_cleared(&self) -> bool {
        self.chamber_cleared
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_alive(&self) -> bool {
        self.player.is_alive()
    }

    pub fn outcome(&self) -> Outcome {
        if !self.is_alive() {
            Outcome::Defeat
        } else if self.chamber_cleared {
            Outcome::Victory
        } else {
            Outcome::InProgress
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            inventory: self.player.inventory.clone(),
            guardian_health: self.guardian_health,
            chamber_cleared: self.chamber_cleared,
            outcome: self.outcome(),
        }
    }

    /// Subtracts `amount`, stopping at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let was_alive = self.is_alive();
        self.player.health = self.player.health.saturating_sub(amount);
        debug!(
            target: "eldoria_core.health",
            amount,
            current = self.player.health,
            max = self.player.max_health,
            "damage taken"
        );
        if was_alive && !self.is_alive() {
            info!(target: "eldoria_core.health", "player defeated");
        }
        self.player.health
    }

    /// Adds `amount`, stopping at max health. Returns how much was restored,
    /// which is zero for a defeated player.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.player.health;
        self.player.health = before
            .saturating_add(amount)
            .min(self.player.max_health);
        let restored = self.player.health - before;
        debug!(
            target: "eldoria_core.health",
            amount,
            restored,
            current = self.player.health,
            max = self.player.max_health,
            "health restored"
        );
        restored
    }

    pub fn use_potion(&mut self) -> PotionUse {
        if !self.is_alive() || !self.player.inventory.has(Item::Potion) {
            return PotionUse::NONE;
        }
        let healed = self.roll(self.tuning.potion_heal);
        self.player.inventory.take(Item::Potion);
        self.heal(healed);
        debug!(target: "eldoria_core.inventory", healed, "potion used");
        PotionUse { used: true, healed }
    }

    /// The overgrown eastern path: likely a trap, sometimes a key.
    pub fn enter_eastern_path(&mut self) -> Option<EasternPath> {
        if !self.is_alive() {
            return None;
        }
        if self.roll_percent() > self.tuning.trap_threshold {
            let damage = self.roll(self.tuning.trap_damage);
            self.take_damage(damage);
            return Some(EasternPath::Trap { damage });
        }
        if !self.player.inventory.has(Item::Key)
            && self.rng.gen_range(1..=self.tuning.east_key_odds) == 1
        {
            self.player.inventory.add(Item::Key, 1);
            debug!(target: "eldoria_core.inventory", "key found on the eastern path");
            return Some(EasternPath::SafeKeyFound);
        }
        Some(EasternPath::Safe)
    }

    /// Opens the cave chest with the key. The chest only holds a potion for a
    /// player who has none.
    pub fn investigate_cave(&mut self) -> Option<CaveSearch> {
        if !self.is_alive() {
            return None;
        }
        if !self.player.inventory.has(Item::Key) {
            return Some(CaveSearch::NoKey);
        }
        if self.player.inventory.has(Item::Potion) {
            return Some(CaveSearch::ChestEmpty);
        }
        self.player.inventory.add(Item::Potion, 1);
        debug!(target: "eldoria_core.inventory", "potion found in the chest");
        Some(CaveSearch::ChestPotion)
    }

    /// Returns the rolled amount of healing.
    pub fn drink_from_stream(&mut self) -> Option<u32> {
        if !self.is_alive() {
            return None;
        }
        let healing = self.roll(self.tuning.stream_heal);
        self.heal(healing);
        Some(healing)
    }

    /// The western path's stream crossing. Returns whether a key turned up.
    pub fn cross_stream(&mut self) -> Option<bool> {
        if !self.is_alive() {
            return None;
        }
        // Rolled even when the key is already held.
        let lucky = self.rng.gen_range(1..=self.tuning.west_key_odds) == 1;
        let key_found = lucky && !self.player.inventory.has(Item::Key);
        if key_found {
            self.player.inventory.add(Item::Key, 1);
            debug!(target: "eldoria_core.inventory", "key found in the stream");
        }
        Some(key_found)
    }

    /// Strikes the guardian once; if it survives, it strikes back.
    pub fn attack_guardian(&mut self) -> Option<Exchange> {
        if !self.guardian_blocks() {
            return None;
        }
        let dealt = self.roll(self.tuning.player_attack);
        self.guardian_health = self.guardian_health.saturating_sub(dealt);
        debug!(
            target: "eldoria_core.combat",
            dealt,
            guardian = self.guardian_health,
            "player strikes"
        );

        if self.guardian_health == 0 {
            self.chamber_cleared = true;
            info!(target: "eldoria_core.combat", "guardian defeated");
            return Some(Exchange {
                dealt,
                taken: 0,
                guardian_defeated: true,
                player_alive: true,
                health: self.player.health,
            });
        }

        let taken = self.roll(self.tuning.guardian_attack);
        let health = self.take_damage(taken);
        Some(Exchange {
            dealt,
            taken,
            guardian_defeated: false,
            player_alive: health > 0,
            health,
        })
    }

    pub fn attempt_sneak(&mut self) -> Option<Sneak> {
        if !self.guardian_blocks() {
            return None;
        }
        if self.roll_percent() > self.tuning.sneak_threshold {
            self.chamber_cleared = true;
            info!(target: "eldoria_core.combat", "slipped past the guardian");
            return Some(Sneak::Escaped);
        }
        let damage = self.roll(self.tuning.sneak_damage);
        self.take_damage(damage);
        Some(Sneak::Spotted { damage })
    }

    /// The guardian punishes an indecisive turn. Returns the damage taken.
    pub fn hesitate(&mut self) -> Option<u32> {
        if !self.guardian_blocks() {
            return None;
        }
        let damage = self.roll(self.tuning.hesitation_damage);
        self.take_damage(damage);
        Some(damage)
    }

    fn guardian_blocks(&self) -> bool {
        self.is_alive() && !self.chamber_cleared
    }

    fn roll(&mut self, span: Span) -> u32 {
        self.rng.gen_range(span.range())
    }

    fn roll_percent(&mut self) -> u32 {
        self.rng.gen_range(1..=PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    fn game(values: &[u32]) -> GameState<SequenceRng> {
        GameState::new(Pacing::instant(), SequenceRng::new(values.to_vec()))
    }

    #[test]
    fn starts_from_tuning() {
        let game = game(&[]);
        assert_eq!(100, game.health());
        assert_eq!(1, game.inventory().count(Item::Potion));
        assert!(!game.inventory().has(Item::Key));
        assert_eq!(50, game.guardian_health());
        assert_eq!(Outcome::InProgress, game.outcome());
        assert_eq!("", game.player().name());
    }

    #[test]
    fn default_game_paces_for_interactive_play() {
        let game = GameState::<SimulationRng>::default();
        assert!(!game.pacing().is_instant());
        assert_eq!(100, game.health());
    }

    #[test]
    fn damage_clamps_to_zero() {
        let mut game = game(&[]);
        assert_eq!(70, game.take_damage(30));
        assert_eq!(0, game.take_damage(500));
        assert_eq!(0, game.take_damage(1));
        assert!(!game.is_alive());
        assert_eq!(Outcome::Defeat, game.outcome());
    }

    #[test]
    fn exact_lethal_damage_defeats() {
        let mut game = game(&[]);
        assert_eq!(0, game.take_damage(100));
        assert!(!game.is_alive());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut game = game(&[]);
        game.take_damage(10);
        assert_eq!(10, game.heal(25));
        assert_eq!(100, game.health());
        assert_eq!(0, game.heal(u32::MAX));
    }

    #[test]
    fn potion_heals_and_caps() {
        let mut game = game(&[40]);
        game.take_damage(20);

        let used = game.use_potion();

        assert_eq!(PotionUse { used: true, healed: 40 }, used);
        assert_eq!(100, game.health());
        assert_eq!(0, game.inventory().count(Item::Potion));
    }

    #[test]
    fn potion_without_stock_is_noop() {
        let mut game = game(&[40]);
        game.use_potion();
        game.take_damage(50);
        let before = game.snapshot();

        assert_eq!(PotionUse::NONE, game.use_potion());
        assert_eq!(before, game.snapshot());
        assert_eq!(1, game.rng().draws());
    }

    #[test]
    fn eastern_trap_deals_damage() {
        let mut game = game(&[50, 20]);
        assert_eq!(
            Some(EasternPath::Trap { damage: 20 }),
            game.enter_eastern_path()
        );
        assert_eq!(80, game.health());
    }

    #[test]
    fn eastern_safe_roll_can_find_key() {
        let mut game = game(&[40, 1]);
        assert_eq!(Some(EasternPath::SafeKeyFound), game.enter_eastern_path());
        assert!(game.inventory().has(Item::Key));
    }

    #[test]
    fn eastern_safe_roll_without_key() {
        let mut game = game(&[40, 2]);
        assert_eq!(Some(EasternPath::Safe), game.enter_eastern_path());
        assert!(!game.inventory().has(Item::Key));
    }

    #[test]
    fn eastern_path_skips_key_roll_when_holding_key() {
        let mut game = game(&[40, 1, 30]);
        game.enter_eastern_path();
        assert_eq!(Some(EasternPath::Safe), game.enter_eastern_path());
        assert_eq!(3, game.rng().draws());
        assert_eq!(1, game.inventory().count(Item::Key));
    }

    #[test]
    fn cave_needs_key() {
        let mut game = game(&[]);
        assert_eq!(Some(CaveSearch::NoKey), game.investigate_cave());
    }

    #[test]
    fn cave_refills_missing_potion() {
        // safe path, key found, potion heal roll
        let mut game = game(&[1, 1, 30]);
        game.enter_eastern_path();
        game.use_potion();
        assert_eq!(Some(CaveSearch::ChestPotion), game.investigate_cave());
        assert_eq!(1, game.inventory().count(Item::Potion));
        assert_eq!(Some(CaveSearch::ChestEmpty), game.investigate_cave());
        assert_eq!(1, game.inventory().count(Item::Potion));
    }

    #[test]
    fn stream_heals_up_to_max() {
        let mut game = game(&[10]);
        game.take_damage(5);
        assert_eq!(Some(10), game.drink_from_stream());
        assert_eq!(100, game.health());
    }

    #[test]
    fn stream_crossing_rolls_even_with_key() {
        let mut game = game(&[1, 1]);
        assert_eq!(Some(true), game.cross_stream());
        assert_eq!(Some(false), game.cross_stream());
        assert_eq!(2, game.rng().draws());
        assert_eq!(1, game.inventory().count(Item::Key));
    }

    #[test]
    fn guardian_falls_to_a_finishing_blow() {
        let mut game = game(&[25, 25]);
        game.attack_guardian();
        let exchange = game.attack_guardian().unwrap();

        assert!(exchange.guardian_defeated);
        assert_eq!(25, exchange.dealt);
        assert_eq!(0, exchange.taken);
        assert_eq!(0, game.guardian_health());
        assert_eq!(Outcome::Victory, game.outcome());
        assert_eq!(None, game.attack_guardian());
    }

    #[test]
    fn guardian_retaliates() {
        let mut game = game(&[10, 15]);
        let exchange = game.attack_guardian().unwrap();

        assert_eq!(
            Exchange {
                dealt: 10,
                taken: 15,
                guardian_defeated: false,
                player_alive: true,
                health: 85,
            },
            exchange
        );
        assert_eq!(40, game.guardian_health());
    }

    #[test]
    fn sneak_success_and_failure() {
        let mut lucky = game(&[71]);
        assert_eq!(Some(Sneak::Escaped), lucky.attempt_sneak());
        assert_eq!(Outcome::Victory, lucky.outcome());

        let mut spotted = game(&[70, 25]);
        assert_eq!(Some(Sneak::Spotted { damage: 25 }), spotted.attempt_sneak());
        assert_eq!(75, spotted.health());
        assert_eq!(Outcome::InProgress, spotted.outcome());
    }

    #[test]
    fn hesitation_costs_health() {
        let mut game = game(&[12]);
        assert_eq!(Some(12), game.hesitate());
        assert_eq!(88, game.health());
    }

    #[test]
    fn defeated_player_cannot_act() {
        let mut game = game(&[40]);
        game.take_damage(100);
        let before = game.snapshot();

        assert_eq!(PotionUse::NONE, game.use_potion());
        assert_eq!(0, game.heal(50));
        assert_eq!(None, game.enter_eastern_path());
        assert_eq!(None, game.investigate_cave());
        assert_eq!(None, game.drink_from_stream());
        assert_eq!(None, game.cross_stream());
        assert_eq!(None, game.attack_guardian());
        assert_eq!(None, game.attempt_sneak());
        assert_eq!(None, game.hesitate());

        assert_eq!(before, game.snapshot());
        assert_eq!(0, game.rng().draws());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut game = game(&[1, 1, 10, 15]);
        game.set_player_name("Test");
        game.enter_eastern_path();
        game.attack_guardian();
        game.take_damage(100);

        game.reset();

        assert_eq!(100, game.health());
        assert_eq!("", game.player().name());
        assert!(!game.inventory().has(Item::Key));
        assert_eq!(1, game.inventory().count(Item::Potion));
        assert_eq!(50, game.guardian_health());
        assert!(!game.chamber_cleared());
        assert_eq!(Outcome::InProgress, game.outcome());
    }

    #[test]
    fn inverted_span_is_rejected_at_construction() {
        let tuning = Tuning {
            potion_heal: Span::new(40, 20),
            ..Tuning::default()
        };
        let err = GameState::with_tuning(Pacing::instant(), SimulationRng::new(1), tuning)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvertedSpan {
                name: "potion_heal",
                ..
            }
        ));
    }

    #[test]
    fn zero_key_odds_and_health_are_rejected_at_construction() {
        for tuning in [
            Tuning {
                west_key_odds: 0,
                ..Tuning::default()
            },
            Tuning {
                max_health: 0,
                ..Tuning::default()
            },
        ] {
            let built = GameState::with_tuning(Pacing::instant(), SimulationRng::new(1), tuning);
            assert!(matches!(built, Err(TuningError::Zero { .. })));
        }
    }

    #[test]
    fn custom_tuning_changes_limits() {
        let tuning = Tuning {
            max_health: 60,
            starting_potions: 2,
            ..Tuning::default()
        };
        let mut game =
            GameState::with_tuning(Pacing::instant(), SequenceRng::new([35]), tuning).unwrap();
        game.take_damage(10);
        game.use_potion();
        assert_eq!(60, game.health());
        assert_eq!(1, game.inventory().count(Item::Potion));
    }
}
