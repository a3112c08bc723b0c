use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use eldoria_core::{CaveSearch, EasternPath, GameState, Item, Outcome, RandomSource, Sneak};
use tracing::debug;

use crate::transcript::{Ending, Event};

const RULE: &str = "--------------------------------------------------";

pub struct Narration {
    pub ending: Ending,
    pub events: Vec<Event>,
}

/// Tells the story one beat at a time, reading choices from `input` and
/// writing everything the player sees to `output`.
pub struct Narrator<'g, R, I, W> {
    game: &'g mut GameState<R>,
    input: I,
    output: W,
    events: Vec<Event>,
}

impl<'g, R, I, W> Narrator<'g, R, I, W>
where
    R: RandomSource,
    I: BufRead,
    W: Write,
{
    pub fn new(game: &'g mut GameState<R>, input: I, output: W) -> Self {
        Self {
            game,
            input,
            output,
            events: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<Narration> {
        let ending = self.play()?;
        self.say("\nThanks for playing!")?;
        self.output.flush().context("failed to flush output")?;
        debug!(target: "eldoria_cli.narrator", ?ending, beats = self.events.len(), "playthrough over");
        Ok(Narration {
            ending,
            events: self.events,
        })
    }

    fn play(&mut self) -> Result<Ending> {
        self.say("Welcome, brave adventurer, to the Lost Scroll of Eldoria!")?;
        self.say(
            "Your quest is to retrieve the ancient scroll hidden deep within the Whispering Ruins.",
        )?;
        let Some(name) = self.prompt("First, tell us your name: ")? else {
            return Ok(Ending::Abandoned);
        };
        self.game.set_player_name(name);
        let greeting = format!(
            "\nGreetings, {}. May your courage guide you!\n",
            self.game.player().name()
        );
        self.say(&greeting)?;
        self.pause();

        while self.game.outcome() == Outcome::InProgress {
            self.show_status()?;

            self.say("\nYou stand at the entrance of the Whispering Ruins. Two paths diverge.")?;
            self.say("1. Enter the overgrown Eastern Path (might be dangerous but shorter).")?;
            self.say("2. Take the winding Western Path (longer but potentially safer).")?;
            let Some(choice) = self.prompt("What do you do? (1 or 2): ")? else {
                return Ok(Ending::Abandoned);
            };

            let reached_chamber = match choice.as_str() {
                "1" => self.eastern_path()?,
                "2" => self.western_path()?,
                _ => {
                    self.say("Invalid choice. You stand confused for a moment, losing precious time.")?;
                    self.record(Event::Confused);
                    self.pause();
                    continue;
                }
            };
            match reached_chamber {
                Some(true) => {}
                Some(false) => break,
                None => return Ok(Ending::Abandoned),
            }

            if !self.guardian_chamber()? {
                return Ok(Ending::Abandoned);
            }
        }

        self.conclude()
    }

    fn show_status(&mut self) -> Result<()> {
        self.say(RULE)?;
        let health = format!("Current Health: {} HP", self.game.health());
        self.say(&health)?;
        if self.game.inventory().has(Item::Potion) {
            let held = format!("You have a {}.", Item::Potion);
            self.say(&held)?;
        } else {
            self.say("You have no healing potions left.")?;
        }
        self.say(RULE)?;
        self.pause();
        Ok(())
    }

    /// `Some(true)` when the player walks on to the chamber, `Some(false)` when
    /// the path killed them, `None` when input ran out.
    fn eastern_path(&mut self) -> Result<Option<bool>> {
        self.say("\nYou venture into the Eastern Path. Thorns scratch at your armor, and strange whispers echo.")?;
        self.game.pacing().pause_scaled(2);

        let Some(result) = self.game.enter_eastern_path() else {
            return Ok(Some(false));
        };
        self.record(Event::EasternPath { result });
        match result {
            EasternPath::Trap { damage } => {
                self.say("Suddenly, a tripwire snags your leg! It's a hidden trap!")?;
                let hurt = format!(
                    "You take {damage} damage. Current HP: {}.",
                    self.game.health()
                );
                self.say(&hurt)?;
                if !self.game.is_alive() {
                    return Ok(Some(false));
                }
                self.pause();
                self.say("You managed to disarm the trap, but it cost you.")?;
            }
            EasternPath::SafeKeyFound => {
                self.say("You carefully navigate the path, avoiding any traps. Good job!")?;
                let found = format!(
                    "You notice a glinting object hidden in the foliage. It's a {}!",
                    Item::Key
                );
                self.say(&found)?;
                self.pause();
            }
            EasternPath::Safe => {
                self.say("You carefully navigate the path, avoiding any traps. Good job!")?;
            }
        }

        self.say("\nFurther down the path, you see a flickering light from a small cave.")?;
        self.say("1. Investigate the cave.")?;
        self.say("2. Continue on the main path.")?;
        let Some(choice) = self.prompt("What do you do? (1 or 2): ")? else {
            return Ok(None);
        };
        if choice != "1" {
            self.say("You decide to stick to the main path, wary of hidden dangers.")?;
            return Ok(Some(true));
        }

        self.say("\nYou cautiously approach the cave. Inside, you find a chest!")?;
        self.pause();
        if let Some(result) = self.game.investigate_cave() {
            self.record(Event::Cave { result });
            match result {
                CaveSearch::NoKey => self.say("The chest is locked. You need a key.")?,
                CaveSearch::ChestPotion => {
                    self.say("You use the rusty key and open the chest!")?;
                    self.say("Inside, you find a shimmering healing potion!")?;
                }
                CaveSearch::ChestEmpty => {
                    self.say("You use the rusty key and open the chest!")?;
                    self.say("The chest is empty except for some ancient dust.")?;
                }
            }
        }
        Ok(Some(true))
    }

    fn western_path(&mut self) -> Result<Option<bool>> {
        self.say("\nYou choose the winding Western Path. It's quieter here, but the journey feels longer.")?;
        self.game.pacing().pause_scaled(2);
        self.say("After a while, you come across a peaceful stream.")?;
        self.say("1. Drink from the stream (might restore some health).")?;
        self.say("2. Cross the stream and continue.")?;
        let Some(choice) = self.prompt("What do you do? (1 or 2): ")? else {
            return Ok(None);
        };

        if choice == "1" {
            self.say("\nYou cup your hands and drink the cool, refreshing water.")?;
            if let Some(healed) = self.game.drink_from_stream() {
                self.record(Event::Stream { healed });
                let restored = format!(
                    "You restore {healed} HP. Current HP: {}.",
                    self.game.health()
                );
                self.say(&restored)?;
            }
        } else {
            self.say("You quickly cross the stream, eager to continue your journey.")?;
        }

        if let Some(key_found) = self.game.cross_stream() {
            self.record(Event::Crossing { key_found });
            if key_found {
                self.say("While crossing, your foot nudges a loose stone, revealing a hidden compartment. You find a shiny silver key!")?;
                self.pause();
            }
        }
        Ok(Some(true))
    }

    /// Runs the battle until it is decided. Returns `false` when input ran out.
    fn guardian_chamber(&mut self) -> Result<bool> {
        self.say("\nRegardless of your path, you now stand before the Guardian's Chamber.")?;
        self.say("A gargoyle-like creature awakens, blocking your way to the inner sanctum!")?;
        let guardian = format!("Guardian HP: {}", self.game.guardian_health());
        self.say(&guardian)?;

        while self.game.outcome() == Outcome::InProgress {
            let standing = format!(
                "\nYour HP: {} | Guardian HP: {} (approx.)",
                self.game.health(),
                self.game.guardian_health()
            );
            self.say(&standing)?;
            self.say("1. Attack the Guardian.")?;
            self.say("2. Try to sneak past.")?;
            let has_potion = self.game.inventory().has(Item::Potion);
            if has_potion {
                self.say("3. Use a healing potion.")?;
            }
            let Some(choice) = self.prompt("What do you do? (1, 2, or 3 if available): ")? else {
                return Ok(false);
            };

            match choice.as_str() {
                "1" => self.attack()?,
                "2" => self.sneak()?,
                "3" if has_potion => self.drink_potion()?,
                "3" => self.say("You try to use a potion, but you don't have any left!")?,
                _ => self.hesitate()?,
            }

            if !self.game.is_alive() {
                self.say("\nYour vision blurs, and you collapse. The quest ends here.")?;
            }
        }
        Ok(true)
    }

    fn attack(&mut self) -> Result<()> {
        let Some(exchange) = self.game.attack_guardian() else {
            return Ok(());
        };
        self.record(Event::Attack { exchange });
        let strike = format!("You strike the Guardian for {} damage!", exchange.dealt);
        self.say(&strike)?;
        if exchange.guardian_defeated {
            self.say("The Guardian crumbles to dust! You defeated it!")?;
            return Ok(());
        }
        self.say("The Guardian growls, still standing!")?;
        let retaliation = format!(
            "The Guardian retaliates, hitting you for {} damage!",
            exchange.taken
        );
        self.say(&retaliation)?;
        self.pause();
        Ok(())
    }

    fn sneak(&mut self) -> Result<()> {
        self.say("You attempt to sneak past the enraged Guardian...")?;
        self.pause();
        let Some(result) = self.game.attempt_sneak() else {
            return Ok(());
        };
        self.record(Event::Sneak { result });
        match result {
            Sneak::Escaped => self.say("You successfully slip past the Guardian!")?,
            Sneak::Spotted { damage } => {
                self.say("The Guardian spots you and unleashes a furious roar!")?;
                let hurt = format!(
                    "You take {damage} damage. Current HP: {}!",
                    self.game.health()
                );
                self.say(&hurt)?;
                self.pause();
            }
        }
        Ok(())
    }

    fn drink_potion(&mut self) -> Result<()> {
        self.say("You quickly drink your healing potion!")?;
        let potion = self.game.use_potion();
        self.record(Event::Potion { potion });
        let recovered = format!(
            "You recover {} HP. Current HP: {}.",
            potion.healed,
            self.game.health()
        );
        self.say(&recovered)?;
        self.pause();
        Ok(())
    }

    fn hesitate(&mut self) -> Result<()> {
        self.say("Invalid battle choice. You hesitate, losing your advantage!")?;
        let Some(damage) = self.game.hesitate() else {
            return Ok(());
        };
        self.record(Event::Hesitation { damage });
        let hit = format!("The Guardian takes advantage, hitting you for {damage} damage!");
        self.say(&hit)?;
        self.pause();
        Ok(())
    }

    fn conclude(&mut self) -> Result<Ending> {
        match self.game.outcome() {
            Outcome::Victory => {
                self.say("\nWith the Guardian defeated (or bypassed), you enter the inner sanctum.")?;
                self.say("There, resting on a pedestal, is the glowing Lost Scroll of Eldoria!")?;
                let congrats = format!(
                    "Congratulations, {}! You have completed your adventure and claimed the scroll!",
                    self.game.player().name()
                );
                self.say(&congrats)?;
                Ok(Ending::Victory)
            }
            Outcome::Defeat => {
                self.say("\nGAME OVER.")?;
                self.say("Your adventure in the Whispering Ruins has come to an end.")?;
                Ok(Ending::Defeat)
            }
            Outcome::InProgress => Ok(Ending::Abandoned),
        }
    }

    fn record(&mut self, event: Event) {
        debug!(target: "eldoria_cli.narrator", ?event, "beat resolved");
        self.events.push(event);
    }

    fn pause(&self) {
        self.game.pacing().pause();
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write story text")
    }

    /// Reads one trimmed line. `None` means the input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read player input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}
