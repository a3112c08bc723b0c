mod narrator;
mod transcript;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use eldoria_core::{GameState, Pacing, SimulationRng, Tuning};
use narrator::Narrator;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transcript::Transcript;

const SEED_ENV: &str = "ELDORIA_SEED";

#[derive(Parser, Debug)]
#[command(version, about = "Retrieve the Lost Scroll of Eldoria from the Whispering Ruins")]
struct Cli {
    /// Seconds to pause between story beats. Zero plays without pauses.
    #[arg(long, default_value_t = 0.8)]
    delay: f64,
    /// Seed for the dice. Falls back to $ELDORIA_SEED, then to a random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding health, damage and healing ranges.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Write a JSON record of the playthrough here when it ends.
    #[arg(long)]
    transcript: Option<PathBuf>,
}

impl Cli {
    fn rng(&self) -> SimulationRng {
        self.seed
            .or_else(seed_from_env)
            .map(SimulationRng::new)
            .unwrap_or_else(SimulationRng::from_entropy)
    }

    fn tuning(&self) -> Result<Tuning> {
        match &self.tuning {
            Some(path) => Tuning::from_path(path)
                .with_context(|| format!("failed to load tuning from {}", path.display())),
            None => Ok(Tuning::default()),
        }
    }
}

fn seed_from_env() -> Option<u64> {
    std::env::var(SEED_ENV).ok().and_then(|val| val.parse().ok())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let tuning = cli.tuning()?;
    let rng = cli.rng();
    let seed = rng.seed();
    info!(target: "eldoria_cli", seed, delay = cli.delay, "starting playthrough");

    let mut game = GameState::with_tuning(Pacing::from_secs_f64(cli.delay), rng, tuning)
        .context("invalid tuning")?;
    let started_at = Utc::now().to_rfc3339();
    let stdin = io::stdin();
    let narration = Narrator::new(&mut game, stdin.lock(), io::stdout().lock()).run()?;
    info!(target: "eldoria_cli", ending = ?narration.ending, health = game.health(), "playthrough finished");

    if let Some(path) = cli.transcript.as_deref() {
        let transcript = Transcript::new(
            started_at,
            seed,
            game.player().name(),
            narration.ending,
            game.health(),
            narration.events,
        );
        write_transcript(path, &transcript)?;
    }
    Ok(())
}

fn write_transcript(path: &Path, transcript: &Transcript) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(transcript)?)
        .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    info!(target: "eldoria_cli", path = %path.display(), "transcript written");
    Ok(())
}
