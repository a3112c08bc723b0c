//! Numeric design constants, optionally loaded from a TOML file.
//!
//! ```toml
//! max_health = 120
//! potion_heal = { min = 25, max = 45 }
//! sneak_threshold = 60
//! ```
//!
//! Keys left out keep their default value.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rolls for path events and sneaking are drawn from `1..=PERCENT`.
pub const PERCENT: u32 = 100;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning TOML")]
    Parse(#[from] toml::de::Error),
    #[error("span `{name}` has min {min} above max {max}")]
    InvertedSpan { name: &'static str, min: u32, max: u32 },
    #[error("`{name}` must be greater than zero")]
    Zero { name: &'static str },
    #[error("threshold `{name}` is {value}, expected below 100")]
    Threshold { name: &'static str, value: u32 },
}

/// Closed range of a roll, written as `{ min = .., max = .. }` in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    fn check(&self, name: &'static str) -> Result<(), TuningError> {
        if self.min > self.max {
            return Err(TuningError::InvertedSpan {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub max_health: u32,
    pub starting_potions: u32,
    pub guardian_health: u32,
    pub potion_heal: Span,
    pub stream_heal: Span,
    /// Eastern path rolls above this spring a trap.
    pub trap_threshold: u32,
    pub trap_damage: Span,
    /// A key turns up on the eastern path when a `1..=east_key_odds` roll is 1.
    pub east_key_odds: u32,
    pub west_key_odds: u32,
    pub player_attack: Span,
    pub guardian_attack: Span,
    /// Sneak rolls above this get past the guardian.
    pub sneak_threshold: u32,
    pub sneak_damage: Span,
    pub hesitation_damage: Span,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            starting_potions: 1,
            guardian_health: 50,
            potion_heal: Span::new(20, 40),
            stream_heal: Span::new(5, 15),
            trap_threshold: 40,
            trap_damage: Span::new(15, 30),
            east_key_odds: 3,
            west_key_odds: 4,
            player_attack: Span::new(10, 25),
            guardian_attack: Span::new(10, 20),
            sneak_threshold: 70,
            sneak_damage: Span::new(20, 35),
            hesitation_damage: Span::new(5, 15),
        }
    }
}

impl Tuning {
    pub fn from_path(path: &Path) -> Result<Self, TuningError> {
        let data = fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Parses and validates a tuning document.
    pub fn from_toml_str(data: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = toml::from_str(data)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, value) in [
            ("max_health", self.max_health),
            ("guardian_health", self.guardian_health),
            ("east_key_odds", self.east_key_odds),
            ("west_key_odds", self.west_key_odds),
        ] {
            if value == 0 {
                return Err(TuningError::Zero { name });
            }
        }

        for (name, value) in [
            ("trap_threshold", self.trap_threshold),
            ("sneak_threshold", self.sneak_threshold),
        ] {
            if value >= PERCENT {
                return Err(TuningError::Threshold { name, value });
            }
        }

        for (name, span) in [
            ("potion_heal", &self.potion_heal),
            ("stream_heal", &self.stream_heal),
            ("trap_damage", &self.trap_damage),
            ("player_attack", &self.player_attack),
            ("guardian_attack", &self.guardian_attack),
            ("sneak_damage", &self.sneak_damage),
            ("hesitation_damage", &self.hesitation_damage),
        ] {
            span.check(name)?;
        }
        Ok(())
    }
}
