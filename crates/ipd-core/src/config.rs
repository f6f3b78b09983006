//! Tournament configuration, loadable from TOML
//!
//! ```toml
//! strategies = ["TitForTat", "AlwaysDefect", "Grudger"]
//! games_per_match = 200
//! noise = true
//! flip_probability = 0.01
//! seed = 42
//! mode = "round-robin"
//! ```

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::noise::{NoiseConfig, DEFAULT_FLIP_PROBABILITY};
use crate::pairing::ScheduleMode;
use crate::strategy::{Roster, StrategyKind};
use crate::tournament::Tournament;

pub const DEFAULT_GAMES_PER_MATCH: i64 = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentConfig {
    /// Explicit roster, in enumeration order. Takes precedence over `roster`.
    pub strategies: Vec<StrategyKind>,
    /// Named preset used when `strategies` is empty.
    pub roster: Option<Roster>,
    pub games_per_match: i64,
    pub noise: bool,
    pub flip_probability: f64,
    pub seed: Option<u64>,
    pub mode: ScheduleMode,
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
            roster: None,
            games_per_match: DEFAULT_GAMES_PER_MATCH,
            noise: false,
            flip_probability: DEFAULT_FLIP_PROBABILITY,
            seed: None,
            mode: ScheduleMode::Full,
            parallel: false,
        }
    }
}

impl TournamentConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: TournamentConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// The roster matches will be played with.
    pub fn resolved_roster(&self) -> Vec<StrategyKind> {
        if !self.strategies.is_empty() {
            return self.strategies.clone();
        }
        self.roster.map(Roster::strategies).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolved_roster().is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if !(0.0..=1.0).contains(&self.flip_probability) {
            return Err(ConfigError::FlipProbability(self.flip_probability));
        }
        Ok(())
    }

    pub fn noise_config(&self) -> NoiseConfig {
        NoiseConfig {
            enabled: self.noise,
            flip_probability: self.flip_probability,
        }
    }

    /// Build the tournament. `seed` is used when the config carries none.
    pub fn tournament(&self, fallback_seed: u64) -> Result<Tournament, ConfigError> {
        self.validate()?;
        let games = if self.games_per_match < 0 {
            warn!("games_per_match {} is negative, playing 0 rounds", self.games_per_match);
            0
        } else {
            self.games_per_match
        };
        Ok(
            Tournament::new(self.resolved_roster(), games, self.noise_config())
                .with_seed(self.seed.unwrap_or(fallback_seed)),
        )
    }
}
