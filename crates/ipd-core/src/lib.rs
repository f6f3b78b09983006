//! Iterated Prisoner's Dilemma core
//!
//! Strategies, the match engine and the tournament scheduler.
//! This crate is compiled to:
//! - Native (for the `ipd-tournament` CLI)
//! - WASM (for frontend match replay, feature `wasm`)

mod config;
mod error;
mod game;
mod history;
mod noise;
mod pairing;
mod player;
mod random;
mod scoreboard;
mod strategy;
mod tournament;

pub mod payoff;
pub mod stats;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{TournamentConfig, DEFAULT_GAMES_PER_MATCH};
pub use error::{ConfigError, MatchError, PayoffError, StrategyError};
pub use game::{
    replay_transcript, run_match, Match, MatchOutcome, MatchResult, MatchState, RoundResult,
    Scripted,
};
pub use history::History;
pub use noise::{apply_noise, NoiseConfig, DEFAULT_FLIP_PROBABILITY};
pub use pairing::{calculate_match_count, generate_all_pairings, get_pairing_for_match, ScheduleMode};
pub use payoff::{payoff, payoff_type, score, score_transcript, PayoffType};
pub use player::{Player, Strategy};
pub use random::SeededRng;
pub use scoreboard::{ScoreEntry, Scoreboard};
pub use strategy::{Move, Roster, StrategyKind};
pub use tournament::Tournament;
