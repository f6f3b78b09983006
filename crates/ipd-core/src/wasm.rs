//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::config::TournamentConfig;
use crate::game::{replay_transcript, run_match};
use crate::noise::NoiseConfig;
use crate::pairing::{calculate_match_count, generate_all_pairings, ScheduleMode};
use crate::strategy::StrategyKind;

fn parse_kind(name: &str) -> Result<StrategyKind, JsError> {
    name.parse::<StrategyKind>()
        .map_err(|e| JsError::new(&e.to_string()))
}

fn parse_mode(mode: &str) -> Result<ScheduleMode, JsError> {
    mode.parse::<ScheduleMode>()
        .map_err(|e| JsError::new(&e.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Replay a match with full round-by-round details
///
/// # Arguments
/// * `strategy_a` - Strategy name for player A (e.g. `"TitForTat"`)
/// * `strategy_b` - Strategy name for player B
/// * `games` - Rounds to play
/// * `noise` - Whether to flip moves at the default 1% rate
/// * `seed` - Tournament randomness seed
/// * `match_index` - Index of this match
///
/// # Returns
/// Serialized MatchResult
#[wasm_bindgen]
pub fn replay_match(
    strategy_a: &str,
    strategy_b: &str,
    games: i32,
    noise: bool,
    seed: u64,
    match_index: u32,
) -> Result<JsValue, JsError> {
    let kind_a = parse_kind(strategy_a)?;
    let kind_b = parse_kind(strategy_b)?;

    let outcome = run_match(
        kind_a,
        kind_b,
        i64::from(games),
        NoiseConfig::from_flag(noise),
        seed,
        match_index,
    );
    to_js(&outcome.result)
}

/// Run a tournament described by a JSON `TournamentConfig`
///
/// Returns the scoreboard sorted by descending score.
#[wasm_bindgen]
pub fn run_tournament(config_json: &str, seed: u64) -> Result<JsValue, JsError> {
    let config: TournamentConfig = serde_json::from_str(config_json)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    let tournament = config
        .tournament(seed)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let board = tournament.run(config.mode);
    to_js(&board.sorted())
}

/// Score two C/D transcripts. Returns `[score_a, score_b]`.
#[wasm_bindgen]
pub fn score_transcript(a: &str, b: &str) -> Result<JsValue, JsError> {
    let result = replay_transcript(a, b).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&[result.total_score_a, result.total_score_b])
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(name: &str) -> Result<String, JsError> {
    Ok(parse_kind(name)?.describe().to_string())
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: &'static str,
    description: &'static str,
    initial_move: String,
    stochastic: bool,
}

/// Get all available strategies in canonical order
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyKind::ALL
        .iter()
        .map(|kind| StrategyInfo {
            id: kind.name(),
            description: kind.describe(),
            initial_move: kind.initial_move().to_string(),
            stochastic: kind.is_stochastic(),
        })
        .collect();
    to_js(&types)
}

/// Get pairings for a tournament
#[wasm_bindgen]
pub fn get_tournament_pairings(participant_count: u32, mode: &str) -> Result<JsValue, JsError> {
    let pairings = generate_all_pairings(participant_count, parse_mode(mode)?);
    to_js(&pairings)
}

/// Get total match count for a tournament
#[wasm_bindgen]
pub fn get_match_count(participant_count: u32, mode: &str) -> Result<u32, JsError> {
    Ok(calculate_match_count(participant_count, parse_mode(mode)?))
}
