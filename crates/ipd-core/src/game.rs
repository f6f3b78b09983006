//! Match execution engine

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, PayoffError};
use crate::history::History;
use crate::noise::NoiseConfig;
use crate::payoff::{parse_transcript, payoff};
use crate::player::{Player, Strategy};
use crate::random::SeededRng;
use crate::strategy::{Move, StrategyKind};

/// Result of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    /// Moves the strategies chose, before noise.
    pub intended_a: Move,
    pub intended_b: Move,
    /// Moves actually scored and recorded.
    pub move_a: Move,
    pub move_b: Move,
    pub flipped_a: bool,
    pub flipped_b: bool,
    pub score_a: u32,
    pub score_b: u32,
    pub cumulative_a: u64,
    pub cumulative_b: u64,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name_a: String,
    pub name_b: String,
    pub rounds: Vec<RoundResult>,
    pub total_score_a: u64,
    pub total_score_b: u64,
    pub round_count: u32,
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    NotStarted,
    /// `round` rounds have been played so far.
    InProgress { round: u32 },
    Completed,
}

/// Both players, histories intact, plus the scored result.
#[derive(Clone, Debug)]
pub struct MatchOutcome<S: Strategy = Player> {
    pub player_a: S,
    pub player_b: S,
    pub result: MatchResult,
}

/// One pairing played for a fixed number of rounds.
pub struct Match<S: Strategy = Player> {
    player_a: S,
    player_b: S,
    games: u32,
    noise: NoiseConfig,
    noise_rng: SeededRng,
    state: MatchState,
    rounds: Vec<RoundResult>,
    total_a: u64,
    total_b: u64,
}

impl<S: Strategy> Match<S> {
    /// A non-positive `games` yields a match that completes with zero scores.
    pub fn new(player_a: S, player_b: S, games: i64, noise: NoiseConfig, noise_rng: SeededRng) -> Self {
        let games = u32::try_from(games.max(0)).unwrap_or(u32::MAX);
        Self {
            player_a,
            player_b,
            games,
            noise,
            noise_rng,
            state: MatchState::NotStarted,
            rounds: Vec::with_capacity(games.min(4096) as usize),
            total_a: 0,
            total_b: 0,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn player_a(&self) -> &S {
        &self.player_a
    }

    pub fn player_b(&self) -> &S {
        &self.player_b
    }

    /// Play one round. Returns `None` once the match is complete.
    pub fn step(&mut self) -> Option<RoundResult> {
        let round = match self.state {
            MatchState::Completed => return None,
            MatchState::NotStarted => 0,
            MatchState::InProgress { round } => round,
        };
        if round >= self.games {
            self.state = MatchState::Completed;
            return None;
        }

        // Read, perturb, score, record, then decide.
        let intended_a = self.player_a.current_move();
        let intended_b = self.player_b.current_move();
        let move_a = self.noise.perturb(intended_a, &mut self.noise_rng);
        let move_b = self.noise.perturb(intended_b, &mut self.noise_rng);

        let (score_a, score_b) = payoff(move_a, move_b);
        self.total_a += u64::from(score_a);
        self.total_b += u64::from(score_b);

        self.player_a.record_outcome(move_a, move_b);
        self.player_b.record_outcome(move_b, move_a);
        self.player_a.decide_next_move();
        self.player_b.decide_next_move();

        let result = RoundResult {
            round,
            intended_a,
            intended_b,
            move_a,
            move_b,
            flipped_a: move_a != intended_a,
            flipped_b: move_b != intended_b,
            score_a,
            score_b,
            cumulative_a: self.total_a,
            cumulative_b: self.total_b,
        };
        trace!(
            "round {}: {} {} -> {}/{}",
            round,
            move_a,
            move_b,
            score_a,
            score_b
        );
        self.rounds.push(result);

        self.state = if round + 1 >= self.games {
            MatchState::Completed
        } else {
            MatchState::InProgress { round: round + 1 }
        };
        Some(result)
    }

    /// Play every remaining round and hand back both players.
    pub fn run(mut self) -> MatchOutcome<S> {
        while self.step().is_some() {}

        let result = MatchResult {
            name_a: self.player_a.name().to_string(),
            name_b: self.player_b.name().to_string(),
            round_count: self.rounds.len() as u32,
            rounds: self.rounds,
            total_score_a: self.total_a,
            total_score_b: self.total_b,
        };
        debug!(
            "{} vs {}: {}-{} over {} rounds",
            result.name_a, result.name_b, result.total_score_a, result.total_score_b, result.round_count
        );

        MatchOutcome {
            player_a: self.player_a,
            player_b: self.player_b,
            result,
        }
    }
}

/// Run a complete match between two strategies
///
/// # Arguments
/// * `kind_a` - First player's strategy
/// * `kind_b` - Second player's strategy
/// * `games` - Rounds to play; non-positive plays none
/// * `noise` - Noise settings applied to both players
/// * `seed` - Tournament randomness seed
/// * `match_index` - Index of this match in the tournament
///
/// Each player and the noise injector draw from their own stream, so the
/// result depends only on `(seed, match_index)`.
pub fn run_match(
    kind_a: StrategyKind,
    kind_b: StrategyKind,
    games: i64,
    noise: NoiseConfig,
    seed: u64,
    match_index: u32,
) -> MatchOutcome<Player> {
    let rng = SeededRng::new(seed, match_index);
    let player_a = Player::new(kind_a, rng.fork(0));
    let player_b = Player::new(kind_b, rng.fork(1));
    Match::new(player_a, player_b, games, noise, rng.fork(2)).run()
}

/// Plays back a recorded move sequence.
#[derive(Clone, Debug)]
pub struct Scripted {
    name: String,
    moves: Vec<Move>,
    current: Move,
    history: History,
}

impl Scripted {
    pub fn new(name: impl Into<String>, moves: Vec<Move>) -> Self {
        let current = moves.first().copied().unwrap_or(Move::Cooperate);
        Self {
            name: name.into(),
            current,
            history: History::with_capacity(moves.len()),
            moves,
        }
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn current_move(&self) -> Move {
        self.current
    }

    fn history(&self) -> &History {
        &self.history
    }

    fn record_outcome(&mut self, own: Move, opponent: Move) {
        self.history.record(own, opponent);
    }

    fn decide_next_move(&mut self) -> Move {
        if let Some(&next) = self.moves.get(self.history.len()) {
            self.current = next;
        }
        self.current
    }
}

/// Score a recorded pair of C/D transcripts through the match engine.
pub fn replay_transcript(a: &str, b: &str) -> Result<MatchResult, MatchError> {
    let moves_a = parse_transcript(a)?;
    let moves_b = parse_transcript(b)?;
    if moves_a.len() != moves_b.len() {
        return Err(PayoffError::LengthMismatch {
            left: moves_a.len(),
            right: moves_b.len(),
        }
        .into());
    }

    let games = moves_a.len() as i64;
    let outcome = Match::new(
        Scripted::new("A", moves_a),
        Scripted::new("B", moves_b),
        games,
        NoiseConfig::off(),
        SeededRng::new(0, 0),
    )
    .run();
    Ok(outcome.result)
}
