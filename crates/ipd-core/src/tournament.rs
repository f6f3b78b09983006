//! Tournament scheduler: expands a roster into matches and aggregates scores

use log::info;
use rayon::prelude::*;

use crate::game::{run_match, MatchResult};
use crate::noise::NoiseConfig;
use crate::pairing::{calculate_match_count, generate_all_pairings, ScheduleMode};
use crate::scoreboard::Scoreboard;
use crate::strategy::StrategyKind;

/// A roster plus the settings every match is played with.
#[derive(Clone, Debug, PartialEq)]
pub struct Tournament {
    roster: Vec<StrategyKind>,
    games_per_match: i64,
    noise: NoiseConfig,
    seed: u64,
}

impl Tournament {
    pub fn new(roster: Vec<StrategyKind>, games_per_match: i64, noise: NoiseConfig) -> Self {
        Self {
            roster,
            games_per_match,
            noise,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn roster(&self) -> &[StrategyKind] {
        &self.roster
    }

    pub fn games_per_match(&self) -> i64 {
        self.games_per_match
    }

    pub fn noise(&self) -> NoiseConfig {
        self.noise
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Every ordered pair, self-pairs included.
    pub fn run_tournament(&self) -> Scoreboard {
        self.run(ScheduleMode::Full)
    }

    /// Every unordered pair once, self-pairs included.
    pub fn round_robin(&self) -> Scoreboard {
        self.run(ScheduleMode::RoundRobin)
    }

    pub fn run(&self, mode: ScheduleMode) -> Scoreboard {
        self.log_start(mode, false);
        let mut board = self.empty_board();
        for (index, pair) in generate_all_pairings(self.roster.len() as u32, mode)
            .into_iter()
            .enumerate()
        {
            let result = self.play(index as u32, pair);
            credit(&mut board, &result);
        }
        self.log_finish(&board);
        board
    }

    /// Same schedule as [`Tournament::run`], played across rayon workers.
    ///
    /// Each worker accumulates into its own board; boards are merged at the
    /// end. Match `k` draws from the same streams as in a sequential run, so
    /// the scoreboard is identical.
    pub fn run_parallel(&self, mode: ScheduleMode) -> Scoreboard {
        self.log_start(mode, true);
        let pairings = generate_all_pairings(self.roster.len() as u32, mode);
        let board = pairings
            .into_par_iter()
            .enumerate()
            .fold(
                || self.empty_board(),
                |mut board, (index, pair)| {
                    let result = self.play(index as u32, pair);
                    credit(&mut board, &result);
                    board
                },
            )
            .reduce(
                || self.empty_board(),
                |mut left, right| {
                    left.merge(&right);
                    left
                },
            );
        self.log_finish(&board);
        board
    }

    /// Every match result in schedule order, for detailed reporting.
    pub fn match_results(&self, mode: ScheduleMode) -> Vec<MatchResult> {
        generate_all_pairings(self.roster.len() as u32, mode)
            .into_iter()
            .enumerate()
            .map(|(index, pair)| self.play(index as u32, pair))
            .collect()
    }

    /// Fresh players for every match.
    fn play(&self, match_index: u32, (a, b): (u32, u32)) -> MatchResult {
        run_match(
            self.roster[a as usize],
            self.roster[b as usize],
            self.games_per_match,
            self.noise,
            self.seed,
            match_index,
        )
        .result
    }

    fn empty_board(&self) -> Scoreboard {
        Scoreboard::with_names(self.roster.iter().map(|k| k.name()))
    }

    fn log_start(&self, mode: ScheduleMode, parallel: bool) {
        info!(
            "starting {} tournament: {} strategies, {} matches, {} games per match, noise {}{}",
            mode,
            self.roster.len(),
            calculate_match_count(self.roster.len() as u32, mode),
            self.games_per_match.max(0),
            if self.noise.enabled { "on" } else { "off" },
            if parallel { " (parallel)" } else { "" }
        );
    }

    fn log_finish(&self, board: &Scoreboard) {
        match board.sorted().first() {
            Some(leader) => info!("tournament finished: {} leads with {}", leader.name, leader.score),
            None => info!("tournament finished: empty roster"),
        }
    }
}

/// Add one match to the board. A strategy meeting itself is credited the
/// mean of both sides' scores instead of their sum.
fn credit(board: &mut Scoreboard, result: &MatchResult) {
    if result.name_a == result.name_b {
        board.add(result.name_a.as_str(), (result.total_score_a + result.total_score_b) / 2);
    } else {
        board.add(result.name_a.as_str(), result.total_score_a);
        board.add(result.name_b.as_str(), result.total_score_b);
    }
}
