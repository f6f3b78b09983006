//! Payoff matrix for the Prisoner's Dilemma
//!
//! ```text
//!             | Cooperate | Defect
//! ------------|-----------|--------
//! Cooperate   |    R, R   |  S, T
//! Defect      |    T, S   |  P, P
//! ```
//!
//! With R = 3, S = 0, T = 5, P = 1.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::strategy::Move;

/// Classification of a round's outcome from one player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoffType {
    /// Reward: both cooperate.
    R,
    /// Sucker: cooperate against a defection.
    S,
    /// Temptation: defect against a cooperation.
    T,
    /// Punishment: both defect.
    P,
}

impl PayoffType {
    pub fn score(self) -> u32 {
        match self {
            PayoffType::R => 3,
            PayoffType::S => 0,
            PayoffType::T => 5,
            PayoffType::P => 1,
        }
    }

    /// Mutual outcomes (R, P) as opposed to asymmetric ones (S, T).
    pub fn is_mutual(self) -> bool {
        matches!(self, PayoffType::R | PayoffType::P)
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PayoffType::R => 'R',
            PayoffType::S => 'S',
            PayoffType::T => 'T',
            PayoffType::P => 'P',
        };
        write!(f, "{}", c)
    }
}

pub fn payoff_type(own: Move, opponent: Move) -> PayoffType {
    match (own, opponent) {
        (Move::Cooperate, Move::Cooperate) => PayoffType::R,
        (Move::Cooperate, Move::Defect) => PayoffType::S,
        (Move::Defect, Move::Cooperate) => PayoffType::T,
        (Move::Defect, Move::Defect) => PayoffType::P,
    }
}

/// Points earned by `own` against `opponent`.
pub fn score(own: Move, opponent: Move) -> u32 {
    payoff_type(own, opponent).score()
}

/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u32, u32) {
    (score(a, b), score(b, a))
}

/// Score a pair of encoded actions such as `"Cooperate"` or `"D"`.
pub fn score_encoded(own: &str, opponent: &str) -> Result<u32, PayoffError> {
    let own: Move = own.parse()?;
    let opponent: Move = opponent.parse()?;
    Ok(score(own, opponent))
}

/// Decode a transcript of single-letter moves (`"CCDC"`).
pub fn parse_transcript(transcript: &str) -> Result<Vec<Move>, PayoffError> {
    transcript
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Move::try_from)
        .collect()
}

/// Total both sides of a recorded transcript.
pub fn score_transcript(a: &str, b: &str) -> Result<(u32, u32), PayoffError> {
    let moves_a = parse_transcript(a)?;
    let moves_b = parse_transcript(b)?;
    if moves_a.len() != moves_b.len() {
        return Err(PayoffError::LengthMismatch {
            left: moves_a.len(),
            right: moves_b.len(),
        });
    }
    Ok(moves_a
        .iter()
        .zip(&moves_b)
        .fold((0, 0), |(ta, tb), (&ma, &mb)| {
            let (sa, sb) = payoff(ma, mb);
            (ta + sa, tb + sb)
        }))
}
