//! Per-player move history

use serde::{Deserialize, Serialize};

use crate::strategy::Move;

/// Own and opponent moves, one entry per played round.
///
/// Both sequences always have the same length. Append-only: a fresh
/// `History` is built for every match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    own: Vec<Move>,
    opponent: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            own: Vec::with_capacity(rounds),
            opponent: Vec::with_capacity(rounds),
        }
    }

    /// Build a history from two pre-recorded sequences. Extra entries on the
    /// longer side are dropped so the pair stays aligned.
    pub fn from_moves(own: &[Move], opponent: &[Move]) -> Self {
        let len = own.len().min(opponent.len());
        Self {
            own: own[..len].to_vec(),
            opponent: opponent[..len].to_vec(),
        }
    }

    pub fn record(&mut self, own: Move, opponent: Move) {
        self.own.push(own);
        self.opponent.push(opponent);
    }

    pub fn own(&self) -> &[Move] {
        &self.own
    }

    pub fn opponent(&self) -> &[Move] {
        &self.opponent
    }

    pub fn len(&self) -> usize {
        self.own.len()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }

    pub fn last_own(&self) -> Option<Move> {
        self.own.last().copied()
    }

    pub fn last_opponent(&self) -> Option<Move> {
        self.opponent.last().copied()
    }

    /// Last `n` own moves, or fewer if the history is shorter.
    pub fn recent_own(&self, n: usize) -> &[Move] {
        &self.own[self.own.len().saturating_sub(n)..]
    }

    /// Last `n` opponent moves, or fewer if the history is shorter.
    pub fn recent_opponent(&self, n: usize) -> &[Move] {
        &self.opponent[self.opponent.len().saturating_sub(n)..]
    }

    /// Iterate rounds as (own, opponent) pairs.
    pub fn rounds(&self) -> impl Iterator<Item = (Move, Move)> + '_ {
        self.own.iter().copied().zip(self.opponent.iter().copied())
    }
}
