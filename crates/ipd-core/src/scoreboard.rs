//! Tournament scoreboard

use std::fmt;

use serde::{Deserialize, Serialize};

/// One strategy's accumulated score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Cumulative scores keyed by strategy name, in insertion order.
///
/// Scores only ever grow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board with every name present at zero, fixing the entry order.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut board = Self::new();
        for name in names {
            board.add(name, 0);
        }
        board
    }

    /// Add `points` to `name`, appending a new entry if needed.
    pub fn add(&mut self, name: impl Into<String>, points: u64) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score += points,
            None => self.entries.push(ScoreEntry { name, score: points }),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending score. Ties keep insertion order.
    pub fn sorted(&self) -> Vec<ScoreEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// Fold another board's scores into this one.
    pub fn merge(&mut self, other: &Scoreboard) {
        for entry in &other.entries {
            self.add(entry.name.clone(), entry.score);
        }
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.score).sum()
    }

    pub fn leader(&self) -> Option<&ScoreEntry> {
        self.entries
            .iter()
            .reduce(|best, e| if e.score > best.score { e } else { best })
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|e| e.name.len())
            .max()
            .unwrap_or(0)
            .max("Strategy".len());

        writeln!(f, "{:>4}  {:<width$}  {:>10}", "Rank", "Strategy", "Score", width = width)?;
        for (rank, entry) in self.sorted().iter().enumerate() {
            writeln!(
                f,
                "{:>4}  {:<width$}  {:>10}",
                rank + 1,
                entry.name,
                entry.score,
                width = width
            )?;
        }
        Ok(())
    }
}
