//! Deterministic pairing generation for tournament matches
//!
//! Pairings are enumerated in a fixed order so that match `k` of a
//! tournament always means the same pair, whichever thread plays it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a roster is expanded into matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleMode {
    /// Every ordered pair, self-pairs included: n² matches.
    #[default]
    Full,
    /// Every unordered pair once, self-pairs included: n(n+1)/2 matches.
    RoundRobin,
}

impl ScheduleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleMode::Full => "full",
            ScheduleMode::RoundRobin => "round-robin",
        }
    }
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "full" => Ok(ScheduleMode::Full),
            "round-robin" | "roundrobin" => Ok(ScheduleMode::RoundRobin),
            other => Err(ConfigError::ScheduleMode(other.to_string())),
        }
    }
}

/// Total number of matches, without allocating.
pub fn calculate_match_count(participant_count: u32, mode: ScheduleMode) -> u32 {
    let n = participant_count;
    match mode {
        ScheduleMode::Full => n.saturating_mul(n),
        ScheduleMode::RoundRobin => n.saturating_mul(n.saturating_add(1)) / 2,
    }
}

/// Generate all match pairings for a tournament
///
/// # Returns
/// Vector of (index_a, index_b) pairs in schedule order. Round-robin pairs
/// satisfy `index_a <= index_b`.
pub fn generate_all_pairings(participant_count: u32, mode: ScheduleMode) -> Vec<(u32, u32)> {
    let n = participant_count;
    match mode {
        ScheduleMode::Full => (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).collect(),
        ScheduleMode::RoundRobin => (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect(),
    }
}

/// Get the pairing for a specific match index
pub fn get_pairing_for_match(
    participant_count: u32,
    mode: ScheduleMode,
    match_index: u32,
) -> Option<(u32, u32)> {
    let n = participant_count;
    if match_index >= calculate_match_count(n, mode) {
        return None;
    }

    match mode {
        ScheduleMode::Full => Some((match_index / n, match_index % n)),
        ScheduleMode::RoundRobin => {
            // Row i holds the n - i pairs (i, i..n).
            let mut remaining = match_index;
            for i in 0..n {
                let row = n - i;
                if remaining < row {
                    return Some((i, i + remaining));
                }
                remaining -= row;
            }
            None
        }
    }
}
