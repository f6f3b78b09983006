//! Error types

use thiserror::Error;

/// Errors raised by the payoff model when an action cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PayoffError {
    #[error("invalid action {value:?}: expected Cooperate or Defect")]
    InvalidAction { value: String },

    #[error("transcript length mismatch: {left} moves against {right}")]
    LengthMismatch { left: usize, right: usize },
}

impl PayoffError {
    pub(crate) fn invalid(value: impl Into<String>) -> Self {
        PayoffError::InvalidAction { value: value.into() }
    }
}

/// Fatal match failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("match aborted: {0}")]
    Payoff(#[from] PayoffError),
}

/// Unknown strategy names.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("unknown strategy {name:?}")]
    UnknownStrategy { name: String },
}

/// Tournament configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error("tournament roster is empty")]
    EmptyRoster,

    #[error("flip probability {0} is outside [0, 1]")]
    FlipProbability(f64),

    #[error("unknown schedule mode {0:?}: expected full or round-robin")]
    ScheduleMode(String),
}
