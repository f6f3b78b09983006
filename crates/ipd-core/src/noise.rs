//! Noise injection: random perturbation of intended moves

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::strategy::Move;

/// Default flip probability (1%).
pub const DEFAULT_FLIP_PROBABILITY: f64 = 0.01;

/// Flip `action` with probability `flip_probability`.
///
/// Each call is an independent draw from `rng`. Probabilities outside
/// [0, 1] are clamped.
pub fn apply_noise<R: Rng>(action: Move, flip_probability: f64, rng: &mut R) -> Move {
    let p = if flip_probability.is_nan() {
        0.0
    } else {
        flip_probability.clamp(0.0, 1.0)
    };
    if rng.gen_bool(p) {
        action.opposite()
    } else {
        action
    }
}

/// Noise settings threaded from the scheduler down to each match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub enabled: bool,
    pub flip_probability: f64,
}

impl NoiseConfig {
    pub fn off() -> Self {
        Self { enabled: false, flip_probability: DEFAULT_FLIP_PROBABILITY }
    }

    pub fn on() -> Self {
        Self { enabled: true, flip_probability: DEFAULT_FLIP_PROBABILITY }
    }

    pub fn with_probability(flip_probability: f64) -> Self {
        Self { enabled: true, flip_probability }
    }

    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::on()
        } else {
            Self::off()
        }
    }

    /// Perturb `action` if noise is enabled, returning the played move.
    pub fn perturb<R: Rng>(&self, action: Move, rng: &mut R) -> Move {
        if self.enabled {
            apply_noise(action, self.flip_probability, rng)
        } else {
            action
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::off()
    }
}
