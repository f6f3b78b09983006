//! Statistical helpers used by the adaptive strategies
//!
//! Every test here fails closed: degenerate or empty inputs report
//! "not significant" / "not random" instead of dividing by zero.

use rand::Rng;

use crate::strategy::Move;

/// |z| above this is treated as a significant difference.
pub const Z_THRESHOLD: f64 = 3.0;

/// Chi-squared critical value, one degree of freedom, alpha = 0.05.
pub const CHI_SQUARED_CRITICAL: f64 = 3.841;

/// Fewer moves than this are never judged random.
pub const MIN_RANDOMNESS_SAMPLE: usize = 10;

/// Draw `sample_size` moves, each Cooperate with `cooperation_probability`.
pub fn random_5050_sample<R: Rng>(
    sample_size: usize,
    cooperation_probability: f64,
    rng: &mut R,
) -> Vec<Move> {
    let p = if cooperation_probability.is_nan() {
        0.5
    } else {
        cooperation_probability.clamp(0.0, 1.0)
    };
    (0..sample_size)
        .map(|_| if rng.gen_bool(p) { Move::Cooperate } else { Move::Defect })
        .collect()
}

/// Fraction of Cooperate moves, `None` for an empty slice.
pub fn cooperation_ratio(moves: &[Move]) -> Option<f64> {
    if moves.is_empty() {
        return None;
    }
    let cooperations = moves.iter().filter(|m| m.is_cooperate()).count();
    Some(cooperations as f64 / moves.len() as f64)
}

/// Two-proportion z statistic comparing the Cooperate rates of two samples.
///
/// `None` when either sample is empty or the pooled variance is zero.
pub fn z_score(sample_a: &[Move], sample_b: &[Move]) -> Option<f64> {
    let p1 = cooperation_ratio(sample_a)?;
    let p2 = cooperation_ratio(sample_b)?;

    let variance = p1 * (1.0 - p1) / sample_a.len() as f64 + p2 * (1.0 - p2) / sample_b.len() as f64;
    if variance <= 0.0 {
        return None;
    }

    Some((p1 - p2) / variance.sqrt())
}

/// True if the two samples' Cooperate rates differ significantly (|z| > 3).
pub fn compare_samples(sample_a: &[Move], sample_b: &[Move]) -> bool {
    z_score(sample_a, sample_b).is_some_and(|z| z.abs() > Z_THRESHOLD)
}

/// Goodness-of-fit statistic of Cooperate/Defect counts against 50/50.
pub fn chi_squared_statistic(moves: &[Move]) -> Option<f64> {
    if moves.is_empty() {
        return None;
    }
    let expected = moves.len() as f64 / 2.0;
    let cooperations = moves.iter().filter(|m| m.is_cooperate()).count() as f64;
    let defections = moves.len() as f64 - cooperations;

    Some(
        (cooperations - expected).powi(2) / expected
            + (defections - expected).powi(2) / expected,
    )
}

/// Whether a move sequence is indistinguishable from a fair coin.
pub fn check_randomness(moves: &[Move]) -> bool {
    if moves.len() < MIN_RANDOMNESS_SAMPLE {
        return false;
    }
    chi_squared_statistic(moves).is_some_and(|chi| chi < CHI_SQUARED_CRITICAL)
}

/// Whether a sequence strictly alternates (CDCD... or DCDC...).
pub fn is_alternating_pattern(moves: &[Move]) -> bool {
    moves.len() >= 2 && moves.windows(2).all(|w| w[0] != w[1])
}

/// Most common move. Ties and empty input resolve to Cooperate.
pub fn mode(moves: &[Move]) -> Move {
    let defections = moves.iter().filter(|m| m.is_defect()).count();
    if defections * 2 > moves.len() {
        Move::Defect
    } else {
        Move::Cooperate
    }
}
