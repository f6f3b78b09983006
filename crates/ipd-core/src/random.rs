//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible matches and tournaments.
//! Uses a simple but effective xorshift algorithm and plugs into the
//! `rand` ecosystem through [`RngCore`], so callers can use the
//! [`rand::Rng`] extension methods on it.

use rand::RngCore;

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a tournament seed and a stream index
    /// (the match index inside a tournament).
    pub fn new(seed: u64, stream: u32) -> Self {
        let mut state = seed ^ 0x6a09e667f3bcc909;

        // Mix in stream index
        state ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
        // xorshift has a fixed point at zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Derive an independent generator for a sub-stream (a player slot or
    /// the noise injector) without advancing `self`.
    pub fn fork(&self, stream: u8) -> Self {
        let mut new_state = self.state;
        new_state ^= (stream as u64 + 1).wrapping_mul(0x9e3779b97f4a7c15);
        if new_state == 0 {
            new_state = 0x2545f4914f6cdd1d;
        }

        let mut rng = Self { state: new_state };
        rng.next_u64(); // Mix
        rng
    }

    /// Generate next u64
    fn step(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
