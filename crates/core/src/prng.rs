//! Deterministic PRNG based on the SplitMix64 algorithm.
//!
//! Drives the demo stimulus so that a run is fully reproducible from its
//! seed. SplitMix64 advances a counter and mixes it through two
//! multiply-xorshift rounds; every 64-bit seed (including 0) produces a
//! full-period, well-distributed sequence. State is serializable so a
//! sequence can be resumed mid-stream.

use serde::{Deserialize, Serialize};

/// SplitMix64 deterministic PRNG. Same seed always produces the same
/// sequence on every platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Weyl sequence increment.
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Creates a new PRNG seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Returns a uniformly distributed f64 in [0, 1), using the top 53 bits
    /// for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
