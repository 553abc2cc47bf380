//! Seedable phase scatter (xorshift64).
//! Deterministic, so a given seed always lays the system out the same way.

use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct PhaseRng {
    state: u64,
}

impl PhaseRng {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero; mix the seed so 0 is usable.
        let mixed = seed ^ 0x9E37_79B9_7F4A_7C15;
        PhaseRng {
            state: if mixed == 0 { 1 } else { mixed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform angle in [0, 2π).
    pub fn next_phase(&mut self) -> f64 {
        self.next_unit() * TAU
    }
}
