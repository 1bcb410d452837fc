//! Seeded linear-congruential generator used for shuffling.
//!
//! The generator is intentionally simple so that a shuffle can be reproduced
//! from nothing but a 32-bit seed. `rand_int` maps a float in `[0, 1)` onto an
//! index with `floor(x * n)`, which carries a small modulo bias for `n` that
//! does not divide 2³². That bias is accepted: reproducibility matters more
//! than uniformity here.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit LCG: `state = state * 1664525 + 1013904223 (mod 2^32)`.
///
/// ```
/// use holdem_engine::rng::Lcg;
///
/// let mut a = Lcg::new(42);
/// let mut b = Lcg::new(42);
/// assert_eq!(a.next_f64(), b.next_f64());
/// assert_eq!(a.state(), b.state());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator seeded with `seed mod 2^32`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.seed(seed);
        rng
    }

    /// Rebuild a generator from a raw state captured with [`Lcg::state`].
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Reset the state to `seed mod 2^32`.
    pub fn seed(&mut self, seed: u64) {
        self.state = seed as u32;
    }

    /// Raw 32-bit state, for snapshots and replay checks.
    pub const fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Advance once and return a fraction in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / TWO_POW_32
    }

    /// `floor(next() * n)`; `n == 0` yields 0 without advancing.
    pub fn rand_int(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_f64() * n as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_steps_match_reference_values() {
        let mut rng = Lcg::new(42);
        assert_eq!(rng.state(), 42);
        // 42 * 1664525 + 1013904223 = 1083814273
        let x = rng.next_f64();
        assert_eq!(rng.state(), 1_083_814_273);
        assert!((x - 1_083_814_273.0 / TWO_POW_32).abs() < f64::EPSILON);
        // 1083814273 * 1664525 + 1013904223 mod 2^32 = 378494188
        rng.next_f64();
        assert_eq!(rng.state(), 378_494_188);
    }

    #[test]
    fn seed_wraps_modulo_two_pow_32() {
        let rng = Lcg::new((1u64 << 32) + 7);
        assert_eq!(rng.state(), 7);
    }

    #[test]
    fn rand_int_stays_in_range() {
        let mut rng = Lcg::new(9);
        for n in 1..60 {
            assert!(rng.rand_int(n) < n);
        }
        let before = rng.state();
        assert_eq!(rng.rand_int(0), 0);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut rng = Lcg::new(5);
        let a: Vec<usize> = (0..4).map(|_| rng.rand_int(1000)).collect();
        rng.seed(5);
        let b: Vec<usize> = (0..4).map(|_| rng.rand_int(1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn from_state_resumes() {
        let mut a = Lcg::new(123);
        a.next_f64();
        let mut b = Lcg::from_state(a.state());
        assert_eq!(a.next_f64(), b.next_f64());
        assert_eq!(a.state(), b.state());
    }
}
