/*!
The deterministic source of randomness used throughout a solve.

A given `(seed, frozen problem)` pair must reproduce the same solution (§5, Determinism in
§8), so every random choice made during search — initialization, clause/atom selection,
noise, theory sampling — draws from a single seeded stream rather than from thread-local or
OS randomness.
*/

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// A seedable, deterministic stream of randomness.
///
/// Wraps [StdRng] rather than hand-rolling a generator (as the teacher does for its PCG32):
/// determinism only requires a stable `(seed -> stream)` mapping within one process, which
/// `StdRng::seed_from_u64` already guarantees.
pub struct Stream(StdRng);

impl Stream {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// `true` with probability `p`, clamped to `[0,1]`.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.random_bool(p.clamp(0.0, 1.0))
    }

    /// A uniform index in `0..len`. Panics if `len == 0`.
    pub fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot draw an index from an empty range");
        self.0.random_range(0..len)
    }

    /// A uniform `f64` in `[lo, hi]`.
    pub fn gen_range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.0.random_range(lo..=hi)
    }

    /// Picks a uniformly random element from a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.gen_index(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Stream::from_seed(42);
        let mut b = Stream::from_seed(42);
        for _ in 0..50 {
            assert_eq!(a.gen_index(1000), b.gen_index(1000));
        }
    }
}
