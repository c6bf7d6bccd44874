//! Deterministic simulation RNG.
//!
//! Every random decision in the model (walk directions, house placement,
//! spawn rolls, congestion blocks) draws from a seeded `SimRng`, so a run is
//! reproducible from `SimConfig::seed` alone.  Generation retries fork fresh
//! streams with [`SimRng::child`].

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Fractional part of the golden ratio; spreads small offsets over the seed
/// space.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG shared by the generator and the tick loop.
///
/// Only the sequential parts of a tick draw from it; the parallel plan phase
/// is pure.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Fork an independent stream for generation attempt `offset`.
    ///
    /// Advances `self` by one draw, so successive forks differ even for the
    /// same offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let base: u64 = self.0.r#gen();
        Self::new(base ^ offset.wrapping_mul(GOLDEN_GAMMA))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`; out-of-range values are clamped to
    /// [0, 1] rather than panicking.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    /// Uniform pick; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}
