//! Tick counter.
//!
//! One tick is one discrete step of the network: every Transit moves at most
//! one unit along its edge.  Edge weights are expressed in ticks and there is
//! no wall-clock mapping.

use std::fmt;

/// Absolute position of the network clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` on every `interval`-th tick, starting at tick 0.  Never true
    /// for an interval of 0.
    #[inline]
    pub fn on_interval(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
