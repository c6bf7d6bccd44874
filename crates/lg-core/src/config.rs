//! Live-simulation configuration.
//!
//! Generation parameters live in `lg-gen::GenConfig`; this struct covers
//! everything the tick loop needs.  Applications typically load both from a
//! JSON file (with the `serde` feature) and pass them to the generator.

use crate::{CoreError, CoreResult, Tick};

/// Occupant limit of every node.
pub const DEFAULT_NODE_CAPACITY: usize = 1;

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Chance per tick that a house node volunteers as a spawn endpoint.
    pub spawn_probability: f64,

    /// Chance that a node becomes blocked when one of its agents is refused
    /// entry to the next node.
    pub block_probability: f64,

    /// Inclusive range of the congestion block duration, in ticks.
    pub block_ticks_min: u32,
    pub block_ticks_max: u32,

    /// Occupant limit applied to every node created for this network.
    pub node_capacity: usize,

    /// Total ticks simulated by `Network::run`.
    pub total_ticks: u64,

    /// Observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            spawn_probability:       0.01,
            block_probability:       0.05,
            block_ticks_min:         2,
            block_ticks_max:         6,
            node_capacity:           DEFAULT_NODE_CAPACITY,
            total_ticks:             1_000,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which `Network::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject probabilities outside [0, 1], inverted block ranges and a
    /// zero node capacity.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, p) in [
            ("spawn_probability", self.spawn_probability),
            ("block_probability", self.block_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.block_ticks_min == 0 || self.block_ticks_min > self.block_ticks_max {
            return Err(CoreError::Config(format!(
                "block tick range {}..={} is empty or starts at zero",
                self.block_ticks_min, self.block_ticks_max
            )));
        }
        if self.node_capacity == 0 {
            return Err(CoreError::Config("node_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
