//! One agent's traversal of one edge.

use crate::Agent;

/// An agent crossing the edge into the node that owns this Transit.
///
/// `remaining` counts down from `total` (the edge weight) by one per tick.
/// At zero the agent is *ready*: on its next tick the owning node either
/// moves it on, keeps it waiting, or removes it.
///
/// Invariant: `0 <= remaining <= total` and `total > 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transit {
    agent:     Agent,
    remaining: u32,
    total:     u32,
    origin_x:  i32,
    origin_y:  i32,
}

impl Transit {
    /// Start crossing an edge of `weight` ticks from `(origin_x, origin_y)`.
    ///
    /// A zero weight is treated as one tick; the graph rejects zero-weight
    /// edges so this only matters for hand-built transits.
    pub fn new(agent: Agent, weight: u32, origin_x: i32, origin_y: i32) -> Self {
        let total = weight.max(1);
        Self { agent, remaining: total, total, origin_x, origin_y }
    }

    /// A Transit that has already fully arrived at `(x, y)`: total weight 1,
    /// nothing remaining.  Used for spawned and manually placed agents.
    pub fn arrived(agent: Agent, x: i32, y: i32) -> Self {
        Self { agent, remaining: 0, total: 1, origin_x: x, origin_y: y }
    }

    #[inline]
    pub fn agent(&self) -> Agent {
        self.agent
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Coordinates of the node the agent departed from.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// `true` once the crossing is complete.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Fraction of the crossing completed, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        1.0 - self.remaining as f32 / self.total as f32
    }

    /// Interpolated position between the origin and the owning node at
    /// `(node_x, node_y)`.  Viewers use this to draw agents mid-edge.
    pub fn position(&self, node_x: i32, node_y: i32) -> [f32; 2] {
        let p = self.progress();
        [
            self.origin_x as f32 + (node_x - self.origin_x) as f32 * p,
            self.origin_y as f32 + (node_y - self.origin_y) as f32 * p,
        ]
    }

    /// Advance by one tick.  A ready Transit stays at zero.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
