//! Plain data row types written by output backends.

/// One agent's position at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u64,
    pub tick:        u64,
    /// Node currently holding the agent's Transit.
    pub node:        u32,
    /// Interpolated position between the previous node and `node`.
    pub x:           f32,
    pub y:           f32,
    pub destination: u32,
    /// Ticks left on the current edge.
    pub remaining:   u32,
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub spawned:        u64,
    pub finished:       u64,
    pub dropped:        u64,
    pub moved:          u64,
    pub stalled:        u64,
    pub blocks_started: u64,
    pub in_flight:      u64,
}
