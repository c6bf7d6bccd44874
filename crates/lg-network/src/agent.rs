//! Routed agents.

use lg_core::{AgentId, NodeId};

/// A robot travelling to a fixed destination node.
///
/// Immutable once created: the same value is carried from Transit to Transit
/// as the agent moves, and dropped when its last Transit resolves at the
/// destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:          AgentId,
    pub destination: NodeId,
}

impl Agent {
    #[inline]
    pub fn new(id: AgentId, destination: NodeId) -> Self {
        Self { id, destination }
    }
}
