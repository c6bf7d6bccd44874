//! Lane-graph nodes and their outgoing edges.

use lg_core::{DEFAULT_NODE_CAPACITY, NodeId, TileType};

use crate::router::{Hop, Router};
use crate::{Graph, Transit};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed edge to `to`, traversed in `weight` ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to:     NodeId,
    pub weight: u32,
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// What one occupant wants to do this tick, decided from the start-of-tick
/// state.  Produced by [`Node::plan`], consumed by the apply phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still crossing its edge.
    Advance,
    /// Ready and standing on its destination.
    Finish,
    /// Ready, but the router found no usable path.
    NoRoute,
    /// Ready and asking to enter the next node.
    Hop(Hop),
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// One lane cell of the fine grid.
///
/// Owns the Transits of the agents currently on it.  Block state has two
/// sources: a congestion countdown (`blocked_for`) set by the tick engine,
/// and a manual flag toggled by the operator.
#[derive(Clone, Debug)]
pub struct Node {
    id:           NodeId,
    x:            i32,
    y:            i32,
    tile:         TileType,
    capacity:     usize,
    edges:        Vec<Edge>,
    occupants:    Vec<Transit>,
    blocked_for:  u32,
    manual_block: bool,
}

impl Node {
    pub fn new(id: NodeId, x: i32, y: i32, tile: TileType) -> Self {
        Self {
            id,
            x,
            y,
            tile,
            capacity: DEFAULT_NODE_CAPACITY,
            edges: Vec::new(),
            occupants: Vec::new(),
            blocked_for: 0,
            manual_block: false,
        }
    }

    /// Override the occupant limit.  Clamped to at least 1.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn tile(&self) -> TileType {
        self.tile
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outgoing edges in insertion order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Current occupants in arrival order.
    #[inline]
    pub fn occupants(&self) -> &[Transit] {
        &self.occupants
    }

    /// Remaining ticks of congestion block.
    #[inline]
    pub fn blocked_for(&self) -> u32 {
        self.blocked_for
    }

    #[inline]
    pub fn is_manually_blocked(&self) -> bool {
        self.manual_block
    }

    /// `true` while either a congestion block or a manual block is active.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked_for > 0 || self.manual_block
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    /// `true` when a new agent may enter right now.
    #[inline]
    pub fn has_room(&self) -> bool {
        !self.is_blocked() && !self.is_full()
    }

    /// Cheapest outgoing edge to `target`, if any.
    pub fn edge_to(&self, target: NodeId) -> Option<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.to == target)
            .min_by_key(|e| e.weight)
    }

    /// Decide one [`Step`] per occupant, in occupant order.
    ///
    /// Read-only: the apply phase pairs the result with the occupants by
    /// position, so the two must not change in between.
    pub fn plan<R: Router + ?Sized>(&self, graph: &Graph, router: &R) -> Vec<Step> {
        self.occupants
            .iter()
            .map(|transit| {
                if !transit.is_ready() {
                    return Step::Advance;
                }
                let destination = transit.agent().destination;
                if destination == self.id {
                    return Step::Finish;
                }
                match router.next_hop(graph, self.id, destination) {
                    Some(hop) => Step::Hop(hop),
                    None => Step::NoRoute,
                }
            })
            .collect()
    }

    // ── Engine-side mutation ─────────────────────────────────────────────

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub(crate) fn clear_edges(&mut self) {
        self.edges.clear();
    }

    pub(crate) fn push_occupant(&mut self, transit: Transit) {
        self.occupants.push(transit);
    }

    pub(crate) fn take_occupants(&mut self) -> Vec<Transit> {
        std::mem::take(&mut self.occupants)
    }

    pub(crate) fn set_occupants(&mut self, occupants: Vec<Transit>) {
        self.occupants = occupants;
    }

    pub(crate) fn decay_block(&mut self) {
        self.blocked_for = self.blocked_for.saturating_sub(1);
    }

    /// Extend the congestion block to at least `ticks`.
    pub(crate) fn block_for(&mut self, ticks: u32) {
        self.blocked_for = self.blocked_for.max(ticks);
    }

    pub(crate) fn set_manual_block(&mut self, blocked: bool) {
        self.manual_block = blocked;
    }
}
