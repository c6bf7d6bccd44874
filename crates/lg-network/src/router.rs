//! Routing trait and default uniform-cost implementation.
//!
//! # Pluggability
//!
//! The tick engine asks for a single next hop through the [`Router`] trait,
//! so applications can swap in other strategies (A*, congestion-aware
//! costs) without touching the engine.  The default [`DijkstraRouter`]
//! re-plans from scratch on every query, which keeps agents reactive to
//! blocks that appear mid-journey.
//!
//! # Blocked nodes
//!
//! Blocked nodes are pruned from the search: they are never entered, so an
//! agent routes around a jam when a detour exists.  The start node's own
//! block is ignored.  A blocked destination is therefore unreachable until
//! the block expires.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use lg_core::{NodeId, NodeMap, NodeSet};

use crate::Graph;

// ── Hop ───────────────────────────────────────────────────────────────────────

/// The first step of a shortest path: the neighbour to enter and the weight
/// of the edge leading to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hop {
    pub node:   NodeId,
    pub weight: u32,
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable next-hop routing.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads during the parallel plan phase.
pub trait Router: Send + Sync {
    /// First hop on a cheapest path from `start` to `destination`.
    ///
    /// Returns `None` when `start == destination` or no path exists.
    fn next_hop(&self, graph: &Graph, start: NodeId, destination: NodeId) -> Option<Hop>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Uniform-cost search over edge weights.
///
/// Ties in cumulative cost are broken by insertion order, so the result is
/// deterministic for a given graph.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn next_hop(&self, graph: &Graph, start: NodeId, destination: NodeId) -> Option<Hop> {
        dijkstra(graph, start, destination, |_| {})
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Search from `start` to `destination`, calling `on_expand` once per
/// expanded node.
pub(crate) fn dijkstra(
    graph: &Graph,
    start: NodeId,
    destination: NodeId,
    mut on_expand: impl FnMut(NodeId),
) -> Option<Hop> {
    if start == destination || !graph.contains(start) {
        return None;
    }

    // best[v] = cheapest known cost to v.
    let mut best: NodeMap<u64> = NodeMap::default();
    // prev[v] = (predecessor, weight of the edge used to reach v).
    let mut prev: NodeMap<(NodeId, u32)> = NodeMap::default();
    let mut visited = NodeSet::default();

    // Min-heap on (cost, seq).  seq is the push counter, so equal-cost
    // entries pop in insertion order.
    let mut heap: BinaryHeap<Reverse<(u64, u64, NodeId)>> = BinaryHeap::new();
    let mut seq = 0u64;
    best.insert(start, 0);
    heap.push(Reverse((0, seq, start)));

    while let Some(Reverse((cost, _, node))) = heap.pop() {
        if !visited.insert(node) {
            continue;
        }
        on_expand(node);

        if node == destination {
            return first_hop(&prev, start, destination);
        }

        let Some(current) = graph.node(node) else { continue };
        for edge in current.edges() {
            if visited.contains(&edge.to) {
                continue;
            }
            let Some(next) = graph.node(edge.to) else { continue };
            if next.is_blocked() {
                continue;
            }
            let candidate = cost + u64::from(edge.weight);
            if best.get(&edge.to).is_none_or(|&known| candidate < known) {
                best.insert(edge.to, candidate);
                prev.insert(edge.to, (node, edge.weight));
                seq += 1;
                heap.push(Reverse((candidate, seq, edge.to)));
            }
        }
    }

    None
}

/// Walk predecessor links back from `destination` to the node entered
/// directly from `start`.
fn first_hop(prev: &NodeMap<(NodeId, u32)>, start: NodeId, destination: NodeId) -> Option<Hop> {
    let mut cur = destination;
    loop {
        let &(parent, weight) = prev.get(&cur)?;
        if parent == start {
            return Some(Hop { node: cur, weight });
        }
        cur = parent;
    }
}
