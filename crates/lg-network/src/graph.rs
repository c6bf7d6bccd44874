//! The lane graph: node storage, edges and a spatial index.
//!
//! # Data layout
//!
//! Nodes live in a `BTreeMap` keyed by `NodeId`, so every scan (tick
//! phases, spawn rolls, rendering) visits nodes in ascending id order and a
//! seeded run is reproducible.  Edges are stored on their source node.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps grid coordinates, widened to `f64`, to node ids.  It
//! backs [`Graph::node_at`] and [`Graph::nearest_node`], which viewers use
//! to resolve a clicked cell.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use lg_core::{AgentId, NodeId, TileType};

use crate::{Agent, Edge, NetworkError, NetworkResult, Node, Transit};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Points are stored as `f64` so distance math never overflows, however far
/// from the grid a query lands.
#[derive(Clone, Debug)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[inline]
fn grid_point(x: i32, y: i32) -> [f64; 2] {
    [f64::from(x), f64::from(y)]
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed, weighted lane graph over a `width × height` fine grid.
///
/// The grid bounds only constrain node coordinates; ids are arbitrary but
/// unique.
#[derive(Clone, Debug)]
pub struct Graph {
    width:              u32,
    height:             u32,
    pub(crate) nodes:   BTreeMap<NodeId, Node>,
    spatial:            RTree<NodeEntry>,
}

impl Graph {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, nodes: BTreeMap::new(), spatial: RTree::new() }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        u32::try_from(x).is_ok_and(|x| x < self.width)
            && u32::try_from(y).is_ok_and(|y| y < self.height)
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register `node`.  Its edges and occupants are discarded; add edges
    /// with [`add_directed_edge`](Self::add_directed_edge).
    pub fn add_node(&mut self, mut node: Node) -> NetworkResult<NodeId> {
        let id = node.id();
        let (x, y) = node.position();
        if !self.in_bounds(x, y) {
            return Err(NetworkError::OutOfBounds {
                id,
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if self.nodes.contains_key(&id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        node.take_occupants();
        node.clear_edges();
        self.spatial.insert(NodeEntry { point: grid_point(x, y), id });
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Add a directed edge `from → to` costing `weight` ticks.
    ///
    /// Parallel edges are allowed; routing uses the cheapest.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> NetworkResult<()> {
        if weight == 0 {
            return Err(NetworkError::ZeroWeight { from, to });
        }
        if !self.nodes.contains_key(&to) {
            return Err(NetworkError::UnknownNode(to));
        }
        let source = self.nodes.get_mut(&from).ok_or(NetworkError::UnknownNode(from))?;
        source.push_edge(Edge { to, weight });
        Ok(())
    }

    /// Add `a → b` and `b → a`, both costing `weight`.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, weight: u32) -> NetworkResult<()> {
        self.add_directed_edge(a, b, weight)?;
        self.add_directed_edge(b, a, weight)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Nodes of one tile type, ascending id order.
    pub fn nodes_of(&self, tile: TileType) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(move |n| n.tile() == tile)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.edges().len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at exactly `(x, y)`.  With several nodes on one cell the
    /// choice among them is unspecified.
    pub fn node_at(&self, x: i32, y: i32) -> Option<&Node> {
        self.spatial
            .locate_at_point(&grid_point(x, y))
            .and_then(|entry| self.nodes.get(&entry.id))
    }

    /// The node closest to `(x, y)` by Euclidean distance.
    pub fn nearest_node(&self, x: i32, y: i32) -> Option<&Node> {
        self.spatial
            .nearest_neighbor(&grid_point(x, y))
            .and_then(|entry| self.nodes.get(&entry.id))
    }

    /// Agents currently in the network.
    pub fn agent_count(&self) -> usize {
        self.nodes.values().map(|n| n.occupants().len()).sum()
    }

    /// Ids of nodes that refuse entry right now.
    pub fn blocked_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.values().filter(|n| n.is_blocked()).map(Node::id)
    }

    /// The node holding agent `id`, with the agent's Transit.
    pub fn locate_agent(&self, id: AgentId) -> Option<(&Node, &Transit)> {
        self.nodes.values().find_map(|node| {
            node.occupants()
                .iter()
                .find(|t| t.agent().id == id)
                .map(|t| (node, t))
        })
    }

    /// Every agent with its interpolated position, for drawing.
    pub fn agent_positions(&self) -> Vec<(Agent, [f32; 2])> {
        self.nodes
            .values()
            .flat_map(|node| {
                node.occupants()
                    .iter()
                    .map(move |t| (t.agent(), t.position(node.x(), node.y())))
            })
            .collect()
    }
}
