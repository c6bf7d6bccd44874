//! Phase B: expand painted coarse cells into 2×2 lane blocks.
//!
//! # Lane model
//!
//! Traffic keeps right and `y` grows southward.  Each block is a
//! counter-clockwise loop over its four fine nodes:
//!
//! ```text
//!   NW ◀── NE
//!   │       ▲
//!   ▼       │
//!   SW ──▶ SE
//! ```
//!
//! | Side | Exit corner | Entry corner |
//! |------|-------------|--------------|
//! | N    | NE          | NW           |
//! | E    | SE          | NE           |
//! | S    | SW          | SE           |
//! | W    | NW          | SW           |
//!
//! Every open side gets one straight-weight exit edge into the neighbour's
//! entry corner for the opposite side.  A loop edge is straight-weight when
//! it lies on the loop between the entry corner of one open side and the exit
//! corner of another; every other loop edge only serves U-turns and gets the
//! U-turn weight.  Junction loops are straight throughout.

use lg_core::{NodeId, SimConfig, TileType};
use lg_network::{Graph, Node};

use crate::direction::{Direction, Openings};
use crate::grid::{Cell, CoarseGrid, Pattern};
use crate::{GenConfig, GenError, GenResult};

// ── Corner ────────────────────────────────────────────────────────────────────

/// One fine node of a 2×2 block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// Loop order: each corner's successor is the next entry.
    pub const LOOP: [Corner; 4] = [Corner::NorthEast, Corner::NorthWest, Corner::SouthWest, Corner::SouthEast];

    /// Offset inside the block.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Corner::NorthWest => (0, 0),
            Corner::NorthEast => (1, 0),
            Corner::SouthWest => (0, 1),
            Corner::SouthEast => (1, 1),
        }
    }

    /// Loop successor.
    #[inline]
    pub fn next(self) -> Corner {
        match self {
            Corner::NorthEast => Corner::NorthWest,
            Corner::NorthWest => Corner::SouthWest,
            Corner::SouthWest => Corner::SouthEast,
            Corner::SouthEast => Corner::NorthEast,
        }
    }

    /// Fine coordinates of this corner in coarse cell `(cx, cy)`.
    #[inline]
    pub fn fine(self, cx: i32, cy: i32) -> (i32, i32) {
        let (ox, oy) = self.offset();
        (2 * cx + ox, 2 * cy + oy)
    }
}

impl Direction {
    /// Corner whose external edge leaves through this side.
    #[inline]
    pub fn exit_corner(self) -> Corner {
        match self {
            Direction::North => Corner::NorthEast,
            Direction::East  => Corner::SouthEast,
            Direction::South => Corner::SouthWest,
            Direction::West  => Corner::NorthWest,
        }
    }

    /// Corner that traffic arriving through this side enters.
    #[inline]
    pub fn entry_corner(self) -> Corner {
        match self {
            Direction::North => Corner::NorthWest,
            Direction::East  => Corner::NorthEast,
            Direction::South => Corner::SouthEast,
            Direction::West  => Corner::SouthWest,
        }
    }
}

/// Straight/U-turn flag for each loop edge, indexed by the edge's start
/// corner in [`Corner::LOOP`] order.
pub fn straight_loop_edges(open: Openings) -> [bool; 4] {
    if Pattern::classify(open) == Pattern::Junction {
        return [true; 4];
    }
    let mut straight = [false; 4];
    for entry in open.iter() {
        for exit in open.iter().filter(|&d| d != entry) {
            let target = exit.exit_corner();
            let mut corner = entry.entry_corner();
            while corner != target {
                if let Some(i) = Corner::LOOP.iter().position(|&c| c == corner) {
                    straight[i] = true;
                }
                corner = corner.next();
            }
        }
    }
    straight
}

// ── Expansion ─────────────────────────────────────────────────────────────────

/// Row-major id of fine cell `(x, y)`.
pub(crate) fn fine_id(x: i32, y: i32, fine_width: u32) -> GenResult<NodeId> {
    NodeId::from_grid(x, y, fine_width)
        .ok_or_else(|| GenError::InvalidConfig(format!("fine cell ({x}, {y}) has no valid node id")))
}

/// Build the lane graph for every painted cell of `grid`.
pub fn expand(grid: &CoarseGrid, config: &GenConfig, sim: &SimConfig) -> GenResult<Graph> {
    let fine_width = grid.width() * 2;
    let mut graph = Graph::new(fine_width, grid.height() * 2);

    for (cx, cy, cell) in grid.painted() {
        let tile = if cell == Cell::Track { TileType::Track } else { TileType::Road };
        for corner in Corner::LOOP {
            let (fx, fy) = corner.fine(cx, cy);
            let node = Node::new(fine_id(fx, fy, fine_width)?, fx, fy, tile).with_capacity(sim.node_capacity);
            graph.add_node(node)?;
        }
    }

    for (cx, cy, _) in grid.painted() {
        let open = grid.openings(cx, cy);
        let straight = straight_loop_edges(open);

        for (i, corner) in Corner::LOOP.into_iter().enumerate() {
            let (fx, fy) = corner.fine(cx, cy);
            let (tx, ty) = corner.next().fine(cx, cy);
            let weight = if straight[i] { config.straight_weight } else { config.uturn_weight };
            graph.add_directed_edge(fine_id(fx, fy, fine_width)?, fine_id(tx, ty, fine_width)?, weight)?;
        }

        for side in open.iter() {
            let (fx, fy) = side.exit_corner().fine(cx, cy);
            let (nx, ny) = side.step(cx, cy);
            let (tx, ty) = side.opposite().entry_corner().fine(nx, ny);
            graph.add_directed_edge(
                fine_id(fx, fy, fine_width)?,
                fine_id(tx, ty, fine_width)?,
                config.straight_weight,
            )?;
        }
    }

    Ok(graph)
}
