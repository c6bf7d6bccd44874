//! Network-subsystem error type.

use thiserror::Error;

use lg_core::{CoreError, NodeId};

/// Errors produced while building or driving a [`Network`](crate::Network).
///
/// "No path" and "target full" are deliberately absent: inside the tick loop
/// they are steady-state conditions handled by waiting or dropping, never
/// errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {id} at ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        id:     NodeId,
        x:      i32,
        y:      i32,
        width:  u32,
        height: u32,
    },

    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("node {0} is already registered")]
    DuplicateNode(NodeId),

    #[error("node {0} has no room for another agent")]
    NodeOccupied(NodeId),

    #[error("edge {from} -> {to} must have a positive weight")]
    ZeroWeight { from: NodeId, to: NodeId },

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
