//! `lg-core`: foundational types for the `lanegrid` traffic model.
//!
//! This crate is a dependency of every other `lg-*` crate.  It has no
//! `lg-*` dependencies and minimal external ones (`rand` and `thiserror`,
//! plus optional `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`                                   |
//! | [`tile`]        | `TileType`                                            |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `SimConfig`                                           |
//! | [`collections`] | `NodeMap`, `NodeSet`                                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public types.     |
//! | `fx-hash` | `NodeMap`/`NodeSet` use FxHash instead of SipHash.      |

pub mod collections;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod tile;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use collections::{NodeMap, NodeSet};
pub use config::{DEFAULT_NODE_CAPACITY, SimConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, NodeId};
pub use rng::SimRng;
pub use tile::TileType;
pub use time::Tick;
