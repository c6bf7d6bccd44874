//! `lg-network`: lane graph, routing and tick engine for lanegrid.
//!
//! # Modules
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | `graph`     | `Graph`: node storage, edges, R-tree lookups              |
//! | `node`      | `Node`, `Edge`, per-occupant `Step` planning              |
//! | `transit`   | `Transit`: one agent crossing one edge                    |
//! | `agent`     | `Agent`: id plus destination                              |
//! | `router`    | `Router` trait, `DijkstraRouter`, `Hop`                   |
//! | `network`   | `Network`: owner of graph, router, clock and RNG          |
//! | `tick`      | The two-phase tick and the run loop                       |
//! | `spawn`     | House pairing spawn policy                                |
//! | `observer`  | `SimObserver`, `TickReport`, `Hooks`                      |
//! | `render`    | ASCII map                                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the plan phase on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash maps in the router's search state.              |
//! | `serde`    | Serialize/Deserialize on plain data types.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lg_core::{NodeId, SimConfig, TileType};
//! use lg_network::{Graph, Network, Node, NoopObserver};
//!
//! let mut graph = Graph::new(2, 1);
//! graph.add_node(Node::new(NodeId(0), 0, 0, TileType::Road))?;
//! graph.add_node(Node::new(NodeId(1), 1, 0, TileType::Road))?;
//! graph.add_directed_edge(NodeId(0), NodeId(1), 3)?;
//!
//! let mut net = Network::new(graph, SimConfig::default())?;
//! net.place_agent(NodeId(0), NodeId(1))?;
//! net.run_ticks(5, &mut NoopObserver);
//! ```

pub mod agent;
pub mod error;
pub mod graph;
pub mod network;
pub mod node;
pub mod observer;
pub mod render;
pub mod router;
mod spawn;
mod tick;
pub mod transit;


pub use agent::Agent;
pub use error::{NetworkError, NetworkResult};
pub use graph::Graph;
pub use network::Network;
pub use node::{Edge, Node, Step};
pub use observer::{Hooks, NoopObserver, SimObserver, TickReport};
pub use router::{DijkstraRouter, Hop, Router};
pub use transit::Transit;
