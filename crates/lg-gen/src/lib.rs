//! `lg-gen`: procedural road-grid generator for lanegrid.
//!
//! # Pipeline
//!
//! ```text
//! CoarseGrid (w × h)
//!   ① track   : optional transit line between two distant cells
//!   ② coverage: random-walk legs until the coverage goal is met
//!   ③ classify: Junction / Corner / Straight / DeadEnd / Isolated
//!   ④ expand  : each painted cell becomes a 2×2 lane loop + exit edges
//!   ⑤ houses  : empty lane slots next to roads may become houses
//! Graph (2w × 2h) → Network
//! ```
//!
//! The walk can fail to reach its goal within the leg cap; callers retry
//! with [`generate_with_retry`], which derives a fresh RNG stream per attempt.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lg_core::SimConfig;
//! use lg_gen::{generate_with_retry, GenConfig};
//!
//! let generated = generate_with_retry(&GenConfig::new(20, 20, 0.4, 0.3), &SimConfig::default())?;
//! let mut network = generated.network;
//! network.run(&mut lg_network::NoopObserver);
//! ```

pub mod config;
pub mod coverage;
pub mod direction;
pub mod error;
pub mod generate;
pub mod grid;
pub mod houses;
pub mod topology;
pub mod track;

#[cfg(test)]
mod tests;

pub use config::GenConfig;
pub use coverage::{cover, WalkStats};
pub use direction::{Direction, Openings};
pub use error::{GenError, GenResult};
pub use generate::{generate, generate_with_retry, GenStats, Generated};
pub use grid::{Cell, CoarseGrid, Pattern};
pub use houses::attach_houses;
pub use topology::{expand, straight_loop_edges, Corner};
pub use track::{lay_track, staircase};
