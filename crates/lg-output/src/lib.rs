//! `lg-output`: telemetry writers for lanegrid runs.
//!
//! [`SimOutputObserver`] implements `lg_network::SimObserver` and forwards
//! per-tick counters and periodic agent snapshots to an [`OutputWriter`].
//! The CSV backend creates `tick_summaries.csv` and `agent_snapshots.csv`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lg_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! network.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
