//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use lg_core::Tick;
use lg_network::{Graph, SimObserver, TickReport};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and agent snapshots to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `network.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Snapshot rows written so far.
    pub fn snapshot_rows(&self) -> u64 {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let row = TickSummaryRow {
            tick:           tick.0,
            spawned:        report.spawned as u64,
            finished:       report.finished as u64,
            dropped:        report.dropped as u64,
            moved:          report.moved as u64,
            stalled:        report.stalled as u64,
            blocks_started: report.blocks_started as u64,
            in_flight:      report.in_flight as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, graph: &Graph) {
        let rows: Vec<AgentSnapshotRow> = graph
            .nodes()
            .flat_map(|node| {
                node.occupants().iter().map(move |t| {
                    let [x, y] = t.position(node.x(), node.y());
                    AgentSnapshotRow {
                        agent_id:    t.agent().id.0,
                        tick:        tick.0,
                        node:        node.id().0,
                        x,
                        y,
                        destination: t.agent().destination.0,
                        remaining:   t.remaining(),
                    }
                })
            })
            .collect();

        if !rows.is_empty() {
            self.rows += rows.len() as u64;
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
