//! The discrete tick: block decay, plan, apply, spawn.
//!
//! # Two-phase step
//!
//! ```text
//! tick t:
//!   ① Decay : every node's congestion countdown drops by one.
//!   ② Plan  : each node maps its occupants to Steps against the
//!              start-of-tick graph (parallel with the `parallel` feature).
//!   ③ Apply : nodes in ascending NodeId order, occupants in arrival order:
//!                Advance → remaining -= 1
//!                Finish  → remove, fire finish
//!                NoRoute → stay (dropped on a House)
//!                Hop     → admit against the start-of-tick snapshot,
//!                          or stall and maybe block the current node
//!   ④ Commit: staged arrivals land, staged blocks start.
//!   ⑤ Spawn : house pairing (see `spawn.rs`).
//! ```
//!
//! Admission only ever consumes free slots counted at the start of the tick,
//! so an agent leaving a node does not make room for another agent in the
//! same tick.  This keeps the outcome independent of scan order except for
//! which of several contenders gets the last slot (lowest source id wins).

use lg_core::{NodeId, NodeMap, TileType};
use tracing::{debug, info};

use crate::node::Step;
use crate::router::Router;
use crate::{Network, NoopObserver, SimObserver, TickReport, Transit};

/// Start-of-tick entry state of one node.
#[derive(Copy, Clone, Debug)]
struct Admission {
    free:    usize,
    blocked: bool,
}

impl Admission {
    fn admit(&mut self) -> bool {
        if self.blocked || self.free == 0 {
            return false;
        }
        self.free -= 1;
        true
    }
}

/// Staged effects of the apply phase.
struct Scratch {
    admission: NodeMap<Admission>,
    arrivals:  Vec<(NodeId, Transit)>,
    blocks:    Vec<(NodeId, u32)>,
    report:    TickReport,
}

impl<R: Router> Network<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the network by one tick with no observer.
    pub fn tick(&mut self) -> TickReport {
        self.tick_with(&mut NoopObserver)
    }

    /// Advance the network by one tick, reporting to `observer`.
    pub fn tick_with<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> TickReport {
        let now = self.clock;
        observer.on_tick_start(now);

        for node in self.graph.nodes.values_mut() {
            node.decay_block();
        }

        let plans = self.plan_moves();

        let mut scratch = Scratch {
            admission: self.admission_snapshot(),
            arrivals:  Vec::new(),
            blocks:    Vec::new(),
            report:    TickReport { tick: now, ..TickReport::default() },
        };
        for (id, steps) in plans {
            self.apply_node(id, steps, &mut scratch, observer);
        }

        for (target, transit) in scratch.arrivals {
            if let Some(node) = self.graph.node_mut(target) {
                node.push_occupant(transit);
            }
        }
        for (id, ticks) in scratch.blocks {
            if let Some(node) = self.graph.node_mut(id) {
                node.block_for(ticks);
                debug!(%id, ticks, "congestion block");
                observer.on_block(id, ticks);
            }
        }

        let mut report = scratch.report;
        self.spawn(observer, &mut report);
        report.in_flight = self.graph.agent_count();

        observer.on_tick_end(now, &report);
        self.clock = now.next();
        report
    }

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Use [`NoopObserver`] if you don't need callbacks.
    pub fn run<O: SimObserver + ?Sized>(&mut self, observer: &mut O) {
        info!(from = %self.clock, to = %self.config.end_tick(), agents = self.graph.agent_count(), "run start");
        while self.clock < self.config.end_tick() {
            self.step(observer);
        }
        info!(tick = %self.clock, agents = self.graph.agent_count(), "run end");
        observer.on_sim_end(self.clock);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn step<O: SimObserver + ?Sized>(&mut self, observer: &mut O) {
        let report = self.tick_with(observer);
        if report.tick.on_interval(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(report.tick, &self.graph);
        }
    }

    /// Plan every occupied node against the current graph.
    ///
    /// With the `parallel` Cargo feature the nodes are planned on Rayon's
    /// thread pool; `collect` keeps ascending id order either way.
    fn plan_moves(&self) -> Vec<(NodeId, Vec<Step>)> {
        let graph  = &self.graph;
        let router = &self.router;

        #[cfg(not(feature = "parallel"))]
        {
            graph
                .nodes
                .iter()
                .filter(|(_, node)| !node.occupants().is_empty())
                .map(|(&id, node)| (id, node.plan(graph, router)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            graph
                .nodes
                .par_iter()
                .filter(|(_, node)| !node.occupants().is_empty())
                .map(|(&id, node)| (id, node.plan(graph, router)))
                .collect()
        }
    }

    fn admission_snapshot(&self) -> NodeMap<Admission> {
        self.graph
            .nodes
            .iter()
            .map(|(&id, node)| {
                let free = node.capacity().saturating_sub(node.occupants().len());
                (id, Admission { free, blocked: node.is_blocked() })
            })
            .collect()
    }

    fn apply_node<O: SimObserver + ?Sized>(
        &mut self,
        id:       NodeId,
        steps:    Vec<Step>,
        scratch:  &mut Scratch,
        observer: &mut O,
    ) {
        let Some(node) = self.graph.node_mut(id) else { return };
        let (x, y) = node.position();
        let is_house = node.tile() == TileType::House;
        let occupants = node.take_occupants();

        let mut stays = Vec::with_capacity(occupants.len());
        for (mut transit, step) in occupants.into_iter().zip(steps) {
            match step {
                Step::Advance => {
                    transit.advance();
                    stays.push(transit);
                }
                Step::Finish => {
                    scratch.report.finished += 1;
                    self.hooks.fire_finish();
                    observer.on_finish(transit.agent(), id);
                }
                Step::NoRoute if is_house => {
                    scratch.report.dropped += 1;
                    observer.on_drop(transit.agent(), id);
                }
                Step::NoRoute => stays.push(transit),
                Step::Hop(hop) => {
                    let admitted = scratch
                        .admission
                        .get_mut(&hop.node)
                        .is_some_and(Admission::admit);
                    if admitted {
                        scratch.report.moved += 1;
                        scratch
                            .arrivals
                            .push((hop.node, Transit::new(transit.agent(), hop.weight, x, y)));
                    } else {
                        scratch.report.stalled += 1;
                        stays.push(transit);
                        if self.rng.gen_bool(self.config.block_probability) {
                            let ticks = self
                                .rng
                                .gen_range(self.config.block_ticks_min..=self.config.block_ticks_max);
                            scratch.blocks.push((id, ticks));
                            scratch.report.blocks_started += 1;
                        }
                    }
                }
            }
        }

        if let Some(node) = self.graph.node_mut(id) {
            node.set_occupants(stays);
        }
    }
}
