//! Observer trait, tick reports and zero-argument hooks.

use lg_core::{NodeId, Tick};

use crate::{Agent, Graph};

// ── TickReport ────────────────────────────────────────────────────────────────

/// Counters for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick:           Tick,
    /// Agents created by the spawn policy.
    pub spawned:        usize,
    /// Agents removed at their destination.
    pub finished:       usize,
    /// Agents removed from a house with no path.
    pub dropped:        usize,
    /// Agents admitted to their next node.
    pub moved:          usize,
    /// Ready agents refused by a full or blocked next node.
    pub stalled:        usize,
    /// Congestion blocks started by stalls.
    pub blocks_started: usize,
    /// Agents in the network after the tick.
    pub in_flight:      usize,
}

// ── SimObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Network::run`][crate::Network::run] and
/// [`Network::tick_with`][crate::Network::tick_with].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} agents in flight", report.in_flight);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A new agent appeared at `origin`.
    fn on_spawn(&mut self, _agent: Agent, _origin: NodeId) {}

    /// `agent` reached its destination `node` and left the network.
    fn on_finish(&mut self, _agent: Agent, _node: NodeId) {}

    /// `agent` was discarded at house `node` because no path exists.
    fn on_drop(&mut self, _agent: Agent, _node: NodeId) {}

    /// `node` became blocked for at least `ticks` ticks.
    fn on_block(&mut self, _node: NodeId, _ticks: u32) {}

    /// Called at the end of each tick with its counters.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with read-only access to the whole graph.
    fn on_snapshot(&mut self, _tick: Tick, _graph: &Graph) {}

    /// Called once after the final tick of [`Network::run`][crate::Network::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── Hooks ─────────────────────────────────────────────────────────────────────

type Hook = Box<dyn FnMut() + Send>;

/// Zero-argument callbacks fired synchronously on every spawn and finish.
///
/// Lighter than a [`SimObserver`] and stored on the network, so they stay
/// active across `tick` calls.
#[derive(Default)]
pub struct Hooks {
    spawn:  Option<Hook>,
    finish: Option<Hook>,
}

impl Hooks {
    /// Replace the spawn callback.
    pub fn on_spawn(&mut self, hook: impl FnMut() + Send + 'static) -> &mut Self {
        self.spawn = Some(Box::new(hook));
        self
    }

    /// Replace the finish callback.
    pub fn on_finish(&mut self, hook: impl FnMut() + Send + 'static) -> &mut Self {
        self.finish = Some(Box::new(hook));
        self
    }

    /// Remove both callbacks.
    pub fn clear(&mut self) {
        self.spawn = None;
        self.finish = None;
    }

    pub(crate) fn fire_spawn(&mut self) {
        if let Some(hook) = self.spawn.as_mut() {
            hook();
        }
    }

    pub(crate) fn fire_finish(&mut self) {
        if let Some(hook) = self.finish.as_mut() {
            hook();
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("spawn", &self.spawn.is_some())
            .field("finish", &self.finish.is_some())
            .finish()
    }
}
