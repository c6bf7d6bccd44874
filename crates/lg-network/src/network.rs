//! The `Network` struct: graph, router, clock and RNG in one owner.

use lg_core::{AgentId, NodeId, SimConfig, SimRng, Tick};
use tracing::debug;

use crate::router::{DijkstraRouter, Router};
use crate::{Agent, Graph, Hooks, NetworkError, NetworkResult, Node, Transit};

/// A running traffic simulation over one lane graph.
///
/// The network is the single writer: nodes and agents change only through
/// [`tick`](Self::tick), [`run`](Self::run), [`place_agent`](Self::place_agent)
/// and the manual-block controls.  Everything else sees the graph through
/// [`graph`](Self::graph).
pub struct Network<R: Router = DijkstraRouter> {
    pub(crate) graph:      Graph,
    pub(crate) router:     R,
    pub(crate) config:     SimConfig,
    pub(crate) rng:        SimRng,
    pub(crate) clock:      Tick,
    pub(crate) next_agent: u64,
    pub(crate) hooks:      Hooks,
}

impl Network<DijkstraRouter> {
    /// Wrap `graph` with the default router.
    pub fn new(graph: Graph, config: SimConfig) -> NetworkResult<Self> {
        Self::with_router(graph, config, DijkstraRouter)
    }
}

impl<R: Router> Network<R> {
    /// Wrap `graph` with a custom router.
    ///
    /// # Errors
    ///
    /// [`NetworkError::Config`] when `config` fails validation.
    pub fn with_router(graph: Graph, config: SimConfig, router: R) -> NetworkResult<Self> {
        config.validate()?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed = config.seed,
            "network ready"
        );
        let rng = SimRng::new(config.seed);
        Ok(Self {
            graph,
            router,
            config,
            rng,
            clock: Tick::ZERO,
            next_agent: 0,
            hooks: Hooks::default(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn router(&self) -> &R {
        &self.router
    }

    /// The tick that the next call to [`tick`](Self::tick) will process.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock
    }

    /// Spawn and finish callbacks.
    #[inline]
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    #[inline]
    pub fn node_at(&self, x: i32, y: i32) -> Option<&Node> {
        self.graph.node_at(x, y)
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.graph.agent_count()
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Put a new agent bound for `destination` on `node`, already arrived.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if either node is missing,
    /// [`NetworkError::NodeOccupied`] if `node` is full.
    pub fn place_agent(&mut self, node: NodeId, destination: NodeId) -> NetworkResult<AgentId> {
        if !self.graph.contains(destination) {
            return Err(NetworkError::UnknownNode(destination));
        }
        let target = self.graph.node(node).ok_or(NetworkError::UnknownNode(node))?;
        if target.is_full() {
            return Err(NetworkError::NodeOccupied(node));
        }
        let (x, y) = target.position();
        let id = self.next_agent_id();
        if let Some(target) = self.graph.node_mut(node) {
            target.push_occupant(Transit::arrived(Agent::new(id, destination), x, y));
        }
        Ok(id)
    }

    /// Set or clear the operator block on `node`.
    pub fn set_manual_block(&mut self, node: NodeId, blocked: bool) -> NetworkResult<()> {
        let target = self.graph.node_mut(node).ok_or(NetworkError::UnknownNode(node))?;
        target.set_manual_block(blocked);
        Ok(())
    }

    /// Flip the operator block on `node`, returning the new state.
    pub fn toggle_manual_block(&mut self, node: NodeId) -> NetworkResult<bool> {
        let target = self.graph.node_mut(node).ok_or(NetworkError::UnknownNode(node))?;
        let blocked = !target.is_manually_blocked();
        target.set_manual_block(blocked);
        Ok(blocked)
    }

    pub(crate) fn next_agent_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        id
    }
}
