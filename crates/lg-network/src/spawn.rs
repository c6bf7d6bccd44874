//! House-to-house spawn policy.

use lg_core::{NodeId, TileType};
use tracing::trace;

use crate::router::Router;
use crate::{Agent, Network, SimObserver, TickReport, Transit};

impl<R: Router> Network<R> {
    /// Pair up volunteering houses and start one agent per pair.
    ///
    /// Each house rolls `spawn_probability` in ascending id order; the
    /// volunteers are shuffled and taken two at a time as
    /// `(destination, origin)`.  A pair spawns only if the origin is open and
    /// has room.  An odd volunteer out is ignored.
    pub(crate) fn spawn<O: SimObserver + ?Sized>(&mut self, observer: &mut O, report: &mut TickReport) {
        let p = self.config.spawn_probability;
        if p <= 0.0 {
            return;
        }

        let houses: Vec<NodeId> = self.graph.nodes_of(TileType::House).map(|n| n.id()).collect();
        let mut volunteers: Vec<NodeId> = houses
            .into_iter()
            .filter(|_| self.rng.gen_bool(p))
            .collect();
        self.rng.shuffle(&mut volunteers);

        for pair in volunteers.chunks_exact(2) {
            let (destination, origin) = (pair[0], pair[1]);
            let Some(node) = self.graph.node(origin) else { continue };
            if !node.has_room() {
                continue;
            }
            let (x, y) = node.position();
            let agent = Agent::new(self.next_agent_id(), destination);
            if let Some(node) = self.graph.node_mut(origin) {
                node.push_occupant(Transit::arrived(agent, x, y));
            }
            trace!(agent = %agent.id, %origin, %destination, "spawn");
            report.spawned += 1;
            self.hooks.fire_spawn();
            observer.on_spawn(agent, origin);
        }
    }
}
