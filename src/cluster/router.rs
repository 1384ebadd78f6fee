use crate::api::KvError;
use crate::cluster::endpoint::Endpoint;
use crate::cluster::operation::Access;
use crate::cluster::topology::{NodeRole, ReplicaSelection, TopologyDirectory};
use std::sync::Arc;

#[derive(Copy, Clone, Debug)]
pub(crate) struct RoutingPreferences {
    pub(crate) auto_route_reads: bool,
    pub(crate) auto_route_writes: bool,
    pub(crate) prefer_replica: bool,
    pub(crate) replica_selection: ReplicaSelection,
}

/// Router decides which endpoint receives a call. It never opens or closes anything itself.
pub(crate) struct Router {
    topology: Arc<TopologyDirectory>,
    preferences: RoutingPreferences,
}

impl Router {
    pub(crate) fn new(topology: Arc<TopologyDirectory>, preferences: RoutingPreferences) -> Self {
        Router { topology, preferences }
    }

    pub(crate) fn pick(&self, access: Access) -> Result<Arc<Endpoint>, KvError> {
        match access {
            Access::Read => self.pick_for_read(),
            Access::Write => self.pick_for_write(),
        }
    }

    pub(crate) fn pick_for_read(&self) -> Result<Arc<Endpoint>, KvError> {
        let seed = self.seed()?;
        if !self.preferences.auto_route_reads || !self.preferences.prefer_replica {
            return Ok(seed);
        }
        // Already on a replica: reads stay there rather than bouncing to the primary.
        if self.topology.seed_role() == NodeRole::Replica {
            return Ok(seed);
        }

        Ok(self
            .topology
            .select_replica(self.preferences.replica_selection)
            .unwrap_or(seed))
    }

    pub(crate) fn pick_for_write(&self) -> Result<Arc<Endpoint>, KvError> {
        let seed = self.seed()?;
        if !self.preferences.auto_route_writes || self.topology.is_connected_to_primary() {
            return Ok(seed);
        }

        Ok(self.topology.primary().unwrap_or(seed))
    }

    /// The primary as a redirect target for reads that hit a read-only node. `None` when no
    /// primary is known.
    pub(crate) fn primary(&self) -> Option<Arc<Endpoint>> {
        self.topology.primary()
    }

    fn seed(&self) -> Result<Arc<Endpoint>, KvError> {
        self.topology.seed().ok_or_else(KvError::not_connected)
    }
}
