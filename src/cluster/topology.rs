use crate::cluster::endpoint::{Connector, Credentials, Endpoint, NodeAddress};
use crate::cluster::operation::Call;
use crate::grpc::{ProtoNodeAddress, ProtoNodeInfoReply, ProtoNodeInfoReq};
use rand::Rng;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};
use tonic::Status;

/// The role a node reports for itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeRole {
    Primary,
    Replica,
    Unknown,
}

impl NodeRole {
    fn parse(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "primary" => NodeRole::Primary,
            "replica" => NodeRole::Replica,
            _ => NodeRole::Unknown,
        }
    }
}

/// How a read picks among the connected replicas.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReplicaSelection {
    /// Uniform pick among available replicas.
    Random,
    /// Always the lexicographically smallest address.
    Sequential,
    /// Cycle through the available replicas.
    RoundRobin,
}

impl Default for ReplicaSelection {
    fn default() -> Self {
        ReplicaSelection::RoundRobin
    }
}

impl FromStr for ReplicaSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(ReplicaSelection::Random),
            "sequential" => Ok(ReplicaSelection::Sequential),
            "round_robin" => Ok(ReplicaSelection::RoundRobin),
            other => Err(format!(
                "Unknown replica selection strategy '{}', expected one of random, sequential, round_robin",
                other
            )),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeDescriptor {
    pub address: NodeAddress,
    pub available: bool,
}

/// NodeInfo is what a node reports about itself and the cluster around it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeInfo {
    pub node_id: String,
    pub role: NodeRole,
    pub primary: Option<NodeDescriptor>,
    pub replicas: Vec<NodeDescriptor>,
}

impl From<ProtoNodeInfoReply> for NodeInfo {
    fn from(reply: ProtoNodeInfoReply) -> Self {
        NodeInfo {
            node_id: reply.node_id,
            role: NodeRole::parse(&reply.role),
            primary: reply.primary.and_then(descriptor),
            replicas: reply.replicas.into_iter().filter_map(descriptor).collect(),
        }
    }
}

// Descriptors with a port that doesn't fit a u16 are dropped.
fn descriptor(proto: ProtoNodeAddress) -> Option<NodeDescriptor> {
    let port = u16::try_from(proto.port).ok()?;
    Some(NodeDescriptor {
        address: NodeAddress::new(&proto.host, port),
        available: proto.available,
    })
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct DiscoverySettings {
    pub(crate) auto_route_reads: bool,
    pub(crate) auto_route_writes: bool,
    pub(crate) connect_timeout: Duration,
    pub(crate) request_timeout: Duration,
    /// How long a replica that failed at the transport level sits out of selection before it is
    /// tried again.
    pub(crate) replica_retry_interval: Duration,
}

struct DirectoryState {
    seed: Option<Arc<Endpoint>>,
    seed_role: NodeRole,
    primary: Option<Arc<Endpoint>>,
    // Keyed by canonical `host:port`. Ordered, so `Sequential` is just the first available entry.
    replicas: BTreeMap<String, Arc<Endpoint>>,
    cursor: usize,
}

impl DirectoryState {
    fn empty() -> Self {
        DirectoryState {
            seed: None,
            seed_role: NodeRole::Unknown,
            primary: None,
            replicas: BTreeMap::new(),
            cursor: 0,
        }
    }

    fn find(&self, address: &NodeAddress) -> Option<Arc<Endpoint>> {
        let key = address.to_string();
        if let Some(replica) = self.replicas.get(&key) {
            return Some(replica.clone());
        }
        self.primary
            .iter()
            .chain(self.seed.iter())
            .find(|endpoint| endpoint.address() == address)
            .cloned()
    }

    /// Every distinct endpoint held, each exactly once.
    fn distinct_endpoints(&self) -> Vec<Arc<Endpoint>> {
        let mut endpoints: Vec<Arc<Endpoint>> = Vec::new();
        let all = self
            .seed
            .iter()
            .chain(self.primary.iter())
            .chain(self.replicas.values());
        for endpoint in all {
            if !endpoints.iter().any(|known| Arc::ptr_eq(known, endpoint)) {
                endpoints.push(endpoint.clone());
            }
        }
        endpoints
    }
}

/// TopologyDirectory owns every endpoint a client holds: the originally-connected seed, the
/// primary, and the replicas learnt through discovery.
pub(crate) struct TopologyDirectory {
    logger: slog::Logger,
    connector: Arc<dyn Connector>,
    credentials: Credentials,
    settings: DiscoverySettings,
    state: Mutex<DirectoryState>,
}

impl TopologyDirectory {
    pub(crate) fn new(
        logger: slog::Logger,
        connector: Arc<dyn Connector>,
        credentials: Credentials,
        settings: DiscoverySettings,
    ) -> Self {
        TopologyDirectory {
            logger,
            connector,
            credentials,
            settings,
            state: Mutex::new(DirectoryState::empty()),
        }
    }

    pub(crate) fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resets the directory around a freshly opened seed. Returns whatever was held before so the
    /// caller can close it.
    pub(crate) fn install_seed(&self, seed: Arc<Endpoint>) -> Vec<Arc<Endpoint>> {
        let mut state = self.lock_state();
        let previous = state.distinct_endpoints();
        *state = DirectoryState::empty();
        state.seed = Some(seed.clone());
        previous
            .into_iter()
            .filter(|endpoint| !Arc::ptr_eq(endpoint, &seed))
            .collect()
    }

    /// Empties the directory, handing back each distinct endpoint once.
    pub(crate) fn take_all(&self) -> Vec<Arc<Endpoint>> {
        let mut state = self.lock_state();
        let endpoints = state.distinct_endpoints();
        *state = DirectoryState::empty();
        endpoints
    }

    pub(crate) fn seed(&self) -> Option<Arc<Endpoint>> {
        self.lock_state().seed.clone()
    }

    pub(crate) fn seed_role(&self) -> NodeRole {
        self.lock_state().seed_role
    }

    pub(crate) fn is_connected_to_primary(&self) -> bool {
        self.seed_role() == NodeRole::Primary
    }

    pub(crate) fn primary(&self) -> Option<Arc<Endpoint>> {
        self.lock_state().primary.clone()
    }

    pub(crate) fn replica_addresses(&self) -> Vec<String> {
        self.lock_state().replicas.keys().cloned().collect()
    }

    pub(crate) fn select_replica(&self, strategy: ReplicaSelection) -> Option<Arc<Endpoint>> {
        let mut state = self.lock_state();
        let available: Vec<Arc<Endpoint>> = state
            .replicas
            .values()
            .filter(|replica| replica.is_selectable(self.settings.replica_retry_interval))
            .cloned()
            .collect();
        if available.is_empty() {
            return None;
        }

        let index = match strategy {
            ReplicaSelection::Random => rand::thread_rng().gen_range(0..available.len()),
            ReplicaSelection::Sequential => 0,
            ReplicaSelection::RoundRobin => {
                let index = state.cursor % available.len();
                state.cursor = (index + 1) % available.len();
                index
            }
        };

        Some(available[index].clone())
    }

    /// Asks the seed who is who and connects to the rest of the cluster accordingly. Best-effort:
    /// any failure is logged and leaves the directory with whatever it managed to reach.
    pub(crate) async fn discover(&self, seed: &Arc<Endpoint>) -> Option<NodeInfo> {
        let deadline = Instant::now() + self.settings.request_timeout;
        let info = match self.fetch_node_info(seed, deadline).await {
            Ok(info) => info,
            Err(status) => {
                slog::warn!(
                    self.logger,
                    "Topology discovery against {} failed, staying on the seed only: {}",
                    seed.address(),
                    status
                );
                return None;
            }
        };

        let mut primary = None;
        let mut replicas = BTreeMap::new();
        match info.role {
            NodeRole::Primary => {
                primary = Some(seed.clone());
                if self.settings.auto_route_reads {
                    for replica in info.replicas.iter().filter(|replica| replica.available) {
                        let key = replica.address.to_string();
                        if replica.address == *seed.address() || replicas.contains_key(&key) {
                            continue;
                        }
                        if let Some(endpoint) = self.open_or_reuse(&replica.address).await {
                            replicas.insert(key, endpoint);
                        }
                    }
                }
            }
            NodeRole::Replica => {
                if self.settings.auto_route_writes {
                    if let Some(reported) = &info.primary {
                        if reported.address != *seed.address() {
                            primary = self.open_or_reuse(&reported.address).await;
                        }
                    }
                }
            }
            NodeRole::Unknown => {
                slog::warn!(self.logger, "Seed {} reported an unrecognised role", seed.address());
            }
        }

        let superseded = self.swap_topology(seed, info.role, primary, replicas);
        for endpoint in superseded {
            slog::info!(self.logger, "Closing superseded endpoint {}", endpoint.address());
            endpoint.close().await;
        }

        Some(info)
    }

    /// Re-probes replicas that failed at the transport level so they can be selected again.
    pub(crate) async fn probe_replicas(&self) {
        let replicas: Vec<Arc<Endpoint>> = self.lock_state().replicas.values().cloned().collect();
        let deadline = Instant::now() + self.settings.request_timeout;
        for replica in replicas {
            if !replica.is_available() {
                let state = replica.connectivity_state(true, deadline).await;
                slog::info!(self.logger, "Probed replica {}: {:?}", replica.address(), state);
            }
        }
    }

    async fn fetch_node_info(&self, seed: &Endpoint, deadline: Instant) -> Result<NodeInfo, Status> {
        let reply = seed.invoke(Call::GetNodeInfo(ProtoNodeInfoReq {}), deadline).await?;
        reply
            .into_node_info()
            .map(NodeInfo::from)
            .map_err(|e| Status::internal(e.to_string()))
    }

    async fn open_or_reuse(&self, address: &NodeAddress) -> Option<Arc<Endpoint>> {
        if let Some(existing) = self.lock_state().find(address) {
            return Some(existing);
        }

        match Endpoint::open(
            self.connector.as_ref(),
            address.clone(),
            &self.credentials,
            self.settings.connect_timeout,
        )
        .await
        {
            Ok(endpoint) => {
                slog::info!(self.logger, "Connected to discovered node {}", address);
                Some(Arc::new(endpoint))
            }
            Err(e) => {
                slog::warn!(self.logger, "Could not connect to discovered node {}: {}", address, e);
                None
            }
        }
    }

    /// Installs the discovered endpoints and returns the ones no longer referenced. If the seed
    /// was swapped out while discovery ran (disconnect or reconnect), the new endpoints are the
    /// ones returned instead.
    fn swap_topology(
        &self,
        seed: &Arc<Endpoint>,
        role: NodeRole,
        primary: Option<Arc<Endpoint>>,
        replicas: BTreeMap<String, Arc<Endpoint>>,
    ) -> Vec<Arc<Endpoint>> {
        let mut state = self.lock_state();

        let seed_unchanged = matches!(&state.seed, Some(current) if Arc::ptr_eq(current, seed));
        if !seed_unchanged {
            let held = state.distinct_endpoints();
            return primary
                .into_iter()
                .chain(replicas.into_iter().map(|(_, endpoint)| endpoint))
                .filter(|endpoint| !Arc::ptr_eq(endpoint, seed))
                .filter(|endpoint| !held.iter().any(|h| Arc::ptr_eq(h, endpoint)))
                .collect();
        }

        let previous = state.distinct_endpoints();
        state.seed_role = role;
        state.primary = primary;
        state.replicas = replicas;
        state.cursor = 0;

        let current = state.distinct_endpoints();
        previous
            .into_iter()
            .filter(|endpoint| !current.iter().any(|c| Arc::ptr_eq(c, endpoint)))
            .collect()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DirectoryState> {
        self.state.lock().expect("TopologyDirectory state mutex guard poison")
    }
}

impl fmt::Debug for TopologyDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("TopologyDirectory")
            .field("seed", &state.seed)
            .field("seed_role", &state.seed_role)
            .field("primary", &state.primary)
            .field("replicas", &state.replicas.keys().collect::<Vec<_>>())
            .finish()
    }
}
