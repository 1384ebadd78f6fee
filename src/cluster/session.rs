use crate::api::KvError;
use crate::cluster::endpoint::{ConnectivityState, Connector, Credentials, Endpoint, NodeAddress};
use crate::cluster::operation::{Call, Reply, StreamCall};
use crate::cluster::retry::{RetryExecutor, RetryPolicy};
use crate::cluster::router::{Router, RoutingPreferences};
use crate::cluster::streaming::{EntryStream, StreamingAdapter};
use crate::cluster::time::Clock;
use crate::cluster::topology::{DiscoverySettings, NodeInfo, NodeRole, TopologyDirectory};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub(crate) struct SessionSettings {
    pub(crate) discovery: DiscoverySettings,
    pub(crate) routing: RoutingPreferences,
    pub(crate) retry: RetryPolicy,
}

/// Session is everything one client instance owns on the network side: the topology directory
/// and the executors that route through it.
pub(crate) struct Session {
    logger: slog::Logger,
    address: NodeAddress,
    settings: DiscoverySettings,
    topology: Arc<TopologyDirectory>,
    executor: RetryExecutor,
    streaming: StreamingAdapter,
    // Serializes connect, disconnect and topology refresh.
    lifecycle: Mutex<()>,
    // Set while `connect()` has installed the seed but not finished discovery.
    connecting: AtomicBool,
}

impl Session {
    pub(crate) fn new(
        logger: slog::Logger,
        address: NodeAddress,
        connector: Arc<dyn Connector>,
        credentials: Credentials,
        settings: SessionSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let logger = logger.new(slog::o!("seed" => address.to_string()));
        let topology = Arc::new(TopologyDirectory::new(
            logger.clone(),
            connector,
            credentials,
            settings.discovery,
        ));
        let router = Arc::new(Router::new(topology.clone(), settings.routing));

        Session {
            executor: RetryExecutor::new(logger.clone(), router.clone(), settings.retry, clock),
            streaming: StreamingAdapter::new(logger.clone(), router, settings.retry.request_timeout),
            logger,
            address,
            settings: settings.discovery,
            topology,
            lifecycle: Mutex::new(()),
            connecting: AtomicBool::new(false),
        }
    }

    /// Opens the seed endpoint and runs discovery. A no-op if already connected. Only failing to
    /// reach the seed fails the call; discovery problems are logged.
    pub(crate) async fn connect(&self) -> Result<(), KvError> {
        let _lifecycle = self.lifecycle.lock().await;
        if self.topology.seed().is_some() {
            return Ok(());
        }

        slog::info!(self.logger, "Connecting to {}", self.address);
        let seed = Endpoint::open(
            self.topology.connector(),
            self.address.clone(),
            self.topology.credentials(),
            self.settings.connect_timeout,
        )
        .await?;
        let seed = Arc::new(seed);

        self.connecting.store(true, Ordering::SeqCst);
        for stale in self.topology.install_seed(seed.clone()) {
            stale.close().await;
        }
        let discovered = self.topology.discover(&seed).await;
        self.connecting.store(false, Ordering::SeqCst);

        match discovered {
            Some(info) => slog::info!(
                self.logger,
                "Connected to {} as {:?} ({} replicas known)",
                self.address,
                info.role,
                self.topology.replica_addresses().len()
            ),
            None => slog::info!(self.logger, "Connected to {} without topology", self.address),
        }

        Ok(())
    }

    /// Closes every endpoint the directory holds. Safe to call repeatedly or before `connect()`.
    pub(crate) async fn disconnect(&self) {
        let _lifecycle = self.lifecycle.lock().await;
        let endpoints = self.topology.take_all();
        if endpoints.is_empty() {
            return;
        }

        slog::info!(self.logger, "Disconnecting from {} endpoints", endpoints.len());
        for endpoint in endpoints {
            endpoint.close().await;
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        match self.topology.seed() {
            Some(seed) => seed.state() != ConnectivityState::Shutdown,
            None => false,
        }
    }

    pub(crate) fn connected_role(&self) -> NodeRole {
        self.topology.seed_role()
    }

    pub(crate) async fn execute(&self, call: Call) -> Result<Reply, KvError> {
        self.ensure_connected().await?;
        self.executor.execute(call).await
    }

    pub(crate) async fn open_stream(&self, call: StreamCall) -> Result<EntryStream, KvError> {
        self.ensure_connected().await?;
        self.streaming.open(call).await
    }

    /// Re-runs discovery against the seed.
    pub(crate) async fn refresh_topology(&self) -> Result<Option<NodeInfo>, KvError> {
        self.ensure_connected().await?;
        let _lifecycle = self.lifecycle.lock().await;
        let seed = self.topology.seed().ok_or_else(KvError::not_connected)?;
        Ok(self.topology.discover(&seed).await)
    }

    /// Actively probes the seed, and any replica that has failed since it was last used.
    pub(crate) async fn check_health(&self) -> Result<ConnectivityState, KvError> {
        let seed = self.topology.seed().ok_or_else(KvError::not_connected)?;
        let deadline = Instant::now() + self.executor.policy().request_timeout;

        let state = seed.connectivity_state(true, deadline).await;
        self.topology.probe_replicas().await;
        slog::debug!(self.logger, "Health check of {}: {:?}", seed.address(), state);

        Ok(state)
    }

    /// Callers that race a first `connect()` wait for its discovery, so none of them routes
    /// through a half-built directory.
    async fn ensure_connected(&self) -> Result<(), KvError> {
        if self.topology.seed().is_none() || self.connecting.load(Ordering::SeqCst) {
            self.connect().await?;
        }
        Ok(())
    }
}
