use crate::api::KvError;
use crate::cluster::endpoint::{ChunkSource, Connection, Connector, Credentials, Endpoint, NodeAddress};
use crate::cluster::operation::{Call, Method, Reply, StreamCall};
use crate::cluster::retry::RetryPolicy;
use crate::cluster::router::{Router, RoutingPreferences};
use crate::cluster::session::{Session, SessionSettings};
pub(crate) use crate::cluster::time::RecordingClock;
use crate::cluster::topology::{DiscoverySettings, ReplicaSelection, TopologyDirectory};
use crate::grpc::{ProtoKeyValue, ProtoNodeAddress, ProtoNodeInfoReply};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};
use tonic::{Code, Status};

type Handler = Box<dyn Fn(&Call, usize) -> Result<Reply, Status> + Send + Sync>;

/// FakeCluster is an in-process `Connector`. Nodes are looked up by canonical address; connecting
/// to an address that was never added fails like a refused connection.
pub(crate) struct FakeCluster {
    nodes: Mutex<HashMap<String, Arc<FakeNode>>>,
}

impl FakeCluster {
    pub(crate) fn new() -> Self {
        FakeCluster {
            nodes: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn add(&self, node: FakeNode) -> Arc<FakeNode> {
        let node = Arc::new(node);
        self.nodes
            .lock()
            .unwrap()
            .insert(node.address.to_string(), node.clone());
        node
    }

    pub(crate) async fn open_endpoint(&self, host: &str, port: u16) -> Arc<Endpoint> {
        let endpoint = Endpoint::open(
            self,
            NodeAddress::new(host, port),
            &Credentials::Insecure,
            Duration::from_secs(5),
        )
        .await
        .expect("Fake node should be reachable");
        Arc::new(endpoint)
    }
}

#[async_trait::async_trait]
impl Connector for FakeCluster {
    async fn connect(&self, address: &NodeAddress, _credentials: &Credentials) -> Result<Box<dyn Connection>, KvError> {
        let node = self.nodes.lock().unwrap().get(&address.to_string()).cloned();
        let node = node.ok_or_else(|| KvError::Connection {
            message: format!("Connection refused by {}", address),
            code: None,
        })?;

        if let Some(delay) = node.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if !node.reachable.load(Ordering::SeqCst) {
            return Err(KvError::Connection {
                message: format!("Connection refused by {}", address),
                code: None,
            });
        }

        Ok(Box::new(FakeConnection { node }))
    }
}

pub(crate) struct FakeNode {
    address: NodeAddress,
    handler: Handler,
    node_info: Mutex<Option<ProtoNodeInfoReply>>,
    scan_chunks: Vec<Vec<ProtoKeyValue>>,
    stream_end: StreamEnd,
    connect_delay: Option<Duration>,
    reachable: AtomicBool,
    handler_calls: AtomicUsize,
    close_count: AtomicUsize,
    streams_dropped: Arc<AtomicUsize>,
    methods: Mutex<Vec<Method>>,
    last_stream_call: Mutex<Option<StreamCall>>,
}

impl FakeNode {
    pub(crate) fn new(host: &str, port: u16) -> Self {
        FakeNode {
            address: NodeAddress::new(host, port),
            handler: Box::new(|call, _| Err(Status::unimplemented(format!("{:?}", call.method())))),
            node_info: Mutex::new(None),
            scan_chunks: Vec::new(),
            stream_end: StreamEnd::Finish,
            connect_delay: None,
            reachable: AtomicBool::new(true),
            handler_calls: AtomicUsize::new(0),
            close_count: AtomicUsize::new(0),
            streams_dropped: Arc::new(AtomicUsize::new(0)),
            methods: Mutex::new(Vec::new()),
            last_stream_call: Mutex::new(None),
        }
    }

    /// The handler answers every unary call except `GetNodeInfo`. It also receives how many calls
    /// it answered before this one.
    pub(crate) fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Call, usize) -> Result<Reply, Status> + Send + Sync + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    pub(crate) fn with_node_info(self, node_info: ProtoNodeInfoReply) -> Self {
        self.set_node_info(node_info);
        self
    }

    /// Changes what the node reports from now on, e.g. to simulate a failover.
    pub(crate) fn set_node_info(&self, node_info: ProtoNodeInfoReply) {
        *self.node_info.lock().unwrap() = Some(node_info);
    }

    pub(crate) fn with_scan_chunks(mut self, chunks: Vec<Vec<ProtoKeyValue>>) -> Self {
        self.scan_chunks = chunks;
        self
    }

    /// What the stream does once the scripted chunks run out.
    pub(crate) fn with_stream_end(mut self, end: StreamEnd) -> Self {
        self.stream_end = end;
        self
    }

    pub(crate) fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub(crate) fn handler_calls(&self) -> usize {
        self.handler_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    pub(crate) fn streams_dropped(&self) -> usize {
        self.streams_dropped.load(Ordering::SeqCst)
    }

    /// Every method this node was asked to serve, node-info calls included.
    pub(crate) fn methods(&self) -> Vec<Method> {
        self.methods.lock().unwrap().clone()
    }

    pub(crate) fn last_stream_call(&self) -> Option<StreamCall> {
        self.last_stream_call.lock().unwrap().clone()
    }

    fn record(&self, method: Method) {
        self.methods.lock().unwrap().push(method);
    }

    fn check_reachable(&self) -> Result<(), Status> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Status::unavailable(format!("{} is unreachable", self.address)))
        }
    }

    fn node_info_reply(&self) -> Result<Reply, Status> {
        self.node_info
            .lock()
            .unwrap()
            .clone()
            .map(Reply::NodeInfo)
            .ok_or_else(|| Status::unimplemented("GetNodeInfo"))
    }
}

#[derive(Clone, Debug)]
pub(crate) enum StreamEnd {
    Finish,
    Fail(Code, &'static str),
    /// Never yields again.
    Stall,
}

struct FakeConnection {
    node: Arc<FakeNode>,
}

#[async_trait::async_trait]
impl Connection for FakeConnection {
    async fn invoke(&self, call: Call, _deadline: Instant) -> Result<Reply, Status> {
        self.node.record(call.method());
        self.node.check_reachable()?;

        if let Call::GetNodeInfo(_) = call {
            return self.node.node_info_reply();
        }

        let n = self.node.handler_calls.fetch_add(1, Ordering::SeqCst);
        (self.node.handler)(&call, n)
    }

    async fn invoke_streaming(&self, call: StreamCall, _deadline: Instant) -> Result<Box<dyn ChunkSource>, Status> {
        self.node.record(call.method());
        self.node.check_reachable()?;
        *self.node.last_stream_call.lock().unwrap() = Some(call);

        Ok(Box::new(FakeChunkSource {
            chunks: self.node.scan_chunks.iter().cloned().collect(),
            end: self.node.stream_end.clone(),
            dropped: self.node.streams_dropped.clone(),
        }))
    }

    async fn probe(&self, _deadline: Instant) -> Result<(), Status> {
        self.node.check_reachable()
    }

    async fn close(&self) {
        self.node.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

struct FakeChunkSource {
    chunks: VecDeque<Vec<ProtoKeyValue>>,
    end: StreamEnd,
    dropped: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl ChunkSource for FakeChunkSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<ProtoKeyValue>>, Status> {
        if let Some(chunk) = self.chunks.pop_front() {
            return Ok(Some(chunk));
        }
        match &self.end {
            StreamEnd::Finish => Ok(None),
            StreamEnd::Fail(code, message) => Err(Status::new(*code, *message)),
            StreamEnd::Stall => std::future::pending().await,
        }
    }
}

impl Drop for FakeChunkSource {
    fn drop(&mut self) {
        self.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn discovery_settings() -> DiscoverySettings {
    DiscoverySettings {
        auto_route_reads: true,
        auto_route_writes: true,
        connect_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(1),
        // Long enough that a failed replica stays out for the whole test.
        replica_retry_interval: Duration::from_secs(60),
    }
}

/// Sequential selection, so tests know which replica a read lands on.
pub(crate) fn routing_preferences() -> RoutingPreferences {
    RoutingPreferences {
        auto_route_reads: true,
        auto_route_writes: true,
        prefer_replica: true,
        replica_selection: ReplicaSelection::Sequential,
    }
}

/// Opens the seed at `host:port`, runs discovery and wraps the result in a router.
pub(crate) async fn connect_router(
    cluster: &Arc<FakeCluster>,
    host: &str,
    port: u16,
    preferences: RoutingPreferences,
) -> Router {
    let topology = Arc::new(TopologyDirectory::new(
        test_logger(),
        cluster.clone(),
        Credentials::Insecure,
        discovery_settings(),
    ));
    let seed = cluster.open_endpoint(host, port).await;
    topology.install_seed(seed.clone());
    topology.discover(&seed).await;
    Router::new(topology, preferences)
}

/// A session over the fake cluster with three quick retries. Not yet connected.
pub(crate) fn fake_session(cluster: &Arc<FakeCluster>, host: &str, port: u16) -> Arc<Session> {
    Arc::new(Session::new(
        test_logger(),
        NodeAddress::new(host, port),
        cluster.clone(),
        Credentials::Insecure,
        SessionSettings {
            discovery: discovery_settings(),
            routing: routing_preferences(),
            retry: RetryPolicy {
                max_retries: 3,
                retry_delay: Duration::from_millis(100),
                request_timeout: Duration::from_secs(1),
            },
        },
        Arc::new(RecordingClock::new()),
    ))
}

pub(crate) fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

pub(crate) fn node_address(host: &str, port: u16, available: bool) -> ProtoNodeAddress {
    ProtoNodeAddress {
        host: host.to_string(),
        port: port as u32,
        available,
    }
}

pub(crate) fn primary_info(replicas: Vec<ProtoNodeAddress>) -> ProtoNodeInfoReply {
    ProtoNodeInfoReply {
        node_id: "primary".to_string(),
        role: "primary".to_string(),
        primary: None,
        replicas,
    }
}

pub(crate) fn replica_info(primary: ProtoNodeAddress) -> ProtoNodeInfoReply {
    ProtoNodeInfoReply {
        node_id: "replica".to_string(),
        role: "replica".to_string(),
        primary: Some(primary),
        replicas: Vec::new(),
    }
}

pub(crate) fn kv(key: &str, value: &str) -> ProtoKeyValue {
    ProtoKeyValue {
        key: key.as_bytes().to_vec(),
        value: value.as_bytes().to_vec(),
    }
}
