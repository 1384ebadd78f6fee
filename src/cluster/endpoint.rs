use crate::api::KvError;
use crate::cluster::operation::{Call, Reply, StreamCall};
use crate::grpc::ProtoKeyValue;
use std::fmt;
use std::sync::Mutex;
use tokio::time::{Duration, Instant};
use tonic::{Code, Status};

/// NodeAddress is a cluster node's network address. Its `Display` form is the canonical
/// `host:port` string used as a directory key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeAddress {
    host: String,
    port: u16,
}

impl NodeAddress {
    pub fn new(host: impl AsRef<str>, port: u16) -> Self {
        let host = host.as_ref().trim().trim_start_matches('[').trim_end_matches(']');
        NodeAddress {
            host: host.to_ascii_lowercase(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// PEM material handed to the transport as-is.
#[derive(Clone, Debug, Default)]
pub struct TlsCredentials {
    /// CA bundle used to verify the server. Falls back to the transport's defaults when absent.
    pub ca_certificate_pem: Option<Vec<u8>>,
    /// Client certificate for mutual TLS. Must be set together with `client_key_pem`.
    pub client_certificate_pem: Option<Vec<u8>>,
    pub client_key_pem: Option<Vec<u8>>,
    /// Overrides the name checked against the server certificate.
    pub domain_name: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum Credentials {
    Insecure,
    Tls(TlsCredentials),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConnectivityState {
    Connecting,
    Ready,
    TransientFailure,
    Shutdown,
}

/// Connection is one live transport to one node.
#[async_trait::async_trait]
pub(crate) trait Connection: Send + Sync {
    async fn invoke(&self, call: Call, deadline: Instant) -> Result<Reply, Status>;

    async fn invoke_streaming(&self, call: StreamCall, deadline: Instant) -> Result<Box<dyn ChunkSource>, Status>;

    /// Cheap round trip used to check the node is answering.
    async fn probe(&self, deadline: Instant) -> Result<(), Status>;

    async fn close(&self);
}

/// ChunkSource is the receiving half of an open server-streaming call. `Ok(None)` is the server's
/// end of stream. Dropping it cancels the call.
#[async_trait::async_trait]
pub(crate) trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Result<Option<Vec<ProtoKeyValue>>, Status>;
}

/// Connector establishes transports. It does not enforce a timeout itself, `Endpoint::open` does.
#[async_trait::async_trait]
pub(crate) trait Connector: Send + Sync {
    async fn connect(&self, address: &NodeAddress, credentials: &Credentials) -> Result<Box<dyn Connection>, KvError>;
}

/// Endpoint is a connected handle to one cluster node. Only the topology directory and router hold
/// on to endpoints; callers get one for the duration of a single call.
pub(crate) struct Endpoint {
    address: NodeAddress,
    connection: Box<dyn Connection>,
    state: Mutex<ConnectivityState>,
    // When the endpoint last went into `TransientFailure`.
    failed_at: Mutex<Option<Instant>>,
}

impl Endpoint {
    pub(crate) async fn open(
        connector: &dyn Connector,
        address: NodeAddress,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, KvError> {
        let connection = match tokio::time::timeout(timeout, connector.connect(&address, credentials)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(KvError::Timeout {
                    message: format!("Connecting to {} took longer than {}ms", address, timeout.as_millis()),
                })
            }
        };

        Ok(Self::with_connection(address, connection))
    }

    pub(crate) fn with_connection(address: NodeAddress, connection: Box<dyn Connection>) -> Self {
        Endpoint {
            address,
            connection,
            state: Mutex::new(ConnectivityState::Ready),
            failed_at: Mutex::new(None),
        }
    }

    pub(crate) fn address(&self) -> &NodeAddress {
        &self.address
    }

    pub(crate) async fn invoke(&self, call: Call, deadline: Instant) -> Result<Reply, Status> {
        self.check_open()?;
        let result = self.connection.invoke(call, deadline).await;
        self.observe(result.as_ref().err());
        result
    }

    pub(crate) async fn invoke_streaming(
        &self,
        call: StreamCall,
        deadline: Instant,
    ) -> Result<Box<dyn ChunkSource>, Status> {
        self.check_open()?;
        let result = self.connection.invoke_streaming(call, deadline).await;
        self.observe(result.as_ref().err());
        result
    }

    /// Non-blocking unless `probe` is set, in which case the node is pinged and the result recorded.
    pub(crate) async fn connectivity_state(&self, probe: bool, deadline: Instant) -> ConnectivityState {
        let current = self.state();
        if !probe || current == ConnectivityState::Shutdown {
            return current;
        }

        self.set_state(ConnectivityState::Connecting);
        let result = self.connection.probe(deadline).await;
        match result {
            Ok(()) => self.set_state(ConnectivityState::Ready),
            Err(_) => self.set_state(ConnectivityState::TransientFailure),
        }
        self.state()
    }

    pub(crate) fn state(&self) -> ConnectivityState {
        *self.state.lock().expect("Endpoint.state() mutex guard poison")
    }

    pub(crate) fn is_available(&self) -> bool {
        matches!(self.state(), ConnectivityState::Ready | ConnectivityState::Connecting)
    }

    /// Available, or failed at least `retry_after` ago and due for another try. The next call
    /// through it settles the state again.
    pub(crate) fn is_selectable(&self, retry_after: Duration) -> bool {
        match self.state() {
            ConnectivityState::Ready | ConnectivityState::Connecting => true,
            ConnectivityState::TransientFailure => {
                let failed_at = *self.failed_at.lock().expect("Endpoint.failed_at mutex guard poison");
                failed_at.map_or(true, |at| at.elapsed() >= retry_after)
            }
            ConnectivityState::Shutdown => false,
        }
    }

    pub(crate) async fn close(&self) {
        {
            let mut state = self.state.lock().expect("Endpoint.close() mutex guard poison");
            if *state == ConnectivityState::Shutdown {
                return;
            }
            *state = ConnectivityState::Shutdown;
        }
        self.connection.close().await;
    }

    fn check_open(&self) -> Result<(), Status> {
        if self.state() == ConnectivityState::Shutdown {
            return Err(Status::unavailable(format!("Endpoint {} is closed", self.address)));
        }
        Ok(())
    }

    fn observe(&self, error: Option<&Status>) {
        let mut state = self.state.lock().expect("Endpoint.observe() mutex guard poison");
        if *state == ConnectivityState::Shutdown {
            return;
        }
        match error {
            None => *state = ConnectivityState::Ready,
            Some(status) if status.code() == Code::Unavailable => {
                *state = ConnectivityState::TransientFailure;
                self.mark_failed();
            }
            // Application-level failures say nothing about the transport.
            Some(_) => {}
        }
    }

    fn set_state(&self, new_state: ConnectivityState) {
        let mut state = self.state.lock().expect("Endpoint.set_state() mutex guard poison");
        if *state != ConnectivityState::Shutdown {
            *state = new_state;
            if new_state == ConnectivityState::TransientFailure {
                self.mark_failed();
            }
        }
    }

    fn mark_failed(&self) {
        *self.failed_at.lock().expect("Endpoint.failed_at mutex guard poison") = Some(Instant::now());
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("address", &self.address)
            .field("state", &self.state())
            .finish()
    }
}
