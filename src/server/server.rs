use crate::grpc::grpc_kv_server::{GrpcKv, GrpcKvServer};
use crate::grpc::{
    proto_batch_op, ProtoBatchWriteReply, ProtoBatchWriteReq, ProtoBeginTxnReply, ProtoBeginTxnReq, ProtoCompactReply,
    ProtoCompactReq, ProtoDeleteReply, ProtoDeleteReq, ProtoGetReply, ProtoGetReq, ProtoKeyValue, ProtoLatencySummary,
    ProtoNodeAddress, ProtoNodeInfoReply, ProtoNodeInfoReq, ProtoPutReply, ProtoPutReq, ProtoRecoveryStats,
    ProtoScanReply, ProtoScanReq, ProtoStatsReply, ProtoStatsReq, ProtoTxnDeleteReq, ProtoTxnGetReq, ProtoTxnPutReq,
    ProtoTxnReply, ProtoTxnReq, ProtoTxnScanReq,
};
use crate::server::{shutdown_signal, KvServerShutdownHandle, KvServerShutdownSignal};
use futures::stream;
use std::collections::{BTreeMap, HashMap};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::{Arc, Mutex};
use tokio::time::Duration;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

// Small, so even short scans arrive in several chunks.
const SCAN_CHUNK_SIZE: usize = 2;

type ScanReplies = stream::Iter<std::vec::IntoIter<Result<ProtoScanReply, Status>>>;

#[derive(Clone, Debug)]
pub(crate) enum ServerRole {
    Primary { replica_ports: Vec<u16> },
    Replica { primary_port: u16 },
}

#[derive(Default)]
struct PendingTransaction {
    read_only: bool,
    // `None` marks a delete.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

#[derive(Default)]
struct Store {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    transactions: HashMap<String, PendingTransaction>,
    next_transaction_id: u64,
    reads: u64,
    writes: u64,
    deletes: u64,
}

impl Store {
    fn transaction(&mut self, id: &str) -> Result<&mut PendingTransaction, Status> {
        self.transactions
            .get_mut(id)
            .ok_or_else(|| Status::not_found(format!("Unknown transaction {}", id)))
    }
}

/// InMemoryKvServer serves the KV gRPC interface from a map in memory. Replicas share their
/// primary's map, so they are never stale, but they refuse writes the way a real replica does.
pub(crate) struct InMemoryKvServer {
    logger: slog::Logger,
    node_id: String,
    port: u16,
    role: ServerRole,
    store: Arc<Mutex<Store>>,
    started_at_unix_ms: i64,
}

impl InMemoryKvServer {
    pub(crate) fn primary(logger: slog::Logger, port: u16, replica_ports: Vec<u16>) -> Self {
        InMemoryKvServer {
            logger,
            node_id: format!("primary-{}", port),
            port,
            role: ServerRole::Primary { replica_ports },
            store: Arc::new(Mutex::new(Store::default())),
            started_at_unix_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub(crate) fn replica_of(primary: &InMemoryKvServer, port: u16) -> Self {
        InMemoryKvServer {
            logger: primary.logger.clone(),
            node_id: format!("replica-{}", port),
            port,
            role: ServerRole::Replica {
                primary_port: primary.port,
            },
            store: primary.store.clone(),
            started_at_unix_ms: primary.started_at_unix_ms,
        }
    }

    pub(crate) async fn run(self, shutdown_signal: KvServerShutdownSignal) {
        let logger = self.logger.clone();
        let socket_addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, self.port));
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcKvServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("InMemoryKvServer store mutex guard poison")
    }

    fn check_writable(&self) -> Result<(), Status> {
        match self.role {
            ServerRole::Primary { .. } => Ok(()),
            ServerRole::Replica { .. } => Err(Status::failed_precondition(format!(
                "{} is a read-only replica",
                self.node_id
            ))),
        }
    }

    fn address(port: u16) -> ProtoNodeAddress {
        ProtoNodeAddress {
            host: Ipv4Addr::LOCALHOST.to_string(),
            port: port as u32,
            available: true,
        }
    }

    fn handle_batch_write(&self, request: ProtoBatchWriteReq) -> Result<ProtoBatchWriteReply, Status> {
        self.check_writable()?;

        let mut ops = Vec::with_capacity(request.operations.len());
        for operation in request.operations {
            ops.push(
                operation
                    .op
                    .ok_or_else(|| Status::invalid_argument("Batch operation without a body"))?,
            );
        }

        let mut store = self.lock_store();
        for op in &ops {
            match op {
                proto_batch_op::Op::Put(put) => {
                    store.data.insert(put.key.clone(), put.value.clone());
                    store.writes += 1;
                }
                proto_batch_op::Op::Delete(delete) => {
                    store.data.remove(&delete.key);
                    store.deletes += 1;
                }
            }
        }

        Ok(ProtoBatchWriteReply {
            success: true,
            applied: ops.len() as u64,
            error: String::new(),
        })
    }

    fn handle_transaction_put(&self, key: Vec<u8>, value: Option<Vec<u8>>, id: &str) -> Result<(), Status> {
        self.check_writable()?;
        let mut store = self.lock_store();
        let transaction = store.transaction(id)?;
        if transaction.read_only {
            return Err(Status::invalid_argument(format!("Transaction {} is read-only", id)));
        }
        transaction.writes.insert(key, value);
        Ok(())
    }

    fn handle_commit(&self, id: &str) -> Result<ProtoTxnReply, Status> {
        self.check_writable()?;
        let mut store = self.lock_store();
        let transaction = store
            .transactions
            .remove(id)
            .ok_or_else(|| Status::not_found(format!("Unknown transaction {}", id)))?;

        for (key, value) in transaction.writes {
            match value {
                Some(value) => {
                    store.data.insert(key, value);
                    store.writes += 1;
                }
                None => {
                    store.data.remove(&key);
                    store.deletes += 1;
                }
            }
        }

        Ok(ProtoTxnReply {
            success: true,
            error: String::new(),
        })
    }

    fn handle_transaction_scan(&self, request: ProtoTxnScanReq) -> Result<ScanReplies, Status> {
        let mut store = self.lock_store();
        let mut view = store.data.clone();
        let transaction = store.transaction(&request.transaction_id)?;
        for (key, value) in &transaction.writes {
            match value {
                Some(value) => view.insert(key.clone(), value.clone()),
                None => view.remove(key),
            };
        }

        Ok(chunked(scan(&view, &request.scan.unwrap_or_default())))
    }
}

fn scan(data: &BTreeMap<Vec<u8>, Vec<u8>>, request: &ProtoScanReq) -> Vec<ProtoKeyValue> {
    let mut entries: Vec<ProtoKeyValue> = data
        .iter()
        .filter(|(key, _)| matches_scan(key, request))
        .map(|(key, value)| ProtoKeyValue {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();

    if request.reverse {
        entries.reverse();
    }
    if request.limit > 0 {
        entries.truncate(request.limit as usize);
    }
    entries
}

fn matches_scan(key: &[u8], request: &ProtoScanReq) -> bool {
    (request.prefix.is_empty() || key.starts_with(&request.prefix))
        && (request.suffix.is_empty() || key.ends_with(&request.suffix))
        && (request.start.is_empty() || key >= request.start.as_slice())
        && (request.end.is_empty() || key < request.end.as_slice())
}

fn chunked(entries: Vec<ProtoKeyValue>) -> ScanReplies {
    let replies: Vec<_> = entries
        .chunks(SCAN_CHUNK_SIZE)
        .map(|chunk| Ok(ProtoScanReply { entries: chunk.to_vec() }))
        .collect();
    stream::iter(replies)
}

#[async_trait::async_trait]
impl GrpcKv for InMemoryKvServer {
    async fn get(&self, request: Request<ProtoGetReq>) -> Result<Response<ProtoGetReply>, Status> {
        let request = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", request);

        let mut store = self.lock_store();
        store.reads += 1;
        let reply = match store.data.get(&request.key) {
            Some(value) => ProtoGetReply {
                found: true,
                value: value.clone(),
            },
            None => ProtoGetReply::default(),
        };
        Ok(Response::new(reply))
    }

    async fn put(&self, request: Request<ProtoPutReq>) -> Result<Response<ProtoPutReply>, Status> {
        let request = request.into_inner();
        self.check_writable()?;

        let mut store = self.lock_store();
        store.data.insert(request.key, request.value);
        store.writes += 1;
        Ok(Response::new(ProtoPutReply {
            success: true,
            error: String::new(),
        }))
    }

    async fn delete(&self, request: Request<ProtoDeleteReq>) -> Result<Response<ProtoDeleteReply>, Status> {
        let request = request.into_inner();
        self.check_writable()?;

        let mut store = self.lock_store();
        store.data.remove(&request.key);
        store.deletes += 1;
        Ok(Response::new(ProtoDeleteReply {
            success: true,
            error: String::new(),
        }))
    }

    async fn batch_write(&self, request: Request<ProtoBatchWriteReq>) -> Result<Response<ProtoBatchWriteReply>, Status> {
        let reply = self.handle_batch_write(request.into_inner())?;
        Ok(Response::new(reply))
    }

    type ScanStream = ScanReplies;

    async fn scan(&self, request: Request<ProtoScanReq>) -> Result<Response<Self::ScanStream>, Status> {
        let request = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", request);

        let entries = scan(&self.lock_store().data, &request);
        Ok(Response::new(chunked(entries)))
    }

    async fn begin_transaction(&self, request: Request<ProtoBeginTxnReq>) -> Result<Response<ProtoBeginTxnReply>, Status> {
        let request = request.into_inner();
        self.check_writable()?;

        let mut store = self.lock_store();
        store.next_transaction_id += 1;
        let transaction_id = format!("{}-txn-{}", self.node_id, store.next_transaction_id);
        store.transactions.insert(
            transaction_id.clone(),
            PendingTransaction {
                read_only: request.read_only,
                writes: BTreeMap::new(),
            },
        );
        Ok(Response::new(ProtoBeginTxnReply { transaction_id }))
    }

    async fn commit_transaction(&self, request: Request<ProtoTxnReq>) -> Result<Response<ProtoTxnReply>, Status> {
        let reply = self.handle_commit(&request.into_inner().transaction_id)?;
        Ok(Response::new(reply))
    }

    async fn rollback_transaction(&self, request: Request<ProtoTxnReq>) -> Result<Response<ProtoTxnReply>, Status> {
        let id = request.into_inner().transaction_id;
        self.check_writable()?;
        self.lock_store()
            .transactions
            .remove(&id)
            .ok_or_else(|| Status::not_found(format!("Unknown transaction {}", id)))?;
        Ok(Response::new(ProtoTxnReply {
            success: true,
            error: String::new(),
        }))
    }

    async fn transaction_get(&self, request: Request<ProtoTxnGetReq>) -> Result<Response<ProtoGetReply>, Status> {
        let request = request.into_inner();
        let mut store = self.lock_store();
        store.reads += 1;

        let pending = store.transaction(&request.transaction_id)?.writes.get(&request.key).cloned();
        let value = match pending {
            Some(value) => value,
            None => store.data.get(&request.key).cloned(),
        };
        Ok(Response::new(ProtoGetReply {
            found: value.is_some(),
            value: value.unwrap_or_default(),
        }))
    }

    async fn transaction_put(&self, request: Request<ProtoTxnPutReq>) -> Result<Response<ProtoPutReply>, Status> {
        let request = request.into_inner();
        self.handle_transaction_put(request.key, Some(request.value), &request.transaction_id)?;
        Ok(Response::new(ProtoPutReply {
            success: true,
            error: String::new(),
        }))
    }

    async fn transaction_delete(&self, request: Request<ProtoTxnDeleteReq>) -> Result<Response<ProtoDeleteReply>, Status> {
        let request = request.into_inner();
        self.handle_transaction_put(request.key, None, &request.transaction_id)?;
        Ok(Response::new(ProtoDeleteReply {
            success: true,
            error: String::new(),
        }))
    }

    type TransactionScanStream = ScanReplies;

    async fn transaction_scan(
        &self,
        request: Request<ProtoTxnScanReq>,
    ) -> Result<Response<Self::TransactionScanStream>, Status> {
        let replies = self.handle_transaction_scan(request.into_inner())?;
        Ok(Response::new(replies))
    }

    async fn get_stats(&self, _: Request<ProtoStatsReq>) -> Result<Response<ProtoStatsReply>, Status> {
        let store = self.lock_store();
        let summary = |count| ProtoLatencySummary {
            count,
            ..ProtoLatencySummary::default()
        };
        Ok(Response::new(ProtoStatsReply {
            key_count: store.data.len() as u64,
            total_reads: store.reads,
            total_writes: store.writes,
            total_deletes: store.deletes,
            read_latency: Some(summary(store.reads)),
            write_latency: Some(summary(store.writes)),
            recovery: Some(ProtoRecoveryStats::default()),
            started_at_unix_ms: self.started_at_unix_ms,
        }))
    }

    async fn compact(&self, _: Request<ProtoCompactReq>) -> Result<Response<ProtoCompactReply>, Status> {
        self.check_writable()?;
        Ok(Response::new(ProtoCompactReply {
            success: true,
            error: String::new(),
        }))
    }

    async fn get_node_info(&self, _: Request<ProtoNodeInfoReq>) -> Result<Response<ProtoNodeInfoReply>, Status> {
        let reply = match &self.role {
            ServerRole::Primary { replica_ports } => ProtoNodeInfoReply {
                node_id: self.node_id.clone(),
                role: "primary".to_string(),
                primary: Some(Self::address(self.port)),
                replicas: replica_ports.iter().map(|port| Self::address(*port)).collect(),
            },
            ServerRole::Replica { primary_port } => ProtoNodeInfoReply {
                node_id: self.node_id.clone(),
                role: "replica".to_string(),
                primary: Some(Self::address(*primary_port)),
                replicas: Vec::new(),
            },
        };
        Ok(Response::new(reply))
    }
}

/// A primary and its replicas on localhost. Dropping it stops the servers.
pub(crate) struct TestCluster {
    _shutdown_handles: Vec<KvServerShutdownHandle>,
}

/// Starts a primary on `primary_port` and one replica per entry of `replica_ports`, and waits
/// until they all accept connections.
pub(crate) async fn spawn_cluster(logger: slog::Logger, primary_port: u16, replica_ports: Vec<u16>) -> TestCluster {
    let primary = InMemoryKvServer::primary(logger, primary_port, replica_ports.clone());
    let replicas: Vec<_> = replica_ports
        .iter()
        .map(|port| InMemoryKvServer::replica_of(&primary, *port))
        .collect();

    let mut shutdown_handles = Vec::new();
    for server in std::iter::once(primary).chain(replicas) {
        let (handle, signal) = shutdown_signal();
        shutdown_handles.push(handle);
        tokio::spawn(server.run(signal));
    }

    for port in std::iter::once(primary_port).chain(replica_ports.iter().copied()) {
        wait_for_port(port).await;
    }

    TestCluster {
        _shutdown_handles: shutdown_handles,
    }
}

async fn wait_for_port(port: u16) {
    for _ in 0..250 {
        if tokio::net::TcpStream::connect((Ipv4Addr::LOCALHOST, port)).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Test server on port {} never came up", port);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> BTreeMap<Vec<u8>, Vec<u8>> {
        ["order:1", "user:1", "user:2", "user:admin"]
            .iter()
            .map(|key| (key.as_bytes().to_vec(), b"v".to_vec()))
            .collect()
    }

    fn keys(entries: Vec<ProtoKeyValue>) -> Vec<String> {
        entries
            .into_iter()
            .map(|entry| String::from_utf8(entry.key).unwrap())
            .collect()
    }

    #[test]
    fn scan_filters_combine() {
        let request = ProtoScanReq {
            prefix: b"user:".to_vec(),
            suffix: b"2".to_vec(),
            ..ProtoScanReq::default()
        };
        assert_eq!(keys(scan(&data(), &request)), vec!["user:2"]);

        let request = ProtoScanReq {
            start: b"order:1".to_vec(),
            end: b"user:2".to_vec(),
            reverse: true,
            ..ProtoScanReq::default()
        };
        assert_eq!(keys(scan(&data(), &request)), vec!["user:1", "order:1"]);

        let request = ProtoScanReq {
            limit: 1,
            ..ProtoScanReq::default()
        };
        assert_eq!(keys(scan(&data(), &request)), vec!["order:1"]);
    }
}
