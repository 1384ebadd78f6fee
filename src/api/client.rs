use crate::api::batch::WriteBatch;
use crate::api::scan::{ScanOptions, ScanStream};
use crate::api::stats::Stats;
use crate::api::transaction::{Transaction, TransactionOptions};
use crate::api::validation::{validate_key, validate_value};
use crate::api::KvError;
use crate::cluster::{Call, ConnectivityState, NodeInfo, NodeRole, Session, StreamCall};
use crate::grpc::{ProtoBeginTxnReq, ProtoCompactReq, ProtoDeleteReq, ProtoGetReq, ProtoNodeInfoReq, ProtoPutReq, ProtoStatsReq};
use bytes::Bytes;
use std::convert::TryFrom;
use std::sync::Arc;

/// KvClient is the handle applications use to talk to a KV cluster. Clones share one session, so
/// they share connections and topology.
///
/// Nothing touches the network until `connect()` or the first operation, which connects
/// implicitly. Reads go to a replica and writes to the primary, as configured in
/// `KvClientOptions`.
#[derive(Clone)]
pub struct KvClient {
    session: Arc<Session>,
}

impl KvClient {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        KvClient { session }
    }

    /// Connects to the configured node and discovers the rest of the cluster through it. Only
    /// failing to reach that node is an error.
    pub async fn connect(&self) -> Result<(), KvError> {
        self.session.connect().await
    }

    /// Closes every connection. The next operation reconnects.
    pub async fn disconnect(&self) {
        self.session.disconnect().await
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// The role reported by the node we connected to. `Unknown` before connecting, or if it
    /// didn't say.
    pub fn connected_role(&self) -> NodeRole {
        self.session.connected_role()
    }

    /// Fails with `KvError::KeyNotFound` if the key doesn't exist.
    pub async fn get(&self, key: impl AsRef<[u8]>) -> Result<Bytes, KvError> {
        let key = key.as_ref();
        validate_key(key)?;

        let request = ProtoGetReq { key: key.to_vec() };
        let reply = self.session.execute(Call::Get(request)).await?.into_get()?;
        if !reply.found {
            return Err(KvError::key_not_found(key));
        }
        Ok(Bytes::from(reply.value))
    }

    /// With `sync`, the server makes the write durable before replying.
    pub async fn put(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>, sync: bool) -> Result<(), KvError> {
        let (key, value) = (key.as_ref(), value.as_ref());
        validate_key(key)?;
        validate_value(value)?;

        let request = ProtoPutReq {
            key: key.to_vec(),
            value: value.to_vec(),
            sync,
        };
        let reply = self.session.execute(Call::Put(request)).await?.into_put()?;
        if !reply.success {
            return Err(KvError::rejected("Put", reply.error));
        }
        Ok(())
    }

    /// Deleting a key that doesn't exist is not an error.
    pub async fn delete(&self, key: impl AsRef<[u8]>, sync: bool) -> Result<(), KvError> {
        let key = key.as_ref();
        validate_key(key)?;

        let request = ProtoDeleteReq {
            key: key.to_vec(),
            sync,
        };
        let reply = self.session.execute(Call::Delete(request)).await?.into_delete()?;
        if !reply.success {
            return Err(KvError::rejected("Delete", reply.error));
        }
        Ok(())
    }

    /// An empty batch. Nothing is sent until `WriteBatch::execute()`.
    pub fn batch(&self) -> WriteBatch {
        WriteBatch::new(self.session.clone())
    }

    /// Scans are never retried: a failure ends the stream, and the caller decides whether to
    /// scan again.
    pub async fn scan(&self, options: ScanOptions) -> Result<ScanStream, KvError> {
        options.validate()?;
        let stream = self.session.open_stream(StreamCall::Scan(options.into_proto())).await?;
        Ok(ScanStream::new(stream))
    }

    pub async fn scan_prefix(&self, prefix: impl AsRef<[u8]>) -> Result<ScanStream, KvError> {
        self.scan(ScanOptions::new().prefix(prefix)).await
    }

    pub async fn scan_suffix(&self, suffix: impl AsRef<[u8]>) -> Result<ScanStream, KvError> {
        self.scan(ScanOptions::new().suffix(suffix)).await
    }

    /// Keys in `[start, end)`.
    pub async fn scan_range(&self, start: impl AsRef<[u8]>, end: impl AsRef<[u8]>) -> Result<ScanStream, KvError> {
        self.scan(ScanOptions::new().start(start).end(end)).await
    }

    pub async fn begin_transaction(&self, options: TransactionOptions) -> Result<Transaction, KvError> {
        let timeout_ms = options
            .timeout
            .map(|timeout| u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        let request = ProtoBeginTxnReq {
            read_only: options.read_only,
            timeout_ms,
        };

        let reply = self
            .session
            .execute(Call::BeginTransaction(request))
            .await
            .and_then(|reply| reply.into_begin_transaction())
            .map_err(KvError::into_transaction_error)?;
        if reply.transaction_id.is_empty() {
            return Err(KvError::Transaction {
                message: "Server did not assign a transaction id".to_string(),
                code: None,
            });
        }

        Ok(Transaction::new(
            self.session.clone(),
            reply.transaction_id,
            options.read_only,
        ))
    }

    pub async fn stats(&self) -> Result<Stats, KvError> {
        let reply = self.session.execute(Call::GetStats(ProtoStatsReq {})).await?.into_stats()?;
        Ok(Stats::from(reply))
    }

    /// Asks the primary to compact its storage.
    pub async fn compact(&self) -> Result<(), KvError> {
        let reply = self
            .session
            .execute(Call::Compact(ProtoCompactReq {}))
            .await?
            .into_compact()?;
        if !reply.success {
            return Err(KvError::rejected("Compact", reply.error));
        }
        Ok(())
    }

    /// What a node reports about itself. Routed like any other read.
    pub async fn node_info(&self) -> Result<NodeInfo, KvError> {
        let reply = self
            .session
            .execute(Call::GetNodeInfo(ProtoNodeInfoReq {}))
            .await?
            .into_node_info()?;
        Ok(NodeInfo::from(reply))
    }

    /// Re-runs discovery, e.g. after a failover. Returns what the connected node reported, or
    /// `None` if it couldn't be asked; the previous topology is kept in that case.
    pub async fn refresh_topology(&self) -> Result<Option<NodeInfo>, KvError> {
        self.session.refresh_topology().await
    }

    /// Probes the connected node. Fails if not connected.
    pub async fn check_health(&self) -> Result<ConnectivityState, KvError> {
        self.session.check_health().await
    }
}
