use crate::api::KvError;
use crate::cluster::endpoint::{ChunkSource, Connection, Connector, Credentials, NodeAddress, TlsCredentials};
use crate::cluster::operation::{Call, Reply, StreamCall};
use crate::grpc::grpc_kv_client::GrpcKvClient;
use crate::grpc::{ProtoKeyValue, ProtoNodeInfoReq, ProtoScanReply};
use std::future::Future;
use std::sync::Mutex;
use tokio::time::Instant;
use tonic::codegen::http::uri;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tonic::{Status, Streaming};

/// GrpcConnector opens tonic channels, plaintext or TLS depending on the credentials.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct GrpcConnector;

#[async_trait::async_trait]
impl Connector for GrpcConnector {
    async fn connect(&self, address: &NodeAddress, credentials: &Credentials) -> Result<Box<dyn Connection>, KvError> {
        let endpoint = build_endpoint(address, credentials)?;
        let channel = endpoint.connect().await.map_err(|e| KvError::Connection {
            message: format!("Failed to connect to {}: {}", address, e),
            code: None,
        })?;

        Ok(Box::new(GrpcConnection {
            client: Mutex::new(Some(GrpcKvClient::new(channel))),
        }))
    }
}

fn build_endpoint(address: &NodeAddress, credentials: &Credentials) -> Result<Endpoint, KvError> {
    let scheme = match credentials {
        Credentials::Insecure => "http",
        Credentials::Tls(_) => "https",
    };
    let url = format!("{}://{}", scheme, address);
    let endpoint = Endpoint::from_shared(url).map_err(|e: uri::InvalidUri| KvError::Connection {
        message: format!("Invalid address {}: {}", address, e),
        code: None,
    })?;

    match credentials {
        Credentials::Insecure => Ok(endpoint),
        Credentials::Tls(tls) => endpoint
            .tls_config(tls_config(address, tls))
            .map_err(|e| KvError::Connection {
                message: format!("Invalid TLS configuration for {}: {}", address, e),
                code: None,
            }),
    }
}

fn tls_config(address: &NodeAddress, tls: &TlsCredentials) -> ClientTlsConfig {
    let mut config = ClientTlsConfig::new().domain_name(
        tls.domain_name
            .clone()
            .unwrap_or_else(|| address.host().to_string()),
    );
    if let Some(ca) = &tls.ca_certificate_pem {
        config = config.ca_certificate(Certificate::from_pem(ca));
    }
    if let (Some(cert), Some(key)) = (&tls.client_certificate_pem, &tls.client_key_pem) {
        config = config.identity(Identity::from_pem(cert, key));
    }
    config
}

/// One tonic channel. The generated client needs `&mut self` per call, and it's cheap to clone,
/// so every call works on its own copy.
struct GrpcConnection {
    client: Mutex<Option<GrpcKvClient<Channel>>>,
}

impl GrpcConnection {
    fn client(&self) -> Result<GrpcKvClient<Channel>, Status> {
        self.client
            .lock()
            .expect("GrpcConnection.client() mutex guard poison")
            .clone()
            .ok_or_else(|| Status::unavailable("Channel is closed"))
    }
}

#[async_trait::async_trait]
impl Connection for GrpcConnection {
    async fn invoke(&self, call: Call, deadline: Instant) -> Result<Reply, Status> {
        let client = self.client()?;
        with_deadline(deadline, dispatch(client, call)).await
    }

    async fn invoke_streaming(&self, call: StreamCall, deadline: Instant) -> Result<Box<dyn ChunkSource>, Status> {
        let mut client = self.client()?;
        let streaming = with_deadline(deadline, async move {
            let response = match call {
                StreamCall::Scan(request) => client.scan(request).await?,
                StreamCall::TransactionScan(request) => client.transaction_scan(request).await?,
            };
            Ok::<_, Status>(response.into_inner())
        })
        .await?;

        Ok(Box::new(GrpcChunkSource { streaming }))
    }

    async fn probe(&self, deadline: Instant) -> Result<(), Status> {
        let mut client = self.client()?;
        with_deadline(deadline, client.get_node_info(ProtoNodeInfoReq {})).await?;
        Ok(())
    }

    async fn close(&self) {
        // Dropping the last clone of the channel shuts the connection down.
        self.client
            .lock()
            .expect("GrpcConnection.close() mutex guard poison")
            .take();
    }
}

async fn with_deadline<T, F>(deadline: Instant, future: F) -> Result<T, Status>
where
    F: Future<Output = Result<T, Status>>,
{
    match tokio::time::timeout_at(deadline, future).await {
        Ok(result) => result,
        Err(_) => Err(Status::deadline_exceeded("Request deadline elapsed")),
    }
}

async fn dispatch(mut client: GrpcKvClient<Channel>, call: Call) -> Result<Reply, Status> {
    let reply = match call {
        Call::Get(request) => Reply::Get(client.get(request).await?.into_inner()),
        Call::Put(request) => Reply::Put(client.put(request).await?.into_inner()),
        Call::Delete(request) => Reply::Delete(client.delete(request).await?.into_inner()),
        Call::BatchWrite(request) => Reply::BatchWrite(client.batch_write(request).await?.into_inner()),
        Call::BeginTransaction(request) => {
            Reply::BeginTransaction(client.begin_transaction(request).await?.into_inner())
        }
        Call::CommitTransaction(request) => Reply::Transaction(client.commit_transaction(request).await?.into_inner()),
        Call::RollbackTransaction(request) => {
            Reply::Transaction(client.rollback_transaction(request).await?.into_inner())
        }
        Call::TransactionGet(request) => Reply::Get(client.transaction_get(request).await?.into_inner()),
        Call::TransactionPut(request) => Reply::Put(client.transaction_put(request).await?.into_inner()),
        Call::TransactionDelete(request) => Reply::Delete(client.transaction_delete(request).await?.into_inner()),
        Call::GetStats(request) => Reply::Stats(client.get_stats(request).await?.into_inner()),
        Call::Compact(request) => Reply::Compact(client.compact(request).await?.into_inner()),
        Call::GetNodeInfo(request) => Reply::NodeInfo(client.get_node_info(request).await?.into_inner()),
    };
    Ok(reply)
}

struct GrpcChunkSource {
    streaming: Streaming<ProtoScanReply>,
}

#[async_trait::async_trait]
impl ChunkSource for GrpcChunkSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<ProtoKeyValue>>, Status> {
        Ok(self.streaming.message().await?.map(|reply| reply.entries))
    }
}
