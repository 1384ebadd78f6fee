use crate::api::client::KvClient;
use crate::api::options::KvClientOptionsValidated;
use crate::api::KvClientOptions;
use crate::cluster::{Clock, Connector, Credentials, GrpcConnector, NodeAddress, RealClock, Session, TlsCredentials};
use std::convert::TryFrom;
use std::sync::Arc;

pub struct KvClientConfig {
    /// Any node of the cluster. The rest are found through it.
    pub host: String,
    pub port: u16,
    /// `None` for plaintext.
    pub tls: Option<TlsCredentials>,
    pub info_logger: slog::Logger,
    pub options: KvClientOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum KvClientCreationError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Illegal options for configuring client: {0}")]
    IllegalClientOptions(String),
    #[error("Illegal TLS credentials: {0}")]
    IllegalTlsCredentials(String),
}

/// Builds a client without touching the network. The connection is made by `KvClient::connect()`,
/// or lazily by the first operation.
pub fn try_create_kv_client(config: KvClientConfig) -> Result<KvClient, KvClientCreationError> {
    create_kv_client(config, Arc::new(GrpcConnector), Arc::new(RealClock))
}

pub(crate) fn create_kv_client(
    config: KvClientConfig,
    connector: Arc<dyn Connector>,
    clock: Arc<dyn Clock>,
) -> Result<KvClient, KvClientCreationError> {
    let address = seed_address(&config.host, config.port)?;
    let credentials = credentials(config.tls)?;
    let options = KvClientOptionsValidated::try_from(config.options)
        .map_err(|e| KvClientCreationError::IllegalClientOptions(e.to_string()))?;

    let session = Session::new(
        config.info_logger,
        address,
        connector,
        credentials,
        options.session_settings(),
        clock,
    );

    Ok(KvClient::new(Arc::new(session)))
}

fn seed_address(host: &str, port: u16) -> Result<NodeAddress, KvClientCreationError> {
    let address = NodeAddress::new(host, port);
    if address.host().is_empty() {
        return Err(KvClientCreationError::InvalidAddress("Host must not be empty".into()));
    }
    if address.port() == 0 {
        return Err(KvClientCreationError::InvalidAddress("Port must not be zero".into()));
    }
    Ok(address)
}

fn credentials(tls: Option<TlsCredentials>) -> Result<Credentials, KvClientCreationError> {
    match tls {
        None => Ok(Credentials::Insecure),
        Some(tls) => {
            if tls.client_certificate_pem.is_some() != tls.client_key_pem.is_some() {
                return Err(KvClientCreationError::IllegalTlsCredentials(
                    "Client certificate and key must be given together".into(),
                ));
            }
            Ok(Credentials::Tls(tls))
        }
    }
}
