use crate::api::scan::{ScanOptions, ScanStream};
use crate::api::validation::{validate_key, validate_value};
use crate::api::KvError;
use crate::cluster::{Call, Reply, Session, StreamCall};
use crate::grpc::{ProtoTxnDeleteReq, ProtoTxnGetReq, ProtoTxnPutReq, ProtoTxnReply, ProtoTxnReq, ProtoTxnScanReq};
use bytes::Bytes;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct TransactionOptions {
    /// Reject puts and deletes without asking the server.
    pub read_only: bool,
    /// How long the server keeps the transaction open. Server default when `None`.
    pub timeout: Option<Duration>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum TransactionState {
    Active,
    Committed,
    RolledBack,
}

/// Transaction is a handle on a server-side transaction. Every call goes to the primary.
///
/// Once committed or rolled back, every method fails with a transaction error without touching
/// the network. Calls that change the handle take `&mut self`, so they can't overlap.
pub struct Transaction {
    session: Arc<Session>,
    id: String,
    read_only: bool,
    state: TransactionState,
}

impl Transaction {
    pub(crate) fn new(session: Arc<Session>, id: String, read_only: bool) -> Self {
        Transaction {
            session,
            id,
            read_only,
            state: TransactionState::Active,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_committed(&self) -> bool {
        self.state == TransactionState::Committed
    }

    pub fn is_rolled_back(&self) -> bool {
        self.state == TransactionState::RolledBack
    }

    pub async fn get(&self, key: impl AsRef<[u8]>) -> Result<Bytes, KvError> {
        self.check_active()?;
        let key = key.as_ref();
        validate_key(key)?;

        let request = ProtoTxnGetReq {
            transaction_id: self.id.clone(),
            key: key.to_vec(),
        };
        let reply = self.execute(Call::TransactionGet(request)).await?.into_get()?;
        if !reply.found {
            return Err(KvError::key_not_found(key));
        }
        Ok(Bytes::from(reply.value))
    }

    pub async fn put(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<(), KvError> {
        self.check_writable()?;
        let (key, value) = (key.as_ref(), value.as_ref());
        validate_key(key)?;
        validate_value(value)?;

        let request = ProtoTxnPutReq {
            transaction_id: self.id.clone(),
            key: key.to_vec(),
            value: value.to_vec(),
        };
        let reply = self.execute(Call::TransactionPut(request)).await?.into_put()?;
        check_success("TransactionPut", reply.success, reply.error)
    }

    pub async fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<(), KvError> {
        self.check_writable()?;
        let key = key.as_ref();
        validate_key(key)?;

        let request = ProtoTxnDeleteReq {
            transaction_id: self.id.clone(),
            key: key.to_vec(),
        };
        let reply = self.execute(Call::TransactionDelete(request)).await?.into_delete()?;
        check_success("TransactionDelete", reply.success, reply.error)
    }

    /// Scans the transaction's view of the store.
    pub async fn scan(&self, options: ScanOptions) -> Result<ScanStream, KvError> {
        self.check_active()?;
        options.validate()?;

        let call = StreamCall::TransactionScan(ProtoTxnScanReq {
            transaction_id: self.id.clone(),
            scan: Some(options.into_proto()),
        });
        let stream = self
            .session
            .open_stream(call)
            .await
            .map_err(KvError::into_transaction_error)?;
        Ok(ScanStream::for_transaction(stream))
    }

    /// On failure the handle stays active, so the caller can still roll back.
    pub async fn commit(&mut self) -> Result<(), KvError> {
        self.check_active()?;
        let reply = self.finish(Call::CommitTransaction(self.request())).await?;
        check_success("CommitTransaction", reply.success, reply.error)?;
        self.state = TransactionState::Committed;
        Ok(())
    }

    pub async fn rollback(&mut self) -> Result<(), KvError> {
        self.check_active()?;
        let reply = self.finish(Call::RollbackTransaction(self.request())).await?;
        check_success("RollbackTransaction", reply.success, reply.error)?;
        self.state = TransactionState::RolledBack;
        Ok(())
    }

    fn request(&self) -> ProtoTxnReq {
        ProtoTxnReq {
            transaction_id: self.id.clone(),
        }
    }

    async fn finish(&self, call: Call) -> Result<ProtoTxnReply, KvError> {
        self.execute(call).await?.into_transaction()
    }

    async fn execute(&self, call: Call) -> Result<Reply, KvError> {
        self.session.execute(call).await.map_err(KvError::into_transaction_error)
    }

    fn check_active(&self) -> Result<(), KvError> {
        let message = match self.state {
            TransactionState::Active => return Ok(()),
            TransactionState::Committed => format!("Transaction {} already committed", self.id),
            TransactionState::RolledBack => format!("Transaction {} already rolled back", self.id),
        };
        Err(KvError::Transaction { message, code: None })
    }

    fn check_writable(&self) -> Result<(), KvError> {
        self.check_active()?;
        if self.read_only {
            return Err(KvError::Transaction {
                message: format!("Transaction {} is read-only", self.id),
                code: None,
            });
        }
        Ok(())
    }
}

fn check_success(operation: &str, success: bool, error: String) -> Result<(), KvError> {
    if success {
        Ok(())
    } else {
        Err(KvError::rejected(operation, error).into_transaction_error())
    }
}
