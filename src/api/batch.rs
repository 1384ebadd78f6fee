use crate::api::validation::{validate_key, validate_value};
use crate::api::KvError;
use crate::cluster::{Call, Session};
use crate::grpc::{proto_batch_op, ProtoBatchDelete, ProtoBatchOp, ProtoBatchPut, ProtoBatchWriteReq};
use bytes::Bytes;
use std::sync::Arc;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchOperation {
    Put { key: Bytes, value: Bytes },
    Delete { key: Bytes },
}

impl From<BatchOperation> for ProtoBatchOp {
    fn from(operation: BatchOperation) -> Self {
        let op = match operation {
            BatchOperation::Put { key, value } => proto_batch_op::Op::Put(ProtoBatchPut {
                key: key.to_vec(),
                value: value.to_vec(),
            }),
            BatchOperation::Delete { key } => proto_batch_op::Op::Delete(ProtoBatchDelete { key: key.to_vec() }),
        };
        ProtoBatchOp { op: Some(op) }
    }
}

/// WriteBatch collects puts and deletes and applies them atomically in one call.
///
/// Operations are validated as they are added, so a batch never carries an invalid key or value.
/// A successful `execute()` empties the batch; a failed one leaves it intact so it can be retried.
pub struct WriteBatch {
    session: Arc<Session>,
    operations: Vec<BatchOperation>,
}

impl WriteBatch {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        WriteBatch {
            session,
            operations: Vec::new(),
        }
    }

    pub fn put(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<&mut Self, KvError> {
        let (key, value) = (key.as_ref(), value.as_ref());
        validate_key(key)?;
        validate_value(value)?;
        self.operations.push(BatchOperation::Put {
            key: Bytes::copy_from_slice(key),
            value: Bytes::copy_from_slice(value),
        });
        Ok(self)
    }

    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<&mut Self, KvError> {
        let key = key.as_ref();
        validate_key(key)?;
        self.operations.push(BatchOperation::Delete {
            key: Bytes::copy_from_slice(key),
        });
        Ok(self)
    }

    pub fn operations(&self) -> &[BatchOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Sends every queued operation as one write. Returns how many the server applied. An empty
    /// batch is not sent.
    pub async fn execute(&mut self, sync: bool) -> Result<u64, KvError> {
        if self.operations.is_empty() {
            return Ok(0);
        }

        let request = ProtoBatchWriteReq {
            operations: self.operations.iter().cloned().map(ProtoBatchOp::from).collect(),
            sync,
        };
        let reply = self.session.execute(Call::BatchWrite(request)).await?.into_batch_write()?;
        if !reply.success {
            return Err(KvError::rejected("BatchWrite", reply.error));
        }

        self.operations.clear();
        Ok(reply.applied)
    }
}
