use crate::api::KvError;
use crate::grpc::{
    ProtoBatchWriteReply, ProtoBatchWriteReq, ProtoBeginTxnReply, ProtoBeginTxnReq, ProtoCompactReply, ProtoCompactReq,
    ProtoDeleteReply, ProtoDeleteReq, ProtoGetReply, ProtoGetReq, ProtoNodeInfoReply, ProtoNodeInfoReq, ProtoPutReply,
    ProtoPutReq, ProtoScanReq, ProtoStatsReply, ProtoStatsReq, ProtoTxnDeleteReq, ProtoTxnGetReq, ProtoTxnPutReq,
    ProtoTxnReply, ProtoTxnReq, ProtoTxnScanReq,
};
use tonic::Code;

/// Access is the routing classification of a method.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Access {
    Read,
    Write,
}

/// Method is the fixed set of RPCs exposed by the KV service.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Method {
    Get,
    Put,
    Delete,
    BatchWrite,
    Scan,
    BeginTransaction,
    CommitTransaction,
    RollbackTransaction,
    TransactionGet,
    TransactionPut,
    TransactionDelete,
    TransactionScan,
    GetStats,
    Compact,
    GetNodeInfo,
}

impl Method {
    /// Only methods that observe state are reads. Every transaction method is a write, even
    /// `TransactionGet`, so the whole transaction stays on the primary's snapshot.
    pub(crate) fn access(self) -> Access {
        match self {
            Method::Get | Method::Scan | Method::GetStats | Method::GetNodeInfo => Access::Read,
            Method::Put
            | Method::Delete
            | Method::BatchWrite
            | Method::Compact
            | Method::BeginTransaction
            | Method::CommitTransaction
            | Method::RollbackTransaction
            | Method::TransactionGet
            | Method::TransactionPut
            | Method::TransactionDelete
            | Method::TransactionScan => Access::Write,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Method::Get => "Get",
            Method::Put => "Put",
            Method::Delete => "Delete",
            Method::BatchWrite => "BatchWrite",
            Method::Scan => "Scan",
            Method::BeginTransaction => "BeginTransaction",
            Method::CommitTransaction => "CommitTransaction",
            Method::RollbackTransaction => "RollbackTransaction",
            Method::TransactionGet => "TransactionGet",
            Method::TransactionPut => "TransactionPut",
            Method::TransactionDelete => "TransactionDelete",
            Method::TransactionScan => "TransactionScan",
            Method::GetStats => "GetStats",
            Method::Compact => "Compact",
            Method::GetNodeInfo => "GetNodeInfo",
        }
    }
}

/// A unary request, tagged by the method it is sent to.
#[derive(Clone, Debug)]
pub(crate) enum Call {
    Get(ProtoGetReq),
    Put(ProtoPutReq),
    Delete(ProtoDeleteReq),
    BatchWrite(ProtoBatchWriteReq),
    BeginTransaction(ProtoBeginTxnReq),
    CommitTransaction(ProtoTxnReq),
    RollbackTransaction(ProtoTxnReq),
    TransactionGet(ProtoTxnGetReq),
    TransactionPut(ProtoTxnPutReq),
    TransactionDelete(ProtoTxnDeleteReq),
    GetStats(ProtoStatsReq),
    Compact(ProtoCompactReq),
    GetNodeInfo(ProtoNodeInfoReq),
}

impl Call {
    pub(crate) fn method(&self) -> Method {
        match self {
            Call::Get(_) => Method::Get,
            Call::Put(_) => Method::Put,
            Call::Delete(_) => Method::Delete,
            Call::BatchWrite(_) => Method::BatchWrite,
            Call::BeginTransaction(_) => Method::BeginTransaction,
            Call::CommitTransaction(_) => Method::CommitTransaction,
            Call::RollbackTransaction(_) => Method::RollbackTransaction,
            Call::TransactionGet(_) => Method::TransactionGet,
            Call::TransactionPut(_) => Method::TransactionPut,
            Call::TransactionDelete(_) => Method::TransactionDelete,
            Call::GetStats(_) => Method::GetStats,
            Call::Compact(_) => Method::Compact,
            Call::GetNodeInfo(_) => Method::GetNodeInfo,
        }
    }
}

/// A server-streaming request.
#[derive(Clone, Debug)]
pub(crate) enum StreamCall {
    Scan(ProtoScanReq),
    TransactionScan(ProtoTxnScanReq),
}

impl StreamCall {
    pub(crate) fn method(&self) -> Method {
        match self {
            StreamCall::Scan(_) => Method::Scan,
            StreamCall::TransactionScan(_) => Method::TransactionScan,
        }
    }
}

/// A unary response. Transactional get/put/delete share the reply shape of their plain
/// counterparts, and commit/rollback share `Transaction`.
#[derive(Debug)]
pub(crate) enum Reply {
    Get(ProtoGetReply),
    Put(ProtoPutReply),
    Delete(ProtoDeleteReply),
    BatchWrite(ProtoBatchWriteReply),
    BeginTransaction(ProtoBeginTxnReply),
    Transaction(ProtoTxnReply),
    Stats(ProtoStatsReply),
    Compact(ProtoCompactReply),
    NodeInfo(ProtoNodeInfoReply),
}

macro_rules! reply_accessor {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub(crate) fn $fn_name(self) -> Result<$ty, KvError> {
            match self {
                Reply::$variant(reply) => Ok(reply),
                other => Err(KvError::Rpc {
                    code: Code::Internal,
                    message: format!(
                        "expected {} reply, received {}",
                        stringify!($variant),
                        other.variant_name()
                    ),
                }),
            }
        }
    };
}

impl Reply {
    reply_accessor!(into_get, Get, ProtoGetReply);
    reply_accessor!(into_put, Put, ProtoPutReply);
    reply_accessor!(into_delete, Delete, ProtoDeleteReply);
    reply_accessor!(into_batch_write, BatchWrite, ProtoBatchWriteReply);
    reply_accessor!(into_begin_transaction, BeginTransaction, ProtoBeginTxnReply);
    reply_accessor!(into_transaction, Transaction, ProtoTxnReply);
    reply_accessor!(into_stats, Stats, ProtoStatsReply);
    reply_accessor!(into_compact, Compact, ProtoCompactReply);
    reply_accessor!(into_node_info, NodeInfo, ProtoNodeInfoReply);

    fn variant_name(&self) -> &'static str {
        match self {
            Reply::Get(_) => "Get",
            Reply::Put(_) => "Put",
            Reply::Delete(_) => "Delete",
            Reply::BatchWrite(_) => "BatchWrite",
            Reply::BeginTransaction(_) => "BeginTransaction",
            Reply::Transaction(_) => "Transaction",
            Reply::Stats(_) => "Stats",
            Reply::Compact(_) => "Compact",
            Reply::NodeInfo(_) => "NodeInfo",
        }
    }
}
