use bytes::Bytes;
use std::fmt;
use tonic::{Code, Status};

/// ErrorKind is the fieldless form of `KvError`, convenient for matching.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Connection,
    Timeout,
    ReadOnly,
    Transaction,
    KeyNotFound,
    InvalidArgument,
    Rpc,
}

/// Every public operation fails with exactly one of these. Remote failures keep the server's
/// message and, where there was one, its status code.
#[derive(Clone, Debug, thiserror::Error)]
pub enum KvError {
    #[error("Connection error: {message}")]
    Connection { message: String, code: Option<Code> },

    #[error("Operation timed out: {message}")]
    Timeout { message: String },

    // Write landed on an endpoint that isn't the writable primary.
    #[error("Endpoint is read-only: {message}")]
    ReadOnly { message: String, code: Option<Code> },

    #[error("Transaction error: {message}")]
    Transaction { message: String, code: Option<Code> },

    // Display is lossy for non-UTF-8 keys; `key` holds the exact bytes.
    #[error("Key not found: {}", String::from_utf8_lossy(.key))]
    KeyNotFound { key: Bytes },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("RPC failed with {code:?}: {message}")]
    Rpc { code: Code, message: String },
}

impl KvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::Connection { .. } => ErrorKind::Connection,
            KvError::Timeout { .. } => ErrorKind::Timeout,
            KvError::ReadOnly { .. } => ErrorKind::ReadOnly,
            KvError::Transaction { .. } => ErrorKind::Transaction,
            KvError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            KvError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            KvError::Rpc { .. } => ErrorKind::Rpc,
        }
    }

    /// The remote status code, if this error came off the wire.
    pub fn code(&self) -> Option<Code> {
        match self {
            KvError::Connection { code, .. } => *code,
            KvError::Timeout { .. } => Some(Code::DeadlineExceeded),
            KvError::ReadOnly { code, .. } => *code,
            KvError::Transaction { code, .. } => *code,
            KvError::KeyNotFound { .. } => None,
            KvError::InvalidArgument { .. } => None,
            KvError::Rpc { code, .. } => Some(*code),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        KvError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn key_not_found(key: &[u8]) -> Self {
        KvError::KeyNotFound {
            key: Bytes::copy_from_slice(key),
        }
    }

    pub(crate) fn not_connected() -> Self {
        KvError::Connection {
            message: "Client is not connected".to_string(),
            code: None,
        }
    }

    /// Reply carried `success: false` without a status.
    pub(crate) fn rejected(operation: &str, error: String) -> Self {
        let message = if error.is_empty() {
            format!("{} was rejected by the server", operation)
        } else {
            error
        };
        KvError::Rpc {
            code: Code::Unknown,
            message,
        }
    }

    /// Re-tags a generic remote failure as a transaction failure. Not-found, timeouts, connection
    /// and read-only errors keep their kind.
    pub(crate) fn into_transaction_error(self) -> Self {
        match self {
            KvError::Rpc { code, message } => KvError::Transaction {
                message,
                code: Some(code),
            },
            other => other,
        }
    }
}

impl From<Status> for KvError {
    fn from(status: Status) -> Self {
        let code = status.code();
        let message = status.message().to_string();

        if is_read_only(&status) {
            return KvError::ReadOnly {
                message,
                code: Some(code),
            };
        }

        match code {
            Code::DeadlineExceeded => KvError::Timeout { message },
            Code::Unavailable => KvError::Connection {
                message,
                code: Some(code),
            },
            _ => KvError::Rpc { code, message },
        }
    }
}

/// Statuses worth another attempt: the node may be restarting, overloaded or slow.
pub(crate) fn is_retriable(status: &Status) -> bool {
    matches!(
        status.code(),
        Code::Unavailable | Code::Internal | Code::ResourceExhausted | Code::DeadlineExceeded
    )
}

const READ_ONLY_HINTS: &[&str] = &["read-only", "read only", "readonly", "stale", "not primary", "not the primary"];

/// Whether the target refused because it is a replica or has a stale view of who the primary is.
///
/// `FailedPrecondition` is authoritative. The message hints are best effort: a miss only costs a
/// normal failure instead of a redirect.
pub(crate) fn is_read_only(status: &Status) -> bool {
    if status.code() == Code::FailedPrecondition {
        return true;
    }

    let message = status.message().to_ascii_lowercase();
    READ_ONLY_HINTS.iter().any(|hint| message.contains(hint))
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Connection => "ConnectionError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::ReadOnly => "ReadOnlyError",
            ErrorKind::Transaction => "TransactionError",
            ErrorKind::KeyNotFound => "KeyNotFoundError",
            ErrorKind::InvalidArgument => "InvalidArgumentError",
            ErrorKind::Rpc => "RpcError",
        };
        f.write_str(name)
    }
}
