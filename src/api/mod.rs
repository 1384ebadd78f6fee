//! This mod holds the library's client-facing API: the client itself, its configuration, and the
//! handles it gives out for batches, scans and transactions.
mod batch;
mod client;
mod error;
mod options;
mod scan;
mod stats;
mod transaction;
mod validation;
mod wiring;

pub use batch::BatchOperation;
pub use batch::WriteBatch;
pub use client::KvClient;
pub use error::ErrorKind;
pub use error::KvError;
pub use options::KvClientOptions;
pub use scan::KeyValue;
pub use scan::ScanOptions;
pub use scan::ScanStream;
pub use stats::LatencySummary;
pub use stats::RecoveryStats;
pub use stats::Stats;
pub use transaction::Transaction;
pub use transaction::TransactionOptions;
pub use validation::MAX_KEY_SIZE;
pub use validation::MAX_VALUE_SIZE;
pub use wiring::try_create_kv_client;
pub use wiring::KvClientConfig;
pub use wiring::KvClientCreationError;

// So the retry executor classifies statuses the same way errors are built from them.
pub(crate) use error::{is_read_only, is_retriable};
