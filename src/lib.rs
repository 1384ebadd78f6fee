mod api;
mod cluster;
#[cfg(test)]
mod server;
mod grpc {
    include!("../generated/kvstore.rs");
}

pub use api::try_create_kv_client;
pub use api::BatchOperation;
pub use api::ErrorKind;
pub use api::KeyValue;
pub use api::KvClient;
pub use api::KvClientConfig;
pub use api::KvClientCreationError;
pub use api::KvClientOptions;
pub use api::KvError;
pub use api::LatencySummary;
pub use api::RecoveryStats;
pub use api::ScanOptions;
pub use api::ScanStream;
pub use api::Stats;
pub use api::Transaction;
pub use api::TransactionOptions;
pub use api::WriteBatch;
pub use api::MAX_KEY_SIZE;
pub use api::MAX_VALUE_SIZE;
pub use cluster::ConnectivityState;
pub use cluster::NodeAddress;
pub use cluster::NodeDescriptor;
pub use cluster::NodeInfo;
pub use cluster::NodeRole;
pub use cluster::ReplicaSelection;
pub use cluster::TlsCredentials;

// Learning 1: `create::{root_mod}` should not have any code. Just `mod` and `pub use` statements.
// Learning 2: All `mod` statements, anywhere, should not be `pub`. Only export `pub` via individual
//             use statements.
//
// This keeps the `crate::{root_mod}` root_mod only responsible for exporting types to the rest of
// crate, and allows me to organize my root_mod impl however I want.
