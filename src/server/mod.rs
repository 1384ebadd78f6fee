//! An in-memory implementation of the KV service, so the client can be exercised end to end over
//! real gRPC.
mod server;
mod shutdown;

pub(crate) use server::spawn_cluster;
pub(crate) use shutdown::shutdown_signal;
pub(crate) use shutdown::KvServerShutdownHandle;
pub(crate) use shutdown::KvServerShutdownSignal;
