//! Everything between a logical operation and the wire: endpoints, topology discovery, routing,
//! retries and streaming.
mod endpoint;
mod grpc;
mod operation;
mod retry;
mod router;
mod session;
mod streaming;
#[cfg(test)]
pub(crate) mod test_utils;
mod time;
mod topology;

pub use endpoint::ConnectivityState;
pub use endpoint::NodeAddress;
pub use endpoint::TlsCredentials;
pub use topology::NodeDescriptor;
pub use topology::NodeInfo;
pub use topology::NodeRole;
pub use topology::ReplicaSelection;

pub(crate) use endpoint::{Connector, Credentials};
pub(crate) use grpc::GrpcConnector;
#[cfg(test)]
pub(crate) use operation::Method;
pub(crate) use operation::{Call, Reply, StreamCall};
pub(crate) use retry::RetryPolicy;
pub(crate) use router::RoutingPreferences;
pub(crate) use session::{Session, SessionSettings};
pub(crate) use streaming::EntryStream;
pub(crate) use time::{Clock, RealClock};
pub(crate) use topology::DiscoverySettings;
