use crate::cluster::{DiscoverySettings, ReplicaSelection, RetryPolicy, RoutingPreferences, SessionSettings};
use std::convert::TryFrom;
use tokio::time::Duration;

/// Tunables for a `KvClient`. Anything left as `None` gets its default.
#[derive(Clone, Debug, Default)]
pub struct KvClientOptions {
    /// How long `connect()` may wait for a node's transport. Default 5s.
    pub connect_timeout: Option<Duration>,
    /// Deadline for each RPC attempt, and for each chunk of a scan. Default 10s.
    pub request_timeout: Option<Duration>,
    /// Retries after the first attempt of a failed call. Default 3. Backoff stops growing once it
    /// no longer fits a `Duration`.
    pub max_retries: Option<u32>,
    /// Base of the exponential backoff. Default 100ms.
    pub retry_delay: Option<Duration>,
    /// Send reads to replicas when connected to the primary. Default true.
    pub auto_route_reads: Option<bool>,
    /// Send writes to the primary when connected to a replica. Default true.
    pub auto_route_writes: Option<bool>,
    /// Default true.
    pub prefer_replica: Option<bool>,
    /// Default `RoundRobin`.
    pub replica_selection: Option<ReplicaSelection>,
    /// How long a replica that dropped its connection is left out of read selection before it is
    /// tried again. Default 1s.
    pub replica_retry_interval: Option<Duration>,
}

#[derive(Clone, Debug)]
pub(super) struct KvClientOptionsValidated {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub auto_route_reads: bool,
    pub auto_route_writes: bool,
    pub prefer_replica: bool,
    pub replica_selection: ReplicaSelection,
    pub replica_retry_interval: Duration,
}

impl KvClientOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.connect_timeout == Duration::from_millis(0) {
            return Err("Connect timeout must be greater than zero");
        }
        if self.request_timeout == Duration::from_millis(0) {
            return Err("Request timeout must be greater than zero");
        }
        if self.retry_delay == Duration::from_millis(0) {
            return Err("Retry delay must be greater than zero");
        }
        Ok(())
    }

    pub(super) fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            discovery: DiscoverySettings {
                auto_route_reads: self.auto_route_reads,
                auto_route_writes: self.auto_route_writes,
                connect_timeout: self.connect_timeout,
                request_timeout: self.request_timeout,
                replica_retry_interval: self.replica_retry_interval,
            },
            routing: RoutingPreferences {
                auto_route_reads: self.auto_route_reads,
                auto_route_writes: self.auto_route_writes,
                prefer_replica: self.prefer_replica,
                replica_selection: self.replica_selection,
            },
            retry: RetryPolicy {
                max_retries: self.max_retries,
                retry_delay: self.retry_delay,
                request_timeout: self.request_timeout,
            },
        }
    }
}

impl TryFrom<KvClientOptions> for KvClientOptionsValidated {
    type Error = &'static str;

    fn try_from(options: KvClientOptions) -> Result<Self, Self::Error> {
        let values = KvClientOptionsValidated {
            connect_timeout: options.connect_timeout.unwrap_or(Duration::from_secs(5)),
            request_timeout: options.request_timeout.unwrap_or(Duration::from_secs(10)),
            max_retries: options.max_retries.unwrap_or(3),
            retry_delay: options.retry_delay.unwrap_or(Duration::from_millis(100)),
            auto_route_reads: options.auto_route_reads.unwrap_or(true),
            auto_route_writes: options.auto_route_writes.unwrap_or(true),
            prefer_replica: options.prefer_replica.unwrap_or(true),
            replica_selection: options.replica_selection.unwrap_or_default(),
            replica_retry_interval: options.replica_retry_interval.unwrap_or(Duration::from_secs(1)),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = KvClientOptionsValidated::try_from(KvClientOptions::default()).unwrap();

        assert_eq!(options.connect_timeout, Duration::from_secs(5));
        assert_eq!(options.request_timeout, Duration::from_secs(10));
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.retry_delay, Duration::from_millis(100));
        assert!(options.auto_route_reads);
        assert!(options.auto_route_writes);
        assert!(options.prefer_replica);
        assert_eq!(options.replica_selection, ReplicaSelection::RoundRobin);
        assert_eq!(options.replica_retry_interval, Duration::from_secs(1));
    }

    #[test]
    fn zero_retries_is_allowed() {
        let options = KvClientOptionsValidated::try_from(KvClientOptions {
            max_retries: Some(0),
            ..KvClientOptions::default()
        })
        .unwrap();
        assert_eq!(options.session_settings().retry.max_retries, 0);
    }

    #[test]
    fn large_retry_counts_are_allowed() {
        let options = KvClientOptionsValidated::try_from(KvClientOptions {
            max_retries: Some(40),
            ..KvClientOptions::default()
        })
        .unwrap();
        let retry = options.session_settings().retry;

        assert_eq!(retry.max_retries, 40);
        assert_eq!(retry.backoff(39), Duration::MAX);
    }

    #[test]
    fn illegal_values_are_rejected() {
        let illegal = vec![
            KvClientOptions {
                connect_timeout: Some(Duration::from_millis(0)),
                ..KvClientOptions::default()
            },
            KvClientOptions {
                request_timeout: Some(Duration::from_millis(0)),
                ..KvClientOptions::default()
            },
            KvClientOptions {
                retry_delay: Some(Duration::from_millis(0)),
                ..KvClientOptions::default()
            },
        ];

        for options in illegal {
            assert!(KvClientOptionsValidated::try_from(options.clone()).is_err(), "{:?}", options);
        }
    }
}
