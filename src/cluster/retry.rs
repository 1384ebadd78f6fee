use crate::api::{is_read_only, is_retriable};
use crate::api::KvError;
use crate::cluster::endpoint::Endpoint;
use crate::cluster::operation::{Access, Call, Reply};
use crate::cluster::router::Router;
use crate::cluster::time::Clock;
use std::sync::Arc;
use tokio::time::Duration;
use tonic::Status;

#[derive(Copy, Clone, Debug)]
pub(crate) struct RetryPolicy {
    pub(crate) max_retries: u32,
    pub(crate) retry_delay: Duration,
    pub(crate) request_timeout: Duration,
}

impl RetryPolicy {
    /// `retry_delay * 2^attempt`, no jitter.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.retry_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }
}

/// RetryExecutor runs one unary call to completion: it picks the endpoint, bounds each attempt by
/// the request timeout, backs off and retries transient failures, and redirects reads that hit a
/// read-only node to the primary.
pub(crate) struct RetryExecutor {
    logger: slog::Logger,
    router: Arc<Router>,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
}

impl RetryExecutor {
    pub(crate) fn new(logger: slog::Logger, router: Arc<Router>, policy: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        RetryExecutor {
            logger,
            router,
            policy,
            clock,
        }
    }

    pub(crate) fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub(crate) async fn execute(&self, call: Call) -> Result<Reply, KvError> {
        match call.method().access() {
            Access::Read => self.execute_read(call).await,
            Access::Write => self.execute_write(call).await,
        }
    }

    pub(crate) async fn execute_read(&self, call: Call) -> Result<Reply, KvError> {
        let mut attempt = 0;
        loop {
            let endpoint = self.router.pick_for_read()?;
            let mut result = self.attempt(&endpoint, call.clone()).await;

            if let Err(status) = &result {
                if is_read_only(status) {
                    match self.router.primary() {
                        Some(primary) if !Arc::ptr_eq(&primary, &endpoint) => {
                            slog::info!(
                                self.logger,
                                "{} on {} hit a read-only node, redirecting to primary {}: {}",
                                call.method().name(),
                                endpoint.address(),
                                primary.address(),
                                status.message()
                            );
                            // The redirect doesn't consume an attempt; its own failure is judged below.
                            result = self.attempt(&primary, call.clone()).await;
                        }
                        _ => {}
                    }
                }
            }

            match result {
                Ok(reply) => return Ok(reply),
                Err(status) => attempt = self.backoff_or_fail(&call, attempt, status).await?,
            }
        }
    }

    pub(crate) async fn execute_write(&self, call: Call) -> Result<Reply, KvError> {
        let mut attempt = 0;
        loop {
            let endpoint = self.router.pick_for_write()?;
            match self.attempt(&endpoint, call.clone()).await {
                Ok(reply) => return Ok(reply),
                Err(status) if is_read_only(&status) => {
                    slog::warn!(
                        self.logger,
                        "{} rejected by read-only node {}: {}",
                        call.method().name(),
                        endpoint.address(),
                        status.message()
                    );
                    return Err(KvError::ReadOnly {
                        message: status.message().to_string(),
                        code: Some(status.code()),
                    });
                }
                Err(status) => attempt = self.backoff_or_fail(&call, attempt, status).await?,
            }
        }
    }

    async fn attempt(&self, endpoint: &Endpoint, call: Call) -> Result<Reply, Status> {
        let deadline = self.clock.now() + self.policy.request_timeout;
        slog::debug!(self.logger, "Invoking {} on {}", call.method().name(), endpoint.address());
        endpoint.invoke(call, deadline).await
    }

    /// Sleeps and returns the next attempt number if `status` is worth retrying, otherwise
    /// converts it into the caller-facing error.
    async fn backoff_or_fail(&self, call: &Call, attempt: u32, status: Status) -> Result<u32, KvError> {
        if !is_retriable(&status) || attempt >= self.policy.max_retries {
            return Err(status.into());
        }

        let delay = self.policy.backoff(attempt);
        slog::warn!(
            self.logger,
            "{} failed with {:?} (attempt {}/{}), retrying in {}ms: {}",
            call.method().name(),
            status.code(),
            attempt + 1,
            self.policy.max_retries + 1,
            delay.as_millis(),
            status.message()
        );
        self.clock.sleep(delay).await;
        Ok(attempt + 1)
    }
}
